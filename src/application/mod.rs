pub mod ports;
pub mod services;

pub use services::{
    AttendanceQueueService, ConnectivityMonitor, MonitorHandle, OfflineAttendance,
    OfflineAttendanceDeps, OfflineAttendanceOptions, ReferenceCacheService, SyncEngine,
};
