pub mod attendance_queue_service;
pub mod connectivity_monitor;
pub mod offline_attendance;
pub mod reference_cache_service;
mod stored_json;
pub mod sync_engine;

pub use attendance_queue_service::AttendanceQueueService;
pub use connectivity_monitor::{ConnectivityMonitor, MonitorHandle};
pub use offline_attendance::{OfflineAttendance, OfflineAttendanceDeps, OfflineAttendanceOptions};
pub use reference_cache_service::ReferenceCacheService;
pub use sync_engine::{SyncEngine, SyncEngineDeps};
