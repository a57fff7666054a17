pub mod entities;
pub mod value_objects;

pub use entities::{
    AttendanceInput, AttendanceQueue, AttendanceRecord, CachedMember, CachedService, SyncBatch,
    SyncError, SyncReport, SyncResponse, SyncStatusSnapshot,
};
pub use value_objects::{AttendanceRecordId, ConnectionStatus, ConnectivityEvent, SyncState};
