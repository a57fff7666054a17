pub mod attendance;
pub mod reference;
pub mod sync;

pub use attendance::{AttendanceInput, AttendanceQueue, AttendanceRecord};
pub use reference::{CachedMember, CachedService};
pub use sync::{SyncBatch, SyncError, SyncReport, SyncResponse, SyncStatusSnapshot};
