pub mod connection_status;
pub mod record_id;
pub mod sync_state;

pub use connection_status::{ConnectionStatus, ConnectivityEvent};
pub use record_id::AttendanceRecordId;
pub use sync_state::SyncState;
