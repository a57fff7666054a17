pub mod batch;
pub mod report;
pub mod response;

pub use batch::SyncBatch;
pub use report::{SyncError, SyncReport, SyncStatusSnapshot};
pub use response::SyncResponse;
