pub mod clock;
pub mod connectivity;
pub mod http;
pub mod storage;
pub mod ui;

pub use clock::SystemClock;
pub use connectivity::{HttpProbeConnectivity, ManualConnectivity};
pub use http::{ReqwestSyncGateway, StaticCsrfToken};
pub use storage::{MemoryKeyValueStore, SqliteKeyValueStore};
pub use ui::{NoopAttendanceUi, TracingNotifier};
