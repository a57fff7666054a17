pub mod attendance_ui;
pub mod clock;
pub mod connectivity;
pub mod key_value_store;
pub mod sync_gateway;

pub use attendance_ui::{AttendanceUi, Notifier};
pub use clock::Clock;
pub use connectivity::ConnectivityProvider;
pub use key_value_store::KeyValueStore;
pub use sync_gateway::{CsrfTokenSource, SyncGateway};
