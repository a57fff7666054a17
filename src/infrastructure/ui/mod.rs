pub mod noop;
pub mod tracing_notifier;

pub use noop::NoopAttendanceUi;
pub use tracing_notifier::TracingNotifier;
