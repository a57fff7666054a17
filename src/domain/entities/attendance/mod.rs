pub mod queue;
pub mod record;

pub use queue::AttendanceQueue;
pub use record::{AttendanceInput, AttendanceRecord};
