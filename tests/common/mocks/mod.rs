pub mod fixed_clock;

pub use fixed_clock::*;
pub use poll_only_connectivity::*;
pub use recording_ui::*;
pub use scripted_gateway::*;
