pub mod http_probe;
pub mod manual;

pub use http_probe::HttpProbeConnectivity;
pub use manual::ManualConnectivity;
