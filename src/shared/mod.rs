pub mod config;
pub mod error;

pub use config::{AppConfig, ConfirmationPolicy, StorageBackend};
pub use error::{AppError, Result};
