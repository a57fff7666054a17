pub mod csrf;
pub mod sync_client;

pub use csrf::StaticCsrfToken;
pub use sync_client::{CSRF_HEADER, ReqwestSyncGateway};
