//! Offline attendance queue with connectivity-driven synchronization.
//!
//! Attendance marks are appended to a locally persisted queue while the
//! device is disconnected and pushed to the server in one batch when the
//! connection returns (or when the operator triggers a sync).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

pub use application::services::{
    MonitorHandle, OfflineAttendance, OfflineAttendanceDeps, OfflineAttendanceOptions,
};
pub use domain::entities::{
    AttendanceInput, AttendanceRecord, CachedMember, CachedService, SyncError, SyncReport,
};
pub use shared::{AppConfig, AppError, Result};
pub use state::AppState;

/// ログ設定の初期化。既に初期化済みの場合は何もしない。
pub fn init_logging() {
    init_logging_with("rollcall_offline=debug,info");
}

pub fn init_logging_with(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
