use crate::domain::value_objects::SyncState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Cannot sync while offline")]
    Offline,

    #[error("No pending attendance to sync")]
    NothingPending,

    #[error("A sync is already in progress")]
    AlreadySyncing,

    #[error("Sync rejected by server: {0}")]
    Rejected(String),

    #[error("Sync transport failure: {0}")]
    Transport(String),

    #[error("Local storage failure: {0}")]
    Storage(String),
}

impl SyncError {
    /// ローカルのガードで止まったものは失敗として数えない
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            SyncError::Offline | SyncError::NothingPending | SyncError::AlreadySyncing
        )
    }
}

/// 同期成功時の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub sent: usize,
    pub confirmed: usize,
    pub reported_synced: u64,
    pub record_errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatusSnapshot {
    pub state: SyncState,
    pub last_attempt_ms: Option<i64>,
    pub last_success_ms: Option<i64>,
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
    pub last_synced_count: Option<u64>,
}
