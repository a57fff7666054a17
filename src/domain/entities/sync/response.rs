use serde::{Deserialize, Serialize};

/// 同期エンドポイントの応答
///
/// `success` が欠けている応答は失敗として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub synced_count: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl SyncResponse {
    pub fn rejection_message(&self) -> String {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or("Unknown error")
            .to_string()
    }

    pub fn record_errors(&self) -> Vec<String> {
        self.errors.clone().unwrap_or_default()
    }
}
