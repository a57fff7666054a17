use crate::shared::error::AppError;
use async_trait::async_trait;

/// 文字列キーでJSON文字列を保存する永続ストア
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;
}
