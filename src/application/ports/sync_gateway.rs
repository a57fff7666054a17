use crate::domain::entities::{SyncBatch, SyncResponse};
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// 未同期バッチを一括送信する。HTTPステータスではなく応答本文で成否を判断する。
    async fn push_attendance(&self, batch: &SyncBatch) -> Result<SyncResponse, AppError>;
}

pub trait CsrfTokenSource: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}
