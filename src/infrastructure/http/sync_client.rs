use crate::application::ports::{CsrfTokenSource, SyncGateway};
use crate::domain::entities::{SyncBatch, SyncResponse};
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;

pub const CSRF_HEADER: &str = "X-CSRFToken";

pub struct ReqwestSyncGateway {
    client: reqwest::Client,
    endpoint: String,
    csrf: Arc<dyn CsrfTokenSource>,
}

impl ReqwestSyncGateway {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        csrf: Arc<dyn CsrfTokenSource>,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, csrf))
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        csrf: Arc<dyn CsrfTokenSource>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            csrf,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SyncGateway for ReqwestSyncGateway {
    async fn push_attendance(&self, batch: &SyncBatch) -> Result<SyncResponse, AppError> {
        let token = self
            .csrf
            .csrf_token()
            .ok_or_else(|| AppError::Auth("CSRF token is not available".to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, token)
            .json(batch)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            target: "offline::sync",
            status = status.as_u16(),
            records = batch.len(),
            "sync endpoint responded"
        );

        serde_json::from_str::<SyncResponse>(&body).map_err(|err| {
            AppError::DeserializationError(format!(
                "unexpected sync response (status {}): {}",
                status.as_u16(),
                err
            ))
        })
    }
}
