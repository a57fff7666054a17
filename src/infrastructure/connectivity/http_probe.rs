use super::manual::ManualConnectivity;
use crate::application::ports::ConnectivityProvider;
use crate::domain::value_objects::ConnectivityEvent;
use crate::shared::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// プローブURLへの到達可否で接続状態を判定する
pub struct HttpProbeConnectivity {
    state: ManualConnectivity,
    client: reqwest::Client,
    probe_url: String,
}

impl HttpProbeConnectivity {
    pub fn new(
        probe_url: impl Into<String>,
        timeout: Duration,
        initially_online: bool,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            state: ManualConnectivity::new(initially_online),
            client,
            probe_url: probe_url.into(),
        })
    }

    /// HTTP応答が返れば（ステータスに関わらず）到達可能とみなす
    pub async fn probe(&self) -> bool {
        let reachable = match self.client.get(&self.probe_url).send().await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(
                    target: "offline::connectivity",
                    url = %self.probe_url,
                    error = %err,
                    "connectivity probe failed"
                );
                false
            }
        };
        self.state.set_online(reachable);
        reachable
    }

    pub fn spawn_probe_loop(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let probe = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                probe.probe().await;
            }
        })
    }
}

impl ConnectivityProvider for HttpProbeConnectivity {
    fn is_online(&self) -> bool {
        self.state.is_online()
    }

    fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent> {
        self.state.subscribe()
    }
}
