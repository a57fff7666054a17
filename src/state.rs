use crate::application::ports::{ConnectivityProvider, KeyValueStore};
use crate::application::services::{
    MonitorHandle, OfflineAttendance, OfflineAttendanceDeps, OfflineAttendanceOptions,
};
use crate::infrastructure::{
    HttpProbeConnectivity, ManualConnectivity, MemoryKeyValueStore, ReqwestSyncGateway,
    SqliteKeyValueStore, StaticCsrfToken, SystemClock, TracingNotifier,
};
use crate::shared::config::{AppConfig, StorageBackend};
use crate::shared::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 接続状態の提供元。プローブURLが設定されていればHTTPで判定する。
#[derive(Clone)]
pub enum ConnectivitySource {
    Manual(Arc<ManualConnectivity>),
    Probe(Arc<HttpProbeConnectivity>),
}

impl ConnectivitySource {
    fn provider(&self) -> Arc<dyn ConnectivityProvider> {
        match self {
            ConnectivitySource::Manual(manual) => manual.clone() as Arc<dyn ConnectivityProvider>,
            ConnectivitySource::Probe(probe) => probe.clone() as Arc<dyn ConnectivityProvider>,
        }
    }
}

/// 設定から組み立てたアプリケーション状態
pub struct AppState {
    pub config: AppConfig,
    pub attendance: Arc<OfflineAttendance>,
    pub connectivity: ConnectivitySource,
}

/// `AppState::start` で起動したバックグラウンドタスク
pub struct RunningTasks {
    monitor: MonitorHandle,
    probe: Option<JoinHandle<()>>,
}

impl RunningTasks {
    pub fn shutdown(self) {
        self.monitor.shutdown();
        if let Some(probe) = self.probe {
            probe.abort();
        }
    }
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;

        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Sqlite => Arc::new(
                SqliteKeyValueStore::connect(
                    &config.storage.database_url,
                    config.storage.max_connections,
                )
                .await?,
            ),
            StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        };

        let connectivity = match &config.connectivity.probe_url {
            Some(url) => {
                let probe = HttpProbeConnectivity::new(
                    url.clone(),
                    Duration::from_secs(config.connectivity.probe_timeout_secs),
                    false,
                )?;
                ConnectivitySource::Probe(Arc::new(probe))
            }
            None => ConnectivitySource::Manual(Arc::new(ManualConnectivity::new(true))),
        };

        let csrf = Arc::new(StaticCsrfToken::from_option(config.sync.csrf_token.clone()));
        let gateway = ReqwestSyncGateway::new(
            config.sync.endpoint(),
            Duration::from_secs(config.sync.request_timeout_secs),
            csrf,
        )?;

        let attendance = OfflineAttendance::new(
            OfflineAttendanceDeps {
                store,
                connectivity: connectivity.provider(),
                gateway: Arc::new(gateway),
                ui: Arc::new(TracingNotifier),
                notifier: Arc::new(TracingNotifier),
                clock: Arc::new(SystemClock),
            },
            OfflineAttendanceOptions::from_config(&config),
        );

        tracing::debug!(
            target: "offline::state",
            backend = ?config.storage.backend,
            endpoint = %config.sync.endpoint(),
            "application state initialized"
        );

        Ok(Self {
            config,
            attendance: Arc::new(attendance),
            connectivity,
        })
    }

    /// プローブを1回実行して初期の接続状態を確定させる
    pub async fn probe_once(&self) -> bool {
        match &self.connectivity {
            ConnectivitySource::Manual(manual) => manual.is_online(),
            ConnectivitySource::Probe(probe) => probe.probe().await,
        }
    }

    pub async fn start(&self) -> Result<RunningTasks, AppError> {
        let probe = match &self.connectivity {
            ConnectivitySource::Probe(probe) => {
                probe.probe().await;
                let interval = Duration::from_secs(self.config.connectivity.poll_interval_secs);
                Some(probe.spawn_probe_loop(interval))
            }
            ConnectivitySource::Manual(_) => None,
        };
        let monitor = self.attendance.start().await?;
        Ok(RunningTasks { monitor, probe })
    }
}
