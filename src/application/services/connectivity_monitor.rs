use super::sync_engine::SyncEngine;
use crate::application::ports::{AttendanceUi, ConnectivityProvider};
use crate::domain::entities::{SyncError, SyncReport};
use crate::domain::value_objects::{ConnectionStatus, ConnectivityEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// 接続状態を画面に反映し、再接続時に自動同期を起動する
pub struct ConnectivityMonitor {
    connectivity: Arc<dyn ConnectivityProvider>,
    ui: Arc<dyn AttendanceUi>,
    engine: Arc<SyncEngine>,
    poll_interval: Duration,
}

/// 監視タスクのハンドル。`shutdown` で停止する。
pub struct MonitorHandle {
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl ConnectivityMonitor {
    pub fn new(
        connectivity: Arc<dyn ConnectivityProvider>,
        ui: Arc<dyn AttendanceUi>,
        engine: Arc<SyncEngine>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            connectivity,
            ui,
            engine,
            poll_interval,
        }
    }

    pub fn refresh_status(&self) -> ConnectionStatus {
        let status = ConnectionStatus::from_online(self.connectivity.is_online());
        self.ui.show_connection_status(status);
        self.ui.set_sync_control_enabled(status.is_online());
        status
    }

    pub async fn handle_event(
        &self,
        event: ConnectivityEvent,
    ) -> Option<Result<SyncReport, SyncError>> {
        tracing::debug!(target: "offline::connectivity", event = ?event, "connectivity event");
        self.refresh_status();
        match event {
            ConnectivityEvent::Online => self.engine.auto_sync().await,
            ConnectivityEvent::Offline => None,
        }
    }

    /// 自動同期を別タスクで起動する。監視ループは完了を待たない。
    fn spawn_auto_sync(&self) {
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            engine.auto_sync().await;
        });
    }

    /// 定期的な状態更新と遷移イベントの処理を行うタスクを起動する
    pub fn spawn(self: &Arc<Self>) -> MonitorHandle {
        let monitor = Arc::clone(self);
        let mut events = monitor.connectivity.subscribe();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(monitor.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut events_open = true;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        monitor.refresh_status();
                    }
                    received = events.recv(), if events_open => match received {
                        Ok(event) => {
                            tracing::debug!(
                                target: "offline::connectivity",
                                event = ?event,
                                "connectivity event"
                            );
                            monitor.refresh_status();
                            if event == ConnectivityEvent::Online {
                                monitor.spawn_auto_sync();
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                target: "offline::connectivity",
                                skipped,
                                "connectivity events lagged"
                            );
                            if monitor.refresh_status().is_online() {
                                monitor.spawn_auto_sync();
                            }
                        }
                        Err(RecvError::Closed) => {
                            tracing::debug!(
                                target: "offline::connectivity",
                                "connectivity event stream closed; polling only"
                            );
                            events_open = false;
                        }
                    },
                }
            }
        });

        MonitorHandle { task }
    }
}
