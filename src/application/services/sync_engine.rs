use super::attendance_queue_service::AttendanceQueueService;
use crate::application::ports::{AttendanceUi, Clock, ConnectivityProvider, Notifier, SyncGateway};
use crate::domain::entities::{SyncBatch, SyncError, SyncReport, SyncResponse, SyncStatusSnapshot};
use crate::domain::value_objects::SyncState;
use crate::presentation::views::{Notification, SyncControlLabel};
use crate::shared::config::ConfirmationPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

pub const OFFLINE_MESSAGE: &str = "Cannot sync while offline. Please check your connection.";
pub const NOTHING_PENDING_MESSAGE: &str = "No pending attendance to sync";
pub const ALREADY_SYNCING_MESSAGE: &str = "A sync is already in progress";
pub const RECONNECTED_MESSAGE: &str = "Connection restored! Auto-syncing attendance...";
pub const GENERIC_FAILURE_MESSAGE: &str = "Sync failed. Please try again.";

pub struct SyncEngineDeps {
    pub connectivity: Arc<dyn ConnectivityProvider>,
    pub queue: Arc<AttendanceQueueService>,
    pub gateway: Arc<dyn SyncGateway>,
    pub ui: Arc<dyn AttendanceUi>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

pub struct SyncEngine {
    connectivity: Arc<dyn ConnectivityProvider>,
    queue: Arc<AttendanceQueueService>,
    gateway: Arc<dyn SyncGateway>,
    ui: Arc<dyn AttendanceUi>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    confirmation: ConfirmationPolicy,
    dismiss_after: Option<Duration>,
    gate: Mutex<()>,
    status: RwLock<SyncStatusSnapshot>,
}

impl SyncEngine {
    pub fn new(
        deps: SyncEngineDeps,
        confirmation: ConfirmationPolicy,
        dismiss_after: Option<Duration>,
    ) -> Self {
        Self {
            connectivity: deps.connectivity,
            queue: deps.queue,
            gateway: deps.gateway,
            ui: deps.ui,
            notifier: deps.notifier,
            clock: deps.clock,
            confirmation,
            dismiss_after,
            gate: Mutex::new(()),
            status: RwLock::new(SyncStatusSnapshot::default()),
        }
    }

    pub async fn status(&self) -> SyncStatusSnapshot {
        self.status.read().await.clone()
    }

    /// 未同期レコードを一括送信し、成功時にローカルの同期フラグを立てる
    pub async fn sync_all(&self) -> Result<SyncReport, SyncError> {
        if !self.connectivity.is_online() {
            self.notify(Notification::warning(OFFLINE_MESSAGE));
            return Err(SyncError::Offline);
        }

        let Ok(_guard) = self.gate.try_lock() else {
            self.notify(Notification::info(ALREADY_SYNCING_MESSAGE));
            return Err(SyncError::AlreadySyncing);
        };

        let pending = match self.queue.pending_records().await {
            Ok(pending) => pending,
            Err(err) => {
                tracing::error!(target: "offline::sync", error = %err, "failed to read queue");
                self.notify(Notification::danger(GENERIC_FAILURE_MESSAGE));
                return Err(SyncError::Storage(err.to_string()));
            }
        };

        if pending.is_empty() {
            self.notify(Notification::info(NOTHING_PENDING_MESSAGE));
            return Err(SyncError::NothingPending);
        }

        self.begin().await;
        let batch = SyncBatch::new(pending);
        tracing::info!(target: "offline::sync", records = batch.len(), "sync started");

        let result = match self.gateway.push_attendance(&batch).await {
            Ok(response) if response.success => self.confirm(&batch, &response).await,
            Ok(response) => {
                let message = response.rejection_message();
                tracing::warn!(target: "offline::sync", error = %message, "sync rejected by server");
                self.notify(Notification::danger(format!("Sync failed: {}", message)));
                Err(SyncError::Rejected(message))
            }
            Err(err) => {
                tracing::error!(target: "offline::sync", error = %err, "sync request failed");
                self.notify(Notification::danger(GENERIC_FAILURE_MESSAGE));
                Err(SyncError::Transport(err.to_string()))
            }
        };

        self.ui.set_sync_control_enabled(true);
        if let Err(err) = self.queue.display_pending_count().await {
            tracing::warn!(target: "offline::sync", error = %err, "failed to refresh pending count");
        }

        self.finish(&result).await;
        result
    }

    /// 再接続時の自動同期。未同期レコードが無ければ何もしない。
    pub async fn auto_sync(&self) -> Option<Result<SyncReport, SyncError>> {
        match self.queue.pending_count().await {
            Ok(0) => None,
            Ok(pending) => {
                tracing::info!(target: "offline::sync", pending, "auto-sync after reconnect");
                self.notify(Notification::info(RECONNECTED_MESSAGE));
                Some(self.sync_all().await)
            }
            Err(err) => {
                tracing::warn!(target: "offline::sync", error = %err, "auto-sync skipped");
                None
            }
        }
    }

    async fn confirm(
        &self,
        batch: &SyncBatch,
        response: &SyncResponse,
    ) -> Result<SyncReport, SyncError> {
        let confirmed = match self.confirmation {
            ConfirmationPolicy::Snapshot => {
                let ids = batch.ids();
                self.queue.confirm_synced(Some(&ids)).await
            }
            ConfirmationPolicy::AllPending => self.queue.confirm_synced(None).await,
        };

        let confirmed = match confirmed {
            Ok(confirmed) => confirmed,
            Err(err) => {
                tracing::error!(
                    target: "offline::sync",
                    error = %err,
                    "server accepted batch but local queue could not be updated"
                );
                self.notify(Notification::danger(GENERIC_FAILURE_MESSAGE));
                return Err(SyncError::Storage(err.to_string()));
            }
        };

        if let Err(err) = self.queue.display_pending_count().await {
            tracing::warn!(target: "offline::sync", error = %err, "failed to refresh pending count");
        }
        if let Err(err) = self.queue.display_pending_list().await {
            tracing::warn!(target: "offline::sync", error = %err, "failed to refresh pending list");
        }

        let record_errors = response.record_errors();
        for message in &record_errors {
            tracing::warn!(target: "offline::sync", error = %message, "server reported record error");
        }

        let reported_synced = response.synced_count.unwrap_or(batch.len() as u64);
        self.notify(Notification::success(format!(
            "Successfully synced {} attendance records!",
            reported_synced
        )));

        tracing::info!(
            target: "offline::sync",
            sent = batch.len(),
            confirmed,
            reported = reported_synced,
            "sync completed"
        );

        Ok(SyncReport {
            sent: batch.len(),
            confirmed,
            reported_synced,
            record_errors,
        })
    }

    async fn begin(&self) {
        {
            let mut status = self.status.write().await;
            status.state = SyncState::Syncing;
            status.last_attempt_ms = Some(self.clock.now_millis());
        }
        self.ui.set_sync_control_enabled(false);
        self.ui.set_sync_control_label(&SyncControlLabel::Syncing);
    }

    async fn finish(&self, result: &Result<SyncReport, SyncError>) {
        let mut status = self.status.write().await;
        match result {
            Ok(report) => {
                status.state = SyncState::Succeeded;
                status.last_success_ms = Some(self.clock.now_millis());
                status.last_error = None;
                status.consecutive_failures = 0;
                status.last_synced_count = Some(report.reported_synced);
            }
            Err(err) => {
                status.state = SyncState::Failed;
                status.last_error = Some(err.to_string());
                status.consecutive_failures = status.consecutive_failures.saturating_add(1);
            }
        }
    }

    fn notify(&self, notification: Notification) {
        self.notifier
            .notify(notification.dismiss_after(self.dismiss_after));
    }
}
