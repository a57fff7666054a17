use super::attendance_queue_service::{AttendanceQueueService, DEFAULT_RETENTION_MS};
use super::connectivity_monitor::{ConnectivityMonitor, DEFAULT_POLL_INTERVAL, MonitorHandle};
use super::reference_cache_service::ReferenceCacheService;
use super::sync_engine::{SyncEngine, SyncEngineDeps};
use crate::application::ports::{
    AttendanceUi, Clock, ConnectivityProvider, KeyValueStore, Notifier, SyncGateway,
};
use crate::domain::entities::{
    AttendanceInput, AttendanceRecord, CachedMember, CachedService, SyncError, SyncReport,
    SyncStatusSnapshot,
};
use crate::domain::value_objects::ConnectionStatus;
use crate::presentation::views::PendingListView;
use crate::shared::config::{
    AppConfig, ConfirmationPolicy, DEFAULT_MEMBERS_KEY, DEFAULT_QUEUE_KEY, DEFAULT_SERVICES_KEY,
};
use crate::shared::error::AppError;
use std::sync::Arc;
use std::time::Duration;

pub struct OfflineAttendanceDeps {
    pub store: Arc<dyn KeyValueStore>,
    pub connectivity: Arc<dyn ConnectivityProvider>,
    pub gateway: Arc<dyn SyncGateway>,
    pub ui: Arc<dyn AttendanceUi>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone)]
pub struct OfflineAttendanceOptions {
    pub queue_key: String,
    pub members_key: String,
    pub services_key: String,
    pub retention_ms: i64,
    pub poll_interval: Duration,
    pub confirmation: ConfirmationPolicy,
    pub dismiss_after: Option<Duration>,
}

impl Default for OfflineAttendanceOptions {
    fn default() -> Self {
        Self {
            queue_key: DEFAULT_QUEUE_KEY.to_string(),
            members_key: DEFAULT_MEMBERS_KEY.to_string(),
            services_key: DEFAULT_SERVICES_KEY.to_string(),
            retention_ms: DEFAULT_RETENTION_MS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirmation: ConfirmationPolicy::Snapshot,
            dismiss_after: Some(Duration::from_secs(5)),
        }
    }
}

impl OfflineAttendanceOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        let dismiss_after = match config.notifications.dismiss_after_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self {
            queue_key: config.storage.queue_key.clone(),
            members_key: config.storage.members_key.clone(),
            services_key: config.storage.services_key.clone(),
            retention_ms: config.retention.retention_millis(),
            poll_interval: Duration::from_secs(config.connectivity.poll_interval_secs.max(1)),
            confirmation: config.sync.confirmation,
            dismiss_after,
        }
    }
}

/// オフライン出欠登録のエントリポイント
///
/// キャッシュ・キュー・同期・接続監視をまとめ、ホストアプリケーションが
/// 依存を注入して1インスタンスを生成する。
pub struct OfflineAttendance {
    cache: Arc<ReferenceCacheService>,
    queue: Arc<AttendanceQueueService>,
    engine: Arc<SyncEngine>,
    monitor: Arc<ConnectivityMonitor>,
}

impl OfflineAttendance {
    pub fn new(deps: OfflineAttendanceDeps, options: OfflineAttendanceOptions) -> Self {
        let cache = Arc::new(ReferenceCacheService::new(
            Arc::clone(&deps.store),
            options.members_key,
            options.services_key,
        ));
        let queue = Arc::new(AttendanceQueueService::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.clock),
            Arc::clone(&deps.ui),
            options.queue_key,
            options.retention_ms,
        ));
        let engine = Arc::new(SyncEngine::new(
            SyncEngineDeps {
                connectivity: Arc::clone(&deps.connectivity),
                queue: Arc::clone(&queue),
                gateway: deps.gateway,
                ui: Arc::clone(&deps.ui),
                notifier: deps.notifier,
                clock: deps.clock,
            },
            options.confirmation,
            options.dismiss_after,
        ));
        let monitor = Arc::new(ConnectivityMonitor::new(
            deps.connectivity,
            deps.ui,
            Arc::clone(&engine),
            options.poll_interval,
        ));

        Self {
            cache,
            queue,
            engine,
            monitor,
        }
    }

    /// 初期表示を行い、接続監視タスクを起動する
    pub async fn start(&self) -> Result<MonitorHandle, AppError> {
        let status = self.monitor.refresh_status();
        let pending = self.queue.display_pending_count().await?;
        tracing::info!(
            target: "offline::queue",
            status = status.label(),
            pending,
            "offline attendance started"
        );
        Ok(self.monitor.spawn())
    }

    pub fn cache(&self) -> &Arc<ReferenceCacheService> {
        &self.cache
    }

    pub fn queue(&self) -> &Arc<AttendanceQueueService> {
        &self.queue
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    pub fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.monitor
    }

    pub fn refresh_status(&self) -> ConnectionStatus {
        self.monitor.refresh_status()
    }

    pub async fn cache_members(&self, members: &[CachedMember]) -> Result<(), AppError> {
        self.cache.cache_members(members).await
    }

    pub async fn cache_services(&self, services: &[CachedService]) -> Result<(), AppError> {
        self.cache.cache_services(services).await
    }

    pub async fn get_cached_members(&self) -> Result<Vec<CachedMember>, AppError> {
        self.cache.get_cached_members().await
    }

    pub async fn get_cached_services(&self) -> Result<Vec<CachedService>, AppError> {
        self.cache.get_cached_services().await
    }

    pub async fn search_members(&self, query: &str) -> Result<Vec<CachedMember>, AppError> {
        self.cache.search_members(query).await
    }

    pub async fn mark_attendance(&self, input: AttendanceInput) -> Result<AttendanceRecord, AppError> {
        self.queue.mark_attendance(input).await
    }

    /// キャッシュ済みのメンバーとサービスから出欠を登録する
    pub async fn mark_attendance_for(
        &self,
        member_id: i64,
        service_id: i64,
    ) -> Result<AttendanceRecord, AppError> {
        let member = self
            .cache
            .find_member(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} is not cached", member_id)))?;
        let service = self
            .cache
            .find_service(service_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} is not cached", service_id)))?;

        let input =
            AttendanceInput::from_cached(&member, &service).map_err(AppError::InvalidInput)?;
        self.queue.mark_attendance(input).await
    }

    pub async fn get_queue(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        self.queue.get_queue().await
    }

    pub async fn save_queue(&self, records: &[AttendanceRecord]) -> Result<(), AppError> {
        self.queue.save_queue(records).await
    }

    pub async fn pending_count(&self) -> Result<usize, AppError> {
        self.queue.pending_count().await
    }

    pub async fn display_pending_count(&self) -> Result<usize, AppError> {
        self.queue.display_pending_count().await
    }

    pub async fn display_pending_list(&self) -> Result<PendingListView, AppError> {
        self.queue.display_pending_list().await
    }

    pub async fn clear_old_records(&self) -> Result<usize, AppError> {
        self.queue.clear_old_records().await
    }

    pub async fn sync_all(&self) -> Result<SyncReport, SyncError> {
        self.engine.sync_all().await
    }

    pub async fn auto_sync(&self) -> Option<Result<SyncReport, SyncError>> {
        self.engine.auto_sync().await
    }

    pub async fn sync_status(&self) -> SyncStatusSnapshot {
        self.engine.status().await
    }
}
