use super::stored_json;
use crate::application::ports::{AttendanceUi, Clock, KeyValueStore};
use crate::domain::entities::{AttendanceInput, AttendanceQueue, AttendanceRecord};
use crate::domain::value_objects::AttendanceRecordId;
use crate::presentation::views::{PendingBadgeView, PendingListView, SyncControlLabel};
use crate::shared::error::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_RETENTION_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// 未同期の出欠レコードを保持するローカルキュー
///
/// キュー全体を1つのキーに保存し、変更のたびに全体を書き戻す。
/// 読み込み・変更・保存の一連の操作は `write_lock` で直列化する。
pub struct AttendanceQueueService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ui: Arc<dyn AttendanceUi>,
    queue_key: String,
    retention_ms: i64,
    write_lock: Mutex<()>,
}

impl AttendanceQueueService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        ui: Arc<dyn AttendanceUi>,
        queue_key: impl Into<String>,
        retention_ms: i64,
    ) -> Self {
        Self {
            store,
            clock,
            ui,
            queue_key: queue_key.into(),
            retention_ms,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get_queue(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(self.load().await?.into_records())
    }

    pub async fn save_queue(&self, records: &[AttendanceRecord]) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        stored_json::save(self.store.as_ref(), &self.queue_key, records).await
    }

    pub async fn mark_attendance(&self, input: AttendanceInput) -> Result<AttendanceRecord, AppError> {
        let record = {
            let _guard = self.write_lock.lock().await;
            let mut queue = self.load().await?;

            let now = self.clock.now();
            let id = AttendanceRecordId::new(queue.next_record_id(now.timestamp_millis()))
                .map_err(AppError::ValidationError)?;
            let record = AttendanceRecord::new(id, input, now);

            queue.push(record.clone());
            self.persist(&queue).await?;
            record
        };

        tracing::info!(
            target: "offline::queue",
            record_id = %record.id,
            member_id = record.member_id,
            service_id = record.service_id,
            "attendance queued"
        );

        self.display_pending_count().await?;
        Ok(record)
    }

    pub async fn pending_records(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(self.load().await?.pending())
    }

    pub async fn pending_count(&self) -> Result<usize, AppError> {
        Ok(self.load().await?.pending_count())
    }

    pub async fn display_pending_count(&self) -> Result<usize, AppError> {
        let count = self.pending_count().await?;
        self.ui.show_pending_count(&PendingBadgeView::from_count(count));
        self.ui
            .set_sync_control_label(&SyncControlLabel::for_pending(count));
        Ok(count)
    }

    pub async fn display_pending_list(&self) -> Result<PendingListView, AppError> {
        let queue = self.load().await?;
        let view = PendingListView::from_records(queue.records());
        self.ui.render_pending_list(&view);
        Ok(view)
    }

    /// 保持期間を過ぎた同期済みレコードを削除する。未同期レコードは残す。
    pub async fn clear_old_records(&self) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut queue = self.load().await?;
        let removed = queue.prune_synced(self.clock.now_millis(), self.retention_ms);
        self.persist(&queue).await?;

        if removed > 0 {
            tracing::info!(
                target: "offline::queue",
                removed,
                remaining = queue.len(),
                "pruned synced attendance records"
            );
        }
        Ok(removed)
    }

    /// `ids` が `None` の場合は現在未同期の全レコードを同期済みにする
    pub async fn confirm_synced(
        &self,
        ids: Option<&HashSet<AttendanceRecordId>>,
    ) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut queue = self.load().await?;
        let marked = match ids {
            Some(ids) => queue.mark_synced(ids),
            None => queue.mark_all_synced(),
        };
        self.persist(&queue).await?;
        Ok(marked)
    }

    async fn load(&self) -> Result<AttendanceQueue, AppError> {
        stored_json::load_or_default(self.store.as_ref(), &self.queue_key).await
    }

    async fn persist(&self, queue: &AttendanceQueue) -> Result<(), AppError> {
        stored_json::save(self.store.as_ref(), &self.queue_key, queue).await
    }
}
