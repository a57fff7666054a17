use crate::domain::value_objects::ConnectionStatus;
use crate::presentation::views::{
    Notification, PendingBadgeView, PendingListView, SyncControlLabel,
};

/// 画面側の描画先。接続されていない場合は no-op 実装を使う。
pub trait AttendanceUi: Send + Sync {
    fn show_connection_status(&self, status: ConnectionStatus);
    fn set_sync_control_enabled(&self, enabled: bool);
    fn set_sync_control_label(&self, label: &SyncControlLabel);
    fn show_pending_count(&self, badge: &PendingBadgeView);
    fn render_pending_list(&self, list: &PendingListView);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
