use crate::application::ports::{AttendanceUi, Notifier};
use crate::domain::value_objects::ConnectionStatus;
use crate::presentation::views::{
    Notification, PendingBadgeView, PendingListView, SyncControlLabel,
};

/// 画面が接続されていないときの描画先
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAttendanceUi;

impl AttendanceUi for NoopAttendanceUi {
    fn show_connection_status(&self, _status: ConnectionStatus) {}
    fn set_sync_control_enabled(&self, _enabled: bool) {}
    fn set_sync_control_label(&self, _label: &SyncControlLabel) {}
    fn show_pending_count(&self, _badge: &PendingBadgeView) {}
    fn render_pending_list(&self, _list: &PendingListView) {}
}

impl Notifier for NoopAttendanceUi {
    fn notify(&self, _notification: Notification) {}
}
