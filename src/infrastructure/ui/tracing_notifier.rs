use crate::application::ports::{AttendanceUi, Notifier};
use crate::domain::value_objects::ConnectionStatus;
use crate::presentation::views::{
    Notification, NotificationLevel, PendingBadgeView, PendingListView, SyncControlLabel,
};

/// 通知と画面更新をログへ流す。ヘッドレス実行用。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info | NotificationLevel::Success => tracing::info!(
                target: "offline::notify",
                level = notification.level.as_str(),
                "{}",
                notification.message
            ),
            NotificationLevel::Warning => tracing::warn!(
                target: "offline::notify",
                "{}",
                notification.message
            ),
            NotificationLevel::Danger => tracing::error!(
                target: "offline::notify",
                "{}",
                notification.message
            ),
        }
    }
}

impl AttendanceUi for TracingNotifier {
    fn show_connection_status(&self, status: ConnectionStatus) {
        tracing::debug!(target: "offline::ui", status = status.label(), "connection status");
    }

    fn set_sync_control_enabled(&self, enabled: bool) {
        tracing::debug!(target: "offline::ui", enabled, "sync control");
    }

    fn set_sync_control_label(&self, label: &SyncControlLabel) {
        tracing::debug!(target: "offline::ui", label = %label, "sync control label");
    }

    fn show_pending_count(&self, badge: &PendingBadgeView) {
        tracing::debug!(target: "offline::ui", pending = badge.count, "pending count");
    }

    fn render_pending_list(&self, list: &PendingListView) {
        tracing::debug!(
            target: "offline::ui",
            entries = list.entries().len(),
            "pending list rendered"
        );
    }
}
