pub mod views;

pub use views::{
    BadgeStyle, Notification, NotificationLevel, PendingBadgeView, PendingEntryView,
    PendingListView, SyncControlLabel,
};
