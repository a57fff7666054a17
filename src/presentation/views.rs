use crate::domain::entities::AttendanceRecord;
use crate::domain::value_objects::AttendanceRecordId;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const EMPTY_PENDING_MESSAGE: &str = "No pending attendance to sync";
pub const PENDING_MARKER: &str = "Pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub dismiss_after: Option<Duration>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            dismiss_after: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Danger, message)
    }

    pub fn dismiss_after(mut self, after: Option<Duration>) -> Self {
        self.dismiss_after = after;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStyle {
    Attention,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingBadgeView {
    pub count: usize,
    pub style: BadgeStyle,
}

impl PendingBadgeView {
    pub fn from_count(count: usize) -> Self {
        let style = if count > 0 {
            BadgeStyle::Attention
        } else {
            BadgeStyle::Neutral
        };
        Self { count, style }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "pending")]
pub enum SyncControlLabel {
    SyncNow(usize),
    AllSynced,
    Syncing,
}

impl SyncControlLabel {
    pub fn for_pending(count: usize) -> Self {
        if count > 0 {
            SyncControlLabel::SyncNow(count)
        } else {
            SyncControlLabel::AllSynced
        }
    }
}

impl fmt::Display for SyncControlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncControlLabel::SyncNow(count) => write!(f, "Sync Now ({})", count),
            SyncControlLabel::AllSynced => write!(f, "All Synced"),
            SyncControlLabel::Syncing => write!(f, "Syncing..."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingEntryView {
    pub record_id: AttendanceRecordId,
    pub member_name: String,
    pub member_phone: String,
    pub service_name: String,
    pub captured_at: String,
    pub status: &'static str,
}

impl PendingEntryView {
    pub fn from_record(record: &AttendanceRecord) -> Self {
        Self {
            record_id: record.id,
            member_name: record.member_name.clone(),
            member_phone: record.member_phone.clone(),
            service_name: record.service_name.clone(),
            captured_at: human_timestamp(record),
            status: PENDING_MARKER,
        }
    }
}

impl fmt::Display for PendingEntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} • {}) {} [{}]",
            self.member_name, self.member_phone, self.service_name, self.captured_at, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PendingListView {
    Empty { message: &'static str },
    Entries { entries: Vec<PendingEntryView> },
}

impl PendingListView {
    /// 未同期レコードのみを挿入順で並べる
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let entries: Vec<PendingEntryView> = records
            .iter()
            .filter(|record| record.is_pending())
            .map(PendingEntryView::from_record)
            .collect();

        if entries.is_empty() {
            PendingListView::Empty {
                message: EMPTY_PENDING_MESSAGE,
            }
        } else {
            PendingListView::Entries { entries }
        }
    }

    pub fn entries(&self) -> &[PendingEntryView] {
        match self {
            PendingListView::Empty { .. } => &[],
            PendingListView::Entries { entries } => entries,
        }
    }
}

fn human_timestamp(record: &AttendanceRecord) -> String {
    match record.captured_at() {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => record.timestamp.clone(),
    }
}
