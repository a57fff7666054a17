use serde::{Deserialize, Serialize};
use std::fmt;

/// 作成時刻（エポックミリ秒）を兼ねる出欠レコードID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AttendanceRecordId(i64);

impl AttendanceRecordId {
    pub fn new(value: i64) -> Result<Self, String> {
        if value <= 0 {
            return Err("Attendance record id must be positive".to_string());
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `now_ms` 時点でのレコードの経過ミリ秒
    pub fn age_millis(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.0)
    }
}

impl fmt::Display for AttendanceRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for AttendanceRecordId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AttendanceRecordId> for i64 {
    fn from(id: AttendanceRecordId) -> Self {
        id.0
    }
}
