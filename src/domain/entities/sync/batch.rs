use crate::domain::entities::attendance::AttendanceRecord;
use crate::domain::value_objects::AttendanceRecordId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 同期エンドポイントへ送るペイロード `{"attendance": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncBatch {
    pub attendance: Vec<AttendanceRecord>,
}

impl SyncBatch {
    pub fn new(attendance: Vec<AttendanceRecord>) -> Self {
        Self { attendance }
    }

    pub fn len(&self) -> usize {
        self.attendance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendance.is_empty()
    }

    pub fn ids(&self) -> HashSet<AttendanceRecordId> {
        self.attendance.iter().map(|record| record.id).collect()
    }
}
