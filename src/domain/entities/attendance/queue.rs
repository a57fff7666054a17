use super::record::AttendanceRecord;
use crate::domain::value_objects::AttendanceRecordId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 挿入順を保持する出欠キュー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceQueue {
    records: Vec<AttendanceRecord>,
}

impl AttendanceQueue {
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AttendanceRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: AttendanceRecord) {
        self.records.push(record);
    }

    pub fn pending(&self) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.is_pending())
            .cloned()
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_pending()).count()
    }

    /// 次に採番するID。同一ミリ秒内の連続登録でも重複しない。
    pub fn next_record_id(&self, now_ms: i64) -> i64 {
        let last = self
            .records
            .iter()
            .map(|record| record.id.value())
            .max()
            .unwrap_or(0);
        now_ms.max(last.saturating_add(1))
    }

    pub fn mark_synced(&mut self, ids: &HashSet<AttendanceRecordId>) -> usize {
        let mut marked = 0;
        for record in self.records.iter_mut() {
            if record.is_pending() && ids.contains(&record.id) {
                record.synced = true;
                marked += 1;
            }
        }
        marked
    }

    pub fn mark_all_synced(&mut self) -> usize {
        let mut marked = 0;
        for record in self.records.iter_mut().filter(|record| record.is_pending()) {
            record.synced = true;
            marked += 1;
        }
        marked
    }

    /// 同期済みかつ `retention_ms` より古いレコードを取り除き、削除件数を返す
    pub fn prune_synced(&mut self, now_ms: i64, retention_ms: i64) -> usize {
        let before = self.records.len();
        self.records
            .retain(|record| !(record.synced && record.id.age_millis(now_ms) > retention_ms));
        before - self.records.len()
    }
}
