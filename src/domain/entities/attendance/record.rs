use crate::domain::entities::reference::{CachedMember, CachedService};
use crate::domain::value_objects::AttendanceRecordId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 出欠登録時に渡すメンバーとサービスのスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceInput {
    pub member_id: i64,
    pub member_name: String,
    pub member_phone: String,
    pub service_id: i64,
    pub service_name: String,
}

impl AttendanceInput {
    pub fn from_cached(member: &CachedMember, service: &CachedService) -> Result<Self, String> {
        let member_id = member
            .id
            .ok_or_else(|| format!("Cached member `{}` has no id", member.name))?;
        let service_id = service
            .id
            .ok_or_else(|| format!("Cached service `{}` has no id", service.name))?;

        Ok(Self {
            member_id,
            member_name: member.name.clone(),
            member_phone: member.phone.clone(),
            service_id,
            service_name: service.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub member_id: i64,
    pub member_name: String,
    pub member_phone: String,
    pub service_id: i64,
    pub service_name: String,
    pub timestamp: String,
    pub synced: bool,
}

impl AttendanceRecord {
    pub fn new(id: AttendanceRecordId, input: AttendanceInput, captured_at: DateTime<Utc>) -> Self {
        Self {
            id,
            member_id: input.member_id,
            member_name: input.member_name,
            member_phone: input.member_phone,
            service_id: input.service_id,
            service_name: input.service_name,
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            synced: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.synced
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|value| value.with_timezone(&Utc))
    }
}
