use serde::{Deserialize, Serialize};

pub const DEFAULT_QUEUE_KEY: &str = "offline_attendance_queue";
pub const DEFAULT_MEMBERS_KEY: &str = "cached_members";
pub const DEFAULT_SERVICES_KEY: &str = "cached_services";
pub const DEFAULT_SYNC_PATH: &str = "/admin/sync-offline-attendance/";

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// 同期成功時にどのレコードを同期済みにするか
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    /// 送信したバッチに含まれるレコードのみ
    #[default]
    Snapshot,
    /// 応答時点で未同期の全レコード
    AllPending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub connectivity: ConnectivityConfig,
    pub retention: RetentionConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
    pub max_connections: u32,
    pub queue_key: String,
    pub members_key: String,
    pub services_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub server_url: String,
    pub sync_path: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub confirmation: ConfirmationPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub probe_url: Option<String>,
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    pub synced_retention_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub dismiss_after_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                database_url: "sqlite:data/rollcall_offline.db?mode=rwc".to_string(),
                max_connections: 1,
                queue_key: DEFAULT_QUEUE_KEY.to_string(),
                members_key: DEFAULT_MEMBERS_KEY.to_string(),
                services_key: DEFAULT_SERVICES_KEY.to_string(),
            },
            sync: SyncConfig {
                server_url: "http://localhost:8000".to_string(),
                sync_path: DEFAULT_SYNC_PATH.to_string(),
                csrf_token: None,
                request_timeout_secs: 30,
                confirmation: ConfirmationPolicy::Snapshot,
            },
            connectivity: ConnectivityConfig {
                poll_interval_secs: 5,
                probe_url: None,
                probe_timeout_secs: 3,
            },
            retention: RetentionConfig {
                synced_retention_days: 7,
            },
            notifications: NotificationConfig {
                dismiss_after_secs: 5,
            },
        }
    }
}

impl SyncConfig {
    /// サーバーURLと同期パスを結合したエンドポイント
    pub fn endpoint(&self) -> String {
        let base = self.server_url.trim_end_matches('/');
        let path = self.sync_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

impl RetentionConfig {
    pub fn retention_millis(&self) -> i64 {
        let days = i64::try_from(self.synced_retention_days).unwrap_or(i64::MAX / 86_400_000);
        days.saturating_mul(24 * 60 * 60 * 1000)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("ROLLCALL_STORAGE_BACKEND") {
            if let Some(backend) = parse_backend(&v) {
                cfg.storage.backend = backend;
            }
        }
        if let Ok(v) = std::env::var("ROLLCALL_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.storage.database_url = v.trim().to_string();
            }
        }

        if let Ok(v) = std::env::var("ROLLCALL_SERVER_URL") {
            if !v.trim().is_empty() {
                cfg.sync.server_url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("ROLLCALL_SYNC_PATH") {
            if !v.trim().is_empty() {
                cfg.sync.sync_path = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("ROLLCALL_CSRF_TOKEN") {
            cfg.sync.csrf_token = Some(v.trim().to_string()).filter(|token| !token.is_empty());
        }
        if let Some(value) = env_u64("ROLLCALL_SYNC_TIMEOUT_SECS") {
            cfg.sync.request_timeout_secs = value.max(1);
        }
        if let Ok(v) = std::env::var("ROLLCALL_CONFIRMATION") {
            if let Some(policy) = parse_confirmation(&v) {
                cfg.sync.confirmation = policy;
            }
        }

        if let Some(value) = env_u64("ROLLCALL_POLL_INTERVAL_SECS") {
            cfg.connectivity.poll_interval_secs = value.max(1);
        }
        if let Ok(v) = std::env::var("ROLLCALL_PROBE_URL") {
            cfg.connectivity.probe_url = Some(v.trim().to_string()).filter(|url| !url.is_empty());
        }
        if let Some(value) = env_u64("ROLLCALL_PROBE_TIMEOUT_SECS") {
            cfg.connectivity.probe_timeout_secs = value.max(1);
        }

        if let Some(value) = env_u64("ROLLCALL_RETENTION_DAYS") {
            cfg.retention.synced_retention_days = value;
        }
        if let Some(value) = env_u64("ROLLCALL_NOTIFICATION_DISMISS_SECS") {
            cfg.notifications.dismiss_after_secs = value;
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.backend == StorageBackend::Sqlite {
            if self.storage.database_url.trim().is_empty() {
                return Err("Storage database_url must not be empty".to_string());
            }
            if self.storage.max_connections == 0 {
                return Err("Storage max_connections must be greater than 0".to_string());
            }
        }
        let keys = [
            &self.storage.queue_key,
            &self.storage.members_key,
            &self.storage.services_key,
        ];
        if keys.iter().any(|key| key.trim().is_empty()) {
            return Err("Storage keys must not be empty".to_string());
        }
        if keys[0] == keys[1] || keys[0] == keys[2] || keys[1] == keys[2] {
            return Err("Storage keys must be distinct".to_string());
        }
        if !(self.sync.server_url.starts_with("http://")
            || self.sync.server_url.starts_with("https://"))
        {
            return Err("Sync server_url must be an http(s) URL".to_string());
        }
        if self.sync.request_timeout_secs == 0 {
            return Err("Sync request_timeout_secs must be greater than 0".to_string());
        }
        if self.connectivity.poll_interval_secs == 0 {
            return Err("Connectivity poll_interval_secs must be greater than 0".to_string());
        }
        if self.connectivity.probe_url.is_some() && self.connectivity.probe_timeout_secs == 0 {
            return Err("Connectivity probe_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| parse_u64(&v))
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_backend(value: &str) -> Option<StorageBackend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sqlite" => Some(StorageBackend::Sqlite),
        "memory" => Some(StorageBackend::Memory),
        _ => None,
    }
}

fn parse_confirmation(value: &str) -> Option<ConfirmationPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "snapshot" => Some(ConfirmationPolicy::Snapshot),
        "all_pending" | "all-pending" | "all" => Some(ConfirmationPolicy::AllPending),
        _ => None,
    }
}
