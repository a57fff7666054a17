use super::null_as_empty;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// サーバーから取得したメンバー情報のスナップショット
///
/// `name` と `phone` 以外のフィールドは解釈せず、そのまま保持する。
/// `name` / `phone` が `null` の場合は空文字列として扱う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CachedMember {
    pub fn new(id: Option<i64>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            extra: Map::new(),
        }
    }

    /// 名前は大文字小文字を無視、電話番号はそのまま部分一致で判定
    pub fn matches(&self, query: &str, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query) || self.phone.contains(query)
    }
}
