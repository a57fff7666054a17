pub mod member;
pub mod service;

pub use member::CachedMember;
pub use service::CachedService;

use serde::{Deserialize, Deserializer};

/// `null` を空文字列として読み込む
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
