use crate::application::ports::KeyValueStore;
use crate::shared::error::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 保存済みJSONを読み込む。キーが無い場合や壊れている場合は既定値を返す。
pub(crate) async fn load_or_default<T>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(
                target: "offline::storage",
                key,
                error = %err,
                "stored value is not valid JSON for this key; treating as empty"
            );
            Ok(T::default())
        }
    }
}

pub(crate) async fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}
