use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::trace;

/// Field deserializer for optional upstream fields: a value of the wrong
/// shape reads as absent instead of failing the whole record.
///
/// Use together with `#[serde(default)]` so missing fields are `None` too.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(&value) {
        Ok(x) => Ok(Some(x)),
        Err(e) => {
            trace!("Ignoring field value {}: {}", value, e);
            Ok(None)
        }
    }
}
