//! Coercing field readers, so a loosely typed bag never fails to load.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Overrides;

/// Strings pass through, numbers and `true` are stringified.
/// `null`, `false`, `0`, arrays and objects read as absent.
pub(super) fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// Only JSON objects count as overrides.
pub(super) fn overrides<'de, D>(deserializer: D) -> Result<Option<Overrides>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(map),
        _ => None,
    })
}
