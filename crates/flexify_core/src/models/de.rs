//! Lenient deserialisers for backend payloads.
//!
//! The backend is not consistent about id types (numeric primary keys on some
//! routes, strings on others) and leaves numeric set fields `null` on freshly
//! created rows.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

fn value_to_id<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}

pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_id(Value::deserialize(deserializer)?).map(Option::unwrap_or_default)
}

pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_id(Value::deserialize(deserializer)?)
}

pub(crate) fn serie_index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.filter(|serie| *serie >= 1).unwrap_or(1))
}

pub(crate) fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

pub(crate) fn weight_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(if raw.is_finite() && raw > 0.0 { raw } else { 0.0 })
}
