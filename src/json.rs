//! Tolerant field decoders for externally controlled JSON
//!
//! Both services are free to change their payloads. Fields decoded with these
//! helpers read as absent when their JSON type is unexpected instead of
//! failing the whole document.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize an optional field, reading values of the wrong type as absent
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Deserialize a numeric score given either as a JSON number or a numeric string
pub(crate) fn score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(score_of(&value))
}

/// Read a finite number out of a JSON value
pub(crate) fn score_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
