//! Field deserializers that never fail.
//!
//! KYA SMS is loose about JSON types: ids and prices show up as either strings or
//! numbers, flags as booleans or `0`/`1`, and optional blocks as `null`. Each helper
//! buffers the field as a [`Value`] and coerces it, falling back to the documented
//! default instead of rejecting the whole response.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String or number as text; anything else is `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// String or number as text; anything else is `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_string(Value::deserialize(deserializer)?))
}

/// Number or numeric string; anything else is `0.0`.
pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_float(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Non-negative integer (or integral string); anything else is `0`.
pub fn unsigned<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_unsigned(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Non-negative integer (or integral string); anything else is `None`.
pub fn opt_unsigned<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_unsigned(&Value::deserialize(deserializer)?))
}

/// Signed integer (or integral string); anything else is `0`.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_integer(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// `true`/`false`, `1`/`0` or their string forms; anything else is `false`.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

/// Array of records; non-array values give an empty list and elements that are
/// not decodable objects are skipped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(record).collect(),
        _ => Vec::new(),
    })
}

/// Object of arbitrary values keyed by name; entries that do not decode are
/// dropped, the rest are kept.
pub fn map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(entries) => entries
            .into_iter()
            .filter_map(|(key, entry)| Some((key, serde_json::from_value(entry).ok()?)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Any decodable `T`, or `T::default()` when the value has the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(from_value_or_default(Value::deserialize(deserializer)?))
}

/// Decode a whole payload, degrading to `T::default()` on shape mismatch.
pub fn from_value_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    record(value).unwrap_or_default()
}

/// Records only come from JSON objects. Derived struct deserializers would
/// otherwise fill fields positionally from an array.
fn record<T>(value: Value) -> Option<T>
where
    T: DeserializeOwned,
{
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn coerce_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_unsigned(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|n| *n >= 0.0 && n.fract() == 0.0)
                .map(|n| n as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0)
                .map(|n| n as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
