//! Lenient argument coercion for tool argument records.
//!
//! Agents are loose with JSON types: card ids arrive as `"1494723142483"`,
//! counts as `5.0`, deck names as numbers. These helpers are plugged into the
//! argument records with `#[serde(deserialize_with = "...")]` so that every
//! operation coerces the same way.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

use review_connect::Ease;

fn value_to_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// `f` as an i64 when it is a whole number inside i64's range.
///
/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_number<E: serde::de::Error>(value: &Value) -> Result<i64, E> {
    value_to_number(value).ok_or_else(|| E::custom(format!("expected an integer, got {value}")))
}

fn coerce_string<E: serde::de::Error>(value: Value) -> Result<String, E> {
    let shown = value.to_string();
    value_to_string(value).ok_or_else(|| E::custom(format!("expected a string, got {shown}")))
}

/// An integer given as a JSON number with integral value or a numeric string.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    coerce_number(&Value::deserialize(deserializer)?)
}

/// A list of [`number`]s.
pub fn numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .iter()
        .map(coerce_number)
        .collect()
}

/// A non-negative [`number`], as used for result counts.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let n = number(deserializer)?;
    usize::try_from(n).map_err(|_| D::Error::custom(format!("count must not be negative, got {n}")))
}

/// A string given as a JSON string, number or boolean.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    coerce_string(Value::deserialize(deserializer)?)
}

/// A list of [`string`]s.
pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(coerce_string)
        .collect()
}

/// A review rating, coerced like [`number`] and checked to be 1 through 4.
pub fn ease<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Ease, D::Error> {
    let n = number(deserializer)?;
    Ease::try_from(n).map_err(|_| D::Error::custom("ease must be between 1 and 4"))
}
