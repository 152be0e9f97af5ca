// src/models/lenient.rs

//! Serde helpers for the remote API's loosely typed payloads.
//!
//! `api.php` returns numbers as JSON numbers in some endpoints and as strings
//! in others (`"12"`, `"450.00"`), and uses `null` or `""` for missing values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Non-negative count (marks). Missing, `null` and `""` become 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| de::Error::custom(format!("expected a non-negative integer, got {n}"))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse::<u32>()
                .map_err(|_| de::Error::custom(format!("expected a non-negative integer, got {s:?}")))
        }
        Some(other) => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Integer identifier sent either as a number or a numeric string.
pub fn int_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected an integer id, got {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected an integer id, got {s:?}"))),
        other => Err(de::Error::custom(format!("expected an integer id, got {other}"))),
    }
}

/// Money amount sent as a number or a decimal string.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(|_| de::Error::custom(format!("expected an amount, got {n}"))),
        Value::String(s) => Decimal::from_str(s.trim())
            .map_err(|_| de::Error::custom(format!("expected an amount, got {s:?}"))),
        other => Err(de::Error::custom(format!("expected an amount, got {other}"))),
    }
}

/// Optional free text. Empty strings collapse to `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
