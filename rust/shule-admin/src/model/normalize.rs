//! Wire normalization, applied once at the transport boundary.
//!
//! The backend is loose about scalar shapes: money arrives as a JSON
//! number or a numeric string, dates as date-only or ISO-with-time,
//! flags as booleans or 0/1. Entity schemas parse these into one clean
//! representation here instead of re-interpreting fields ad hoc.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Money as `f64`. Accepts a number or a numeric string; null and the
/// empty string normalize to zero.
pub fn money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_money(deserializer)?.unwrap_or(0.0))
}

/// Money where absence is meaningful (e.g. a repair not yet costed).
pub fn opt_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("not a money amount: {:?}", s)))
        }
        other => Err(serde::de::Error::custom(format!(
            "not a money amount: {}",
            other
        ))),
    }
}

/// Dates arrive as `YYYY-MM-DD`, RFC 3339, or SQL datetime text.
/// Anything unparsable normalizes to `None` rather than failing the
/// whole row.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(parse_date(&s)),
        _ => Ok(None),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    // SQL datetime text: the date is the first ten characters.
    s.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Flags arrive as booleans or as 0/1 (sometimes stringly).
pub fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    })
}

/// Non-negative counts as numbers or numeric strings.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0) as u32,
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}
