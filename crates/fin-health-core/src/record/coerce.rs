//! The one place raw input becomes a float.
//!
//! Text goes through `rust_decimal` so that thousand separators, accounting
//! parentheses and scientific notation parse exactly before conversion.
//! Blank input means "not supplied" and yields the default without a
//! warning.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::FinHealthError;
use crate::FinHealthResult;

/// Parse a single numeric field from text.
pub fn coerce_number(field: &str, raw: &str) -> FinHealthResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    parse_decimal(trimmed)
        .and_then(|d| d.to_f64())
        .filter(|v| v.is_finite())
        .ok_or_else(|| FinHealthError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Parse the three-year series from comma-separated text.
///
/// Empty segments are skipped; anything other than exactly three numbers is
/// malformed.
pub fn parse_series(field: &str, raw: &str) -> FinHealthResult<[f64; 3]> {
    let mut values = Vec::with_capacity(3);
    for part in raw.split([',', ';']).map(str::trim).filter(|p| !p.is_empty()) {
        let v = coerce_number(field, part).map_err(|_| FinHealthError::MalformedSeries {
            field: field.to_string(),
            reason: format!("'{part}' is not a number"),
        })?;
        values.push(v);
    }
    to_triplet(field, &values)
}

/// Coerce a JSON scalar to a float. `null` is the default.
pub fn json_number(field: &str, value: &Value) -> FinHealthResult<f64> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FinHealthError::NonFiniteValue {
                field: field.to_string(),
            }),
        Value::String(s) => coerce_number(field, s),
        other => Err(FinHealthError::InvalidNumber {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Coerce a JSON array (or comma-separated string) to the series.
pub fn json_series(field: &str, value: &Value) -> FinHealthResult<[f64; 3]> {
    match value {
        Value::Array(items) => {
            let values = items
                .iter()
                .map(|item| json_number(field, item))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| FinHealthError::MalformedSeries {
                    field: field.to_string(),
                    reason: e.to_string(),
                })?;
            to_triplet(field, &values)
        }
        Value::String(s) => parse_series(field, s),
        other => Err(FinHealthError::MalformedSeries {
            field: field.to_string(),
            reason: format!("expected a list of three numbers, got {other}"),
        }),
    }
}

fn to_triplet(field: &str, values: &[f64]) -> FinHealthResult<[f64; 3]> {
    <[f64; 3]>::try_from(values).map_err(|_| FinHealthError::MalformedSeries {
        field: field.to_string(),
        reason: format!("expected exactly three values, got {}", values.len()),
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let (negative, body) = match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, text),
    };
    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    let d = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;
    Some(if negative { -d } else { d })
}
