//! Value coercion to declared column types.
//!
//! Coercion never mutates the caller's dataset; it produces new values for
//! the declarative engine to build typed arrays from.

use crate::{Column, DataValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use flights_core::{ColumnType, FailureCase};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a timestamp string.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates
/// (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coerces a single value to the declared type.
///
/// Nulls pass through. Returns `None` when the value cannot be represented.
pub fn coerce_value(value: &DataValue, target: ColumnType) -> Option<DataValue> {
    match (target, value) {
        (_, DataValue::Null) => Some(DataValue::Null),

        (ColumnType::Int, DataValue::Int(i)) => Some(DataValue::Int(*i)),
        (ColumnType::Int, DataValue::Float(f)) => float_to_int(*f).map(DataValue::Int),
        (ColumnType::Int, DataValue::String(s)) => s.trim().parse().ok().map(DataValue::Int),

        (ColumnType::Float, DataValue::Float(f)) => Some(DataValue::Float(*f)),
        (ColumnType::Float, DataValue::Int(i)) => Some(DataValue::Float(*i as f64)),
        (ColumnType::Float, DataValue::String(s)) => s.trim().parse().ok().map(DataValue::Float),

        (ColumnType::String, DataValue::String(s)) => Some(DataValue::String(s.clone())),
        (ColumnType::String, other) => Some(DataValue::String(other.to_string())),

        (ColumnType::Timestamp, DataValue::Timestamp(t)) => Some(DataValue::Timestamp(*t)),
        (ColumnType::Timestamp, DataValue::Int(millis)) => {
            DateTime::from_timestamp_millis(*millis).map(DataValue::Timestamp)
        }
        (ColumnType::Timestamp, DataValue::String(s)) => parse_timestamp(s).map(DataValue::Timestamp),

        _ => None,
    }
}

/// Coerces every value of a column.
///
/// On failure returns each value that could not be coerced, by row.
pub fn coerce_column(column: &Column, target: ColumnType) -> Result<Vec<DataValue>, Vec<FailureCase>> {
    let mut coerced = Vec::with_capacity(column.len());
    let mut failures = Vec::new();

    for (row, value) in column.values().iter().enumerate() {
        match coerce_value(value, target) {
            Some(v) => coerced.push(v),
            None => failures.push(FailureCase::new(row, value.to_string())),
        }
    }

    if failures.is_empty() {
        Ok(coerced)
    } else {
        Err(failures)
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    let integral = f.is_finite() && f.fract() == 0.0;
    (integral && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}
