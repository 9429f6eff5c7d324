//! JSON dataset loading.
//!
//! Accepts the shapes produced by document-store exports: an array of records,
//! newline-delimited records, or an object mapping column names to value
//! arrays. Extended JSON wrappers (`$date`, `$oid`, `$numberLong`, ...) are
//! unwrapped into plain values.

use crate::coerce::parse_timestamp;
use crate::{DataSet, DataValue, DatasetError};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

impl DataSet {
    /// Loads a dataset from a JSON document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flights_validator::{DataSet, DataValue};
    ///
    /// let dataset = DataSet::from_json_str(r#"[
    ///     {"flight_id": 1, "origin": "JFK"},
    ///     {"flight_id": 2, "origin": null}
    /// ]"#).unwrap();
    ///
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.column("origin").unwrap().values()[1], DataValue::Null);
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self, DatasetError> {
        match serde_json::from_str(content)? {
            Value::Array(records) => {
                let mut dataset = DataSet::empty();
                for (row, record) in records.into_iter().enumerate() {
                    dataset.push_json_record(row, record)?;
                }
                Ok(dataset)
            }
            Value::Object(columns) => Self::from_json_columns(columns),
            other => Err(DatasetError::InvalidShape(format!(
                "expected an array of records or an object of columns, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Loads a dataset from newline-delimited JSON records.
    ///
    /// Blank lines are skipped.
    pub fn from_json_lines(content: &str) -> Result<Self, DatasetError> {
        let mut dataset = DataSet::empty();
        let lines = content.lines().filter(|line| !line.trim().is_empty());
        for (row, line) in lines.enumerate() {
            let record: Value = serde_json::from_str(line)?;
            dataset.push_json_record(row, record)?;
        }
        Ok(dataset)
    }

    /// Loads a dataset from a file, choosing the reader by extension.
    ///
    /// * `.json` → [`DataSet::from_json_str`]
    /// * `.jsonl`, `.ndjson` → [`DataSet::from_json_lines`]
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or(DatasetError::InvalidExtension)?
            .to_lowercase();

        let content = match extension.as_str() {
            "json" | "jsonl" | "ndjson" => std::fs::read_to_string(path)?,
            other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
        };

        let dataset = if extension == "json" {
            Self::from_json_str(&content)?
        } else {
            Self::from_json_lines(&content)?
        };

        debug!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.num_columns(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    fn from_json_columns(columns: Map<String, Value>) -> Result<Self, DatasetError> {
        let mut dataset = DataSet::empty();
        for (name, values) in columns {
            let Value::Array(values) = values else {
                return Err(DatasetError::InvalidShape(format!(
                    "column '{}' is not an array",
                    name
                )));
            };
            let values = values
                .iter()
                .enumerate()
                .map(|(row, value)| {
                    json_to_value(value).map_err(|reason| DatasetError::invalid_value(row, &name, reason))
                })
                .collect::<Result<Vec<_>, _>>()?;
            dataset.add_column(name, values)?;
        }
        Ok(dataset)
    }

    fn push_json_record(&mut self, row: usize, record: Value) -> Result<(), DatasetError> {
        let Value::Object(fields) = record else {
            return Err(DatasetError::NotARecord { row });
        };
        let mut values = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            let value =
                json_to_value(&value).map_err(|reason| DatasetError::invalid_value(row, &name, reason))?;
            values.push((name, value));
        }
        self.push_record(values);
        Ok(())
    }
}

/// Converts a JSON value into a dataset value.
///
/// Returns the reason as a string on failure so the caller can attach the
/// row and column.
fn json_to_value(value: &Value) -> Result<DataValue, String> {
    match value {
        Value::Null => Ok(DataValue::Null),
        Value::Bool(b) => Ok(DataValue::Bool(*b)),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(DataValue::Int(i)),
            (None, Some(f)) => Ok(DataValue::Float(f)),
            (None, None) => Err(format!("number {} is not representable", n)),
        },
        Value::String(s) => Ok(DataValue::String(s.clone())),
        Value::Object(map) if map.len() == 1 => {
            let Some((key, inner)) = map.iter().next() else {
                return Err("empty object".to_string());
            };
            extended_json(key, inner)
        }
        other => Err(format!("unsupported value: {}", json_kind(other))),
    }
}

fn extended_json(key: &str, inner: &Value) -> Result<DataValue, String> {
    match (key, inner) {
        ("$date", _) => extended_date(inner).map(DataValue::Timestamp),
        ("$oid", Value::String(id)) => Ok(DataValue::String(id.clone())),
        ("$numberLong" | "$numberInt", Value::String(s)) => s
            .parse::<i64>()
            .map(DataValue::Int)
            .map_err(|e| format!("invalid {} '{}': {}", key, s, e)),
        ("$numberDouble" | "$numberDecimal", Value::String(s)) => s
            .parse::<f64>()
            .map(DataValue::Float)
            .map_err(|e| format!("invalid {} '{}': {}", key, s, e)),
        _ => Err(format!("unsupported value: object with key '{}'", key)),
    }
}

fn extended_date(inner: &Value) -> Result<DateTime<chrono::Utc>, String> {
    let millis = match inner {
        Value::String(s) => {
            return parse_timestamp(s).ok_or_else(|| format!("invalid date '{}'", s));
        }
        Value::Number(n) => n.as_i64(),
        Value::Object(map) => map
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok()),
        _ => None,
    };
    millis
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| format!("invalid date {}", inner))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dtype;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_records_keep_field_order() {
        let dataset = DataSet::from_json_str(
            r#"[{"flight_id": 1, "origin": "JFK", "duration": 5.5},
                {"origin": "LAX", "flight_id": 2, "duration": 3}]"#,
        )
        .unwrap();

        assert_eq!(
            dataset.column_names().collect::<Vec<_>>(),
            vec!["flight_id", "origin", "duration"]
        );
        assert_eq!(dataset.column("flight_id").unwrap().dtype(), Dtype::Int64);
        assert_eq!(
            dataset.column("duration").unwrap().values(),
            &[DataValue::Float(5.5), DataValue::Int(3)]
        );
    }

    #[test]
    fn test_extended_json() {
        let dataset = DataSet::from_json_str(
            r#"[{
                "_id": {"$oid": "65f1c2a9e4b0a1b2c3d4e5f6"},
                "flight_id": {"$numberLong": "42"},
                "departure_time": {"$date": "2024-03-01T08:30:00Z"},
                "arrival_time": {"$date": {"$numberLong": "1709285400000"}},
                "duration": {"$numberDouble": "120.5"}
            }]"#,
        )
        .unwrap();

        let row = dataset.get_row(0).unwrap();
        assert_eq!(row["_id"], DataValue::from("65f1c2a9e4b0a1b2c3d4e5f6"));
        assert_eq!(row["flight_id"], DataValue::Int(42));
        assert_eq!(
            row["departure_time"],
            DataValue::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap())
        );
        assert_eq!(
            row["arrival_time"],
            DataValue::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
        );
        assert_eq!(row["duration"], DataValue::Float(120.5));
    }

    #[test]
    fn test_columnar_object() {
        let dataset = DataSet::from_json_str(
            r#"{"flight_id": [1, 2, 3], "origin": ["JFK", "LAX", null]}"#,
        )
        .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.column("origin").unwrap().null_rows(), vec![2]);

        let err = DataSet::from_json_str(r#"{"flight_id": [1, 2], "origin": ["JFK"]}"#).unwrap_err();
        assert!(matches!(err, DatasetError::RaggedColumn { .. }));
    }

    #[test]
    fn test_rejects_nested_values() {
        let err = DataSet::from_json_str(r#"[{"legs": [1, 2]}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { row: 0, .. }));

        let err = DataSet::from_json_str(r#"[{"a": 1}, 2]"#).unwrap_err();
        assert!(matches!(err, DatasetError::NotARecord { row: 1 }));

        let err = DataSet::from_json_str("42").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidShape(_)));

        let err = DataSet::from_json_str(r#"[{"t": {"$date": "yesterday"}}]"#).unwrap_err();
        assert!(err.to_string().contains("invalid date 'yesterday'"));
    }

    #[test]
    fn test_json_lines() {
        let dataset =
            DataSet::from_json_lines("{\"flight_id\": 1}\n\n{\"flight_id\": 2, \"status\": \"delayed\"}\n")
                .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.column("status").unwrap().values()[0], DataValue::Null);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".ndjson")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(file, "{{\"flight_id\": 7}}").unwrap();

        let dataset = DataSet::from_path(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);

        let err = DataSet::from_path(Path::new("flights.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(_)));

        let err = DataSet::from_path(Path::new("flights")).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidExtension));
    }
}
