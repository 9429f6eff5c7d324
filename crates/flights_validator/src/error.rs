//! Error types for dataset loading and engine selection.
//!
//! Violations found while validating live in `flights_core::ValidationError`;
//! the errors here describe failures to get as far as validating.

use thiserror::Error;

/// Errors that can occur while building or loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported dataset file format
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// Invalid or missing file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Top-level JSON value is neither a list of records nor a column map
    #[error("Invalid dataset shape: {0}")]
    InvalidShape(String),

    /// A record is not a JSON object
    #[error("Record {row} is not a JSON object")]
    NotARecord {
        /// Row index
        row: usize,
    },

    /// A field value cannot be represented
    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        /// Row index
        row: usize,
        /// Column name
        column: String,
        /// What was wrong
        reason: String,
    },

    /// A column whose length differs from the rest of the dataset
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    RaggedColumn {
        /// Column name
        column: String,
        /// Rows in the dataset
        expected: usize,
        /// Values in the column
        actual: usize,
    },

    /// The same column name was added twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

impl DatasetError {
    /// Creates a new invalid value error.
    pub fn invalid_value(row: usize, column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            column: column.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while selecting a validation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The declarative engine was requested but not compiled in
    #[error("The declarative engine is not available in this build (enable the `arrow` feature)")]
    DeclarativeUnavailable,

    /// Engine name not recognized
    #[error("Unknown validation engine '{0}' (expected auto, declarative or fallback)")]
    UnknownEngine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::invalid_value(3, "departure_time", "unsupported value: array");
        assert_eq!(
            err.to_string(),
            "Invalid value in column 'departure_time' at row 3: unsupported value: array"
        );

        let err = EngineError::UnknownEngine("pandas".to_string());
        assert!(err.to_string().contains("pandas"));
    }
}
