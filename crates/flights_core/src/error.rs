//! Error types for flight data contracts.
//!
//! This module defines the violations reported when a dataset does not
//! conform to a contract, and the errors raised for malformed contract
//! definitions.

use crate::ColumnType;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Result type for contract definition operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Maximum number of failure cases rendered in an error message.
const DISPLAY_LIMIT: usize = 10;

/// Errors in the definition of a contract itself.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The same column is declared twice
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A range check whose lower bound exceeds its upper bound
    #[error("Invalid range for column '{column}': min {min} is greater than max {max}")]
    InvalidRange {
        /// Column name
        column: String,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A pattern check whose regex does not compile
    #[error("Invalid pattern for column '{column}': {error}")]
    InvalidPattern {
        /// Column name
        column: String,
        /// Compiler message
        error: String,
    },

    /// A check that cannot apply to the column's declared type
    #[error("Check '{check}' cannot apply to column '{column}' of type {column_type}")]
    InapplicableCheck {
        /// Column name
        column: String,
        /// Check kind
        check: String,
        /// Declared type
        column_type: ColumnType,
    },

    /// Category table names a column the schema does not declare
    #[error("Category column '{0}' is not declared in the schema")]
    UnknownCategoryColumn(String),

    /// Category table names a column that is not a string column
    #[error("Category column '{column}' must be a string column, found {actual}")]
    NonStringCategory {
        /// Column name
        column: String,
        /// Declared type
        actual: ColumnType,
    },

    /// Field-level rules on the contract structure failed
    #[error("Invalid contract fields: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),
}

/// A single offending value, located by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureCase {
    /// Zero-based row index
    pub row: usize,
    /// Rendered value
    pub value: String,
}

impl FailureCase {
    /// Creates a new failure case.
    pub fn new(row: usize, value: impl Into<String>) -> Self {
        Self {
            row,
            value: value.into(),
        }
    }
}

impl fmt::Display for FailureCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.value)
    }
}

/// A violation found while validating a dataset against a contract.
///
/// The declarative engine reports every violation wrapped in
/// [`ValidationError::Aggregate`]; the fallback engine returns the first
/// blocking violation of a phase directly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required columns are absent from the dataset
    #[error("Missing columns: [{}]", .columns.join(", "))]
    MissingColumns {
        /// Missing column names, in schema order
        columns: Vec<String>,
    },

    /// Column present in the dataset but not in a strict schema
    #[error("Column '{column}' is not declared in the schema")]
    UnexpectedColumn {
        /// Column name
        column: String,
    },

    /// Column's runtime type disagrees with the schema
    #[error("Column '{column}' has dtype {actual}, expected {expected}")]
    TypeMismatch {
        /// Column name
        column: String,
        /// Runtime type
        actual: String,
        /// Declared type
        expected: String,
    },

    /// Values that could not be cast to the declared type
    #[error(
        "Column '{column}' could not be coerced to {expected}: {}",
        format_cases(.failures)
    )]
    CoercionFailed {
        /// Column name
        column: String,
        /// Declared type
        expected: String,
        /// Values that failed to cast
        failures: Vec<FailureCase>,
    },

    /// Nulls in a non-nullable column
    #[error("Column '{column}' contains null values at rows {}", format_rows(.rows))]
    NullViolation {
        /// Column name
        column: String,
        /// Rows holding nulls
        rows: Vec<usize>,
    },

    /// Values outside the column's permitted set
    #[error("Column '{column}' has invalid values: {}", format_values(.values))]
    CategoryViolation {
        /// Column name
        column: String,
        /// Distinct offending values
        values: BTreeSet<String>,
    },

    /// Numeric values outside the column's bounds
    #[error(
        "Column '{column}' has values outside {}: {}",
        format_bounds(.min, .max),
        format_cases(.failures)
    )]
    RangeViolation {
        /// Column name
        column: String,
        /// Lower bound (inclusive)
        min: Option<f64>,
        /// Upper bound (inclusive)
        max: Option<f64>,
        /// Offending values
        failures: Vec<FailureCase>,
    },

    /// String values not matching the column's pattern
    #[error(
        "Column '{column}' has values not matching '{pattern}': {}",
        format_cases(.failures)
    )]
    PatternMismatch {
        /// Column name
        column: String,
        /// Expected pattern
        pattern: String,
        /// Offending values
        failures: Vec<FailureCase>,
    },

    /// Pattern check whose regex does not compile
    #[error("Invalid pattern for column '{column}': {error}")]
    InvalidPattern {
        /// Column name
        column: String,
        /// Compiler message
        error: String,
    },

    /// Check declared on a column of a type it cannot apply to
    #[error("Check '{check}' cannot apply to column '{column}' of dtype {actual}")]
    InapplicableCheck {
        /// Column name
        column: String,
        /// Check kind
        check: String,
        /// Column dtype
        actual: String,
    },

    /// Failure inside the validation engine itself
    #[error("Validation engine error: {0}")]
    Engine(String),

    /// Every violation found during one declarative pass
    #[error("{} violation(s) found:\n{}", .errors.len(), format_errors(.errors))]
    Aggregate {
        /// Collected violations
        errors: Vec<ValidationError>,
    },
}

impl ValidationError {
    /// Creates a missing columns error.
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an unexpected column error.
    pub fn unexpected_column(column: impl Into<String>) -> Self {
        Self::UnexpectedColumn {
            column: column.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        column: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            actual: actual.into(),
            expected: expected.into(),
        }
    }

    /// Creates a coercion failure error.
    pub fn coercion_failed(
        column: impl Into<String>,
        expected: impl Into<String>,
        failures: Vec<FailureCase>,
    ) -> Self {
        Self::CoercionFailed {
            column: column.into(),
            expected: expected.into(),
            failures,
        }
    }

    /// Creates a null violation error.
    pub fn null_violation(column: impl Into<String>, rows: Vec<usize>) -> Self {
        Self::NullViolation {
            column: column.into(),
            rows,
        }
    }

    /// Creates a category violation error.
    pub fn category_violation<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CategoryViolation {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a range violation error.
    pub fn range_violation(
        column: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        failures: Vec<FailureCase>,
    ) -> Self {
        Self::RangeViolation {
            column: column.into(),
            min,
            max,
            failures,
        }
    }

    /// Creates a pattern mismatch error.
    pub fn pattern_mismatch(
        column: impl Into<String>,
        pattern: impl Into<String>,
        failures: Vec<FailureCase>,
    ) -> Self {
        Self::PatternMismatch {
            column: column.into(),
            pattern: pattern.into(),
            failures,
        }
    }

    /// Creates an inapplicable check error.
    pub fn inapplicable_check(
        column: impl Into<String>,
        check: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InapplicableCheck {
            column: column.into(),
            check: check.into(),
            actual: actual.into(),
        }
    }

    /// Wraps collected violations.
    pub fn aggregate(errors: Vec<ValidationError>) -> Self {
        Self::Aggregate { errors }
    }

    /// Flattens aggregates into the list of leaf violations.
    pub fn violations(&self) -> Vec<&ValidationError> {
        match self {
            ValidationError::Aggregate { errors } => {
                errors.iter().flat_map(|e| e.violations()).collect()
            }
            other => vec![other],
        }
    }

    /// Returns true if this error wraps a declarative pass.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, ValidationError::Aggregate { .. })
    }

    /// Column the violation is about, when it concerns a single column.
    pub fn column(&self) -> Option<&str> {
        match self {
            ValidationError::UnexpectedColumn { column }
            | ValidationError::TypeMismatch { column, .. }
            | ValidationError::CoercionFailed { column, .. }
            | ValidationError::NullViolation { column, .. }
            | ValidationError::CategoryViolation { column, .. }
            | ValidationError::RangeViolation { column, .. }
            | ValidationError::PatternMismatch { column, .. }
            | ValidationError::InvalidPattern { column, .. }
            | ValidationError::InapplicableCheck { column, .. } => Some(column.as_str()),
            ValidationError::MissingColumns { columns } if columns.len() == 1 => {
                Some(columns[0].as_str())
            }
            _ => None,
        }
    }

    /// Stable identifier of the violation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingColumns { .. } => "missing_columns",
            ValidationError::UnexpectedColumn { .. } => "unexpected_column",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::CoercionFailed { .. } => "coercion_failed",
            ValidationError::NullViolation { .. } => "null_violation",
            ValidationError::CategoryViolation { .. } => "category_violation",
            ValidationError::RangeViolation { .. } => "range_violation",
            ValidationError::PatternMismatch { .. } => "pattern_mismatch",
            ValidationError::InvalidPattern { .. } => "invalid_pattern",
            ValidationError::InapplicableCheck { .. } => "inapplicable_check",
            ValidationError::Engine(_) => "engine",
            ValidationError::Aggregate { .. } => "aggregate",
        }
    }
}

fn format_cases(failures: &[FailureCase]) -> String {
    let mut rendered: Vec<String> = failures
        .iter()
        .take(DISPLAY_LIMIT)
        .map(|f| f.to_string())
        .collect();
    if failures.len() > DISPLAY_LIMIT {
        rendered.push(format!("... and {} more", failures.len() - DISPLAY_LIMIT));
    }
    format!("[{}]", rendered.join(", "))
}

fn format_rows(rows: &[usize]) -> String {
    let mut rendered: Vec<String> = rows
        .iter()
        .take(DISPLAY_LIMIT)
        .map(|r| r.to_string())
        .collect();
    if rows.len() > DISPLAY_LIMIT {
        rendered.push(format!("... and {} more", rows.len() - DISPLAY_LIMIT));
    }
    format!("[{}]", rendered.join(", "))
}

fn format_values(values: &BTreeSet<String>) -> String {
    let rendered: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
    format!("{{{}}}", rendered.join(", "))
}

fn format_bounds(min: &Option<f64>, max: &Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("[{}, {}]", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => "(unbounded)".to_string(),
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}
