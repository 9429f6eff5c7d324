//! Data contract types and structures.
//!
//! This module contains the core types for describing a tabular dataset:
//! the ordered schema of column specifications, the checks a column must
//! satisfy, and the category table of permitted values.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A data contract bundling a schema with its category table.
///
/// A `Contract` is the unit loaded from configuration and handed to the
/// validators. It is immutable once built.
///
/// # Example
///
/// ```rust
/// use flights_core::{Check, ColumnSpec, ColumnType, Contract, Schema};
///
/// let contract = Contract {
///     name: "flights".to_string(),
///     version: "1.0.0".to_string(),
///     description: Some("Raw flight records".to_string()),
///     schema: Schema::new(vec![ColumnSpec {
///         name: "flight_id".to_string(),
///         column_type: ColumnType::Int,
///         nullable: false,
///         description: None,
///         checks: vec![Check::ge(0.0)],
///     }]),
///     categories: Default::default(),
/// };
/// assert!(contract.schema.contains("flight_id"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Contract {
    /// Unique name identifying this contract
    #[validate(length(min = 1))]
    pub name: String,

    /// Semantic version of the contract (e.g., "1.0.0")
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description of the dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Column definitions and schema options
    #[validate(nested)]
    pub schema: Schema,

    /// Permitted values for categorical columns
    #[serde(default, skip_serializing_if = "CategoryTable::is_empty")]
    pub categories: CategoryTable,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_true() -> bool {
    true
}

/// Primitive type expected for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer
    #[serde(alias = "integer", alias = "int64", alias = "long")]
    Int,
    /// 64-bit floating point
    #[serde(alias = "float64", alias = "double")]
    Float,
    /// UTF-8 string
    #[serde(alias = "str")]
    String,
    /// Point in time (UTC)
    #[serde(alias = "datetime")]
    Timestamp,
}

impl ColumnType {
    /// Returns the canonical dtype name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int64",
            ColumnType::Float => "float64",
            ColumnType::String => "string",
            ColumnType::Timestamp => "timestamp",
        }
    }

    /// Returns true for integer and floating point columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered schema of column specifications.
///
/// `strict` rejects columns that are not declared; `coerce` casts values to
/// the declared type before checks run. Both default to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Schema {
    /// Column specifications in declaration order
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub columns: Vec<ColumnSpec>,

    /// Disallow columns that are not declared in the schema
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Cast values to the declared type before checking
    #[serde(default = "default_true")]
    pub coerce: bool,
}

impl Schema {
    /// Creates a strict, coercing schema from column specifications.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            strict: true,
            coerce: true,
        }
    }

    /// Looks up a column specification by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns true if the schema declares the column.
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Iterates over column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single column definition in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ColumnSpec {
    /// Column name
    #[validate(length(min = 1))]
    pub name: String,

    /// Expected primitive type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether the column may contain nulls
    #[serde(default)]
    pub nullable: bool,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Checks applied to every non-null value, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<Check>,
}

impl ColumnSpec {
    /// Iterates over the range checks declared on this column.
    pub fn range_checks(&self) -> impl Iterator<Item = (Option<f64>, Option<f64>)> + '_ {
        self.checks.iter().filter_map(|check| match check {
            Check::Range { min, max } => Some((*min, *max)),
            _ => None,
        })
    }
}

/// Checks that can be applied to a column's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Numeric value must lie within the inclusive bounds
    Range {
        /// Lower bound (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Upper bound (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// String value must be one of the listed values
    #[serde(alias = "isin")]
    AllowedValues {
        /// Permitted values
        values: Vec<String>,
    },

    /// String value must match the regex pattern
    Pattern {
        /// Regular expression pattern
        regex: String,
    },
}

impl Check {
    /// Value must be greater than or equal to `min`.
    pub fn ge(min: f64) -> Self {
        Check::Range {
            min: Some(min),
            max: None,
        }
    }

    /// Value must be less than or equal to `max`.
    pub fn le(max: f64) -> Self {
        Check::Range {
            min: None,
            max: Some(max),
        }
    }

    /// Value must lie within `[min, max]`.
    pub fn between(min: f64, max: f64) -> Self {
        Check::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Value must be one of `values`.
    pub fn is_in<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Check::AllowedValues {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Value must match `regex`.
    pub fn pattern(regex: impl Into<String>) -> Self {
        Check::Pattern {
            regex: regex.into(),
        }
    }

    /// Short name of the check kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Check::Range { .. } => "range",
            Check::AllowedValues { .. } => "allowed_values",
            Check::Pattern { .. } => "pattern",
        }
    }
}

/// Returns true if `value` falls outside the inclusive bounds.
///
/// NaN never compares below or above a bound, so it is never out of range.
pub fn out_of_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_some_and(|m| value < m) || max.is_some_and(|m| value > m)
}

/// The permitted values for one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    /// Column the values apply to
    pub column: String,
    /// Permitted values
    pub values: Vec<String>,
}

/// Ordered mapping from column name to its permitted values.
///
/// Serialized as a list so that declaration order survives every format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    entries: Vec<CategorySet>,
}

impl CategoryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the permitted values for a column.
    ///
    /// Replacing keeps the column's original position.
    pub fn insert<I, S>(&mut self, column: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let column = column.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.entries.iter_mut().find(|e| e.column == column) {
            Some(entry) => entry.values = values,
            None => self.entries.push(CategorySet { column, values }),
        }
    }

    /// Builder-style variant of [`CategoryTable::insert`].
    pub fn with<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(column, values);
        self
    }

    /// Permitted values for a column, if it is categorical.
    pub fn get(&self, column: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.values.as_slice())
    }

    /// Iterates over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CategorySet> {
        self.entries.iter()
    }

    /// Number of categorical columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no column is categorical.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
