//! Dataset representation for validation.
//!
//! A [`DataSet`] is a table of named columns of equal length. Rows can be
//! appended as records (a mapping from column name to value) and read back
//! the same way; storage is columnar so that each column has a runtime dtype.

use crate::DatasetError;
use chrono::{DateTime, SecondsFormat, Utc};
use flights_core::ColumnType;
use std::collections::HashMap;
use std::fmt;

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Timestamp value (UTC)
    Timestamp(DateTime<Utc>),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns the dtype of this value, or `None` for null.
    pub fn dtype(&self) -> Option<Dtype> {
        match self {
            DataValue::Null => None,
            DataValue::String(_) => Some(Dtype::String),
            DataValue::Int(_) => Some(Dtype::Int64),
            DataValue::Float(_) => Some(Dtype::Float64),
            DataValue::Bool(_) => Some(Dtype::Bool),
            DataValue::Timestamp(_) => Some(Dtype::Timestamp),
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        self.dtype().map_or("null", |d| d.as_str())
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            DataValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => f.write_str("null"),
            DataValue::String(s) => f.write_str(s),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Timestamp(t) => {
                f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<i32> for DataValue {
    fn from(i: i32) -> Self {
        DataValue::Int(i64::from(i))
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for DataValue {
    fn from(t: DateTime<Utc>) -> Self {
        DataValue::Timestamp(t)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// Runtime type of a column, inferred from its non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    /// Every non-null value is an integer
    Int64,
    /// Every non-null value is a float
    Float64,
    /// Every non-null value is a string
    String,
    /// Every non-null value is a boolean
    Bool,
    /// Every non-null value is a timestamp
    Timestamp,
    /// Non-null values of more than one type
    Mixed,
    /// No non-null values at all
    Empty,
}

impl Dtype {
    /// Returns the dtype name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::String => "string",
            Dtype::Bool => "bool",
            Dtype::Timestamp => "timestamp",
            Dtype::Mixed => "mixed",
            Dtype::Empty => "empty",
        }
    }

    /// Returns true if a column of this dtype satisfies the declared type
    /// without any casting. An empty column satisfies every type.
    pub fn conforms_to(&self, column_type: ColumnType) -> bool {
        matches!(
            (self, column_type),
            (Dtype::Empty, _)
                | (Dtype::Int64, ColumnType::Int)
                | (Dtype::Float64, ColumnType::Float)
                | (Dtype::String, ColumnType::String)
                | (Dtype::Timestamp, ColumnType::Timestamp)
        )
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<DataValue>,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, values: Vec<DataValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values in row order.
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Infers the column dtype from its non-null values.
    pub fn dtype(&self) -> Dtype {
        let mut inferred = None;
        for dtype in self.values.iter().filter_map(DataValue::dtype) {
            match inferred {
                None => inferred = Some(dtype),
                Some(seen) if seen == dtype => {}
                Some(_) => return Dtype::Mixed,
            }
        }
        inferred.unwrap_or(Dtype::Empty)
    }

    /// Rows holding null values.
    pub fn null_rows(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_null())
            .map(|(row, _)| row)
            .collect()
    }
}

/// A single row of data.
pub type DataRow = HashMap<String, DataValue>;

/// A dataset containing named columns of equal length.
///
/// Column order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl DataSet {
    /// Creates a new empty dataset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a dataset from named columns.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::RaggedColumn` if the columns differ in length and
    /// `DatasetError::DuplicateColumn` if a name repeats.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (S, Vec<DataValue>)>,
        S: Into<String>,
    {
        let mut dataset = Self::empty();
        for (name, values) in columns {
            dataset.add_column(name, values)?;
        }
        Ok(dataset)
    }

    /// Creates a dataset from records.
    ///
    /// Columns appear in the order their names are first seen; a record that
    /// lacks a column holds null there.
    pub fn from_records<I, R, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DataValue>,
    {
        let mut dataset = Self::empty();
        for record in records {
            dataset.push_record(record);
        }
        dataset
    }

    /// Adds a column to the dataset.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<DataValue>,
    ) -> Result<(), DatasetError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(DatasetError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && values.len() != self.rows {
            return Err(DatasetError::RaggedColumn {
                column: name,
                expected: self.rows,
                actual: values.len(),
            });
        }
        self.rows = values.len();
        self.index.insert(name.clone(), self.columns.len());
        self.columns.push(Column::new(name, values));
        Ok(())
    }

    /// Builder-style variant of [`DataSet::add_column`].
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<DataValue>,
    ) -> Result<Self, DatasetError> {
        self.add_column(name, values)?;
        Ok(self)
    }

    /// Appends a record as a new row.
    ///
    /// Unknown names add a column back-filled with nulls; a name repeated
    /// within one record keeps the last value.
    pub fn push_record<R, K, V>(&mut self, record: R)
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DataValue>,
    {
        let row = self.rows;
        for (name, value) in record {
            let name = name.into();
            let value = value.into();
            match self.index.get(&name) {
                Some(&i) => {
                    let values = &mut self.columns[i].values;
                    if values.len() > row {
                        values[row] = value;
                    } else {
                        values.push(value);
                    }
                }
                None => {
                    let mut values = vec![DataValue::Null; row];
                    values.push(value);
                    self.index.insert(name.clone(), self.columns.len());
                    self.columns.push(Column::new(name, values));
                }
            }
        }
        self.rows += 1;
        for column in &mut self.columns {
            if column.values.len() < self.rows {
                column.values.push(DataValue::Null);
            }
        }
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns an iterator over the columns.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Returns an iterator over the column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Returns true if the dataset has the column.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<DataRow> {
        if index >= self.rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.values[index].clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = DataRow> + '_ {
        (0..self.rows).filter_map(|i| self.get_row(i))
    }
}
