//! Procedural validation engine.
//!
//! Runs four phases in a fixed order and stops at the first violation:
//!
//! 1. Column presence: every declared column, reported all at once
//! 2. Column types: the first column whose dtype differs from the declared type
//! 3. Categories: the first category column holding a disallowed value
//! 4. Bounds: the first range check with a value out of bounds
//!
//! Values are never cast. A null in a non-nullable column surfaces through the
//! type and category phases; strictness and pattern checks are left to the
//! declarative engine.

use crate::constraints::{category_difference, range_failures};
use crate::{Column, DataSet, DataValue, Dtype, TableValidator};
use flights_core::{ColumnSpec, ColumnType, Contract, ValidationError};
use std::borrow::Cow;
use tracing::debug;

/// Validates datasets one phase at a time, reporting the first violation.
pub struct FallbackValidator<'a> {
    contract: &'a Contract,
}

impl<'a> FallbackValidator<'a> {
    /// Creates a fallback validator for a contract.
    pub fn new(contract: &'a Contract) -> Self {
        Self { contract }
    }

    /// Checks that every declared column is present.
    ///
    /// All missing columns are reported together, in schema order.
    pub fn check_presence(&self, dataset: &DataSet) -> Result<(), ValidationError> {
        let missing: Vec<&str> = self
            .contract
            .schema
            .column_names()
            .filter(|name| !dataset.has_column(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::missing_columns(missing))
        }
    }

    /// Checks that each declared column holds values of the declared type.
    pub fn check_types(&self, dataset: &DataSet) -> Result<(), ValidationError> {
        for spec in &self.contract.schema.columns {
            let Some(column) = dataset.column(&spec.name) else {
                continue;
            };
            let dtype = observed_dtype(spec, column);
            if !dtype.conforms_to(spec.column_type) {
                return Err(ValidationError::type_mismatch(
                    &spec.name,
                    dtype.as_str(),
                    spec.column_type.as_str(),
                ));
            }
        }
        Ok(())
    }

    /// Checks category columns against the contract's category table.
    ///
    /// Nulls count as the value `null` unless the schema declares the column
    /// nullable. Entries are visited in table order.
    pub fn check_categories(&self, dataset: &DataSet) -> Result<(), ValidationError> {
        for entry in self.contract.categories.iter() {
            let Some(column) = dataset.column(&entry.column) else {
                continue;
            };
            let nullable = self
                .contract
                .schema
                .column(&entry.column)
                .is_some_and(|spec| spec.nullable);
            let values = column.values().iter().filter_map(|value| match value {
                DataValue::Null if nullable => None,
                DataValue::String(s) => Some(Cow::Borrowed(s.as_str())),
                other => Some(Cow::Owned(other.to_string())),
            });
            let invalid = category_difference(values, &entry.values);
            if !invalid.is_empty() {
                return Err(ValidationError::category_violation(&entry.column, invalid));
            }
        }
        Ok(())
    }

    /// Checks range bounds on numeric columns.
    pub fn check_bounds(&self, dataset: &DataSet) -> Result<(), ValidationError> {
        for spec in &self.contract.schema.columns {
            let Some(column) = dataset.column(&spec.name) else {
                continue;
            };
            for (min, max) in spec.range_checks() {
                let values = column
                    .values()
                    .iter()
                    .enumerate()
                    .filter_map(|(row, value)| value.as_float().map(|v| (row, v)));
                let failures = range_failures(values, min, max);
                if !failures.is_empty() {
                    return Err(ValidationError::range_violation(&spec.name, min, max, failures));
                }
            }
        }
        Ok(())
    }
}

/// Dtype of a column as seen by the type phase.
///
/// Nulls in a non-nullable integer or timestamp column cannot be represented
/// in that type: an integer column widens to `float64`, anything else reads
/// as `mixed`.
fn observed_dtype(spec: &ColumnSpec, column: &Column) -> Dtype {
    let dtype = column.dtype();
    let holds_nulls = column.values().iter().any(DataValue::is_null);
    if spec.nullable
        || !holds_nulls
        || !matches!(spec.column_type, ColumnType::Int | ColumnType::Timestamp)
    {
        return dtype;
    }
    match dtype {
        Dtype::Int64 => Dtype::Float64,
        Dtype::Timestamp | Dtype::Empty => Dtype::Mixed,
        other => other,
    }
}

impl TableValidator for FallbackValidator<'_> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn contract(&self) -> &Contract {
        self.contract
    }

    fn validate(&self, dataset: &DataSet) -> Result<(), ValidationError> {
        debug!(contract = %self.contract.name, rows = dataset.len(), "Running fallback validation");

        self.check_presence(dataset)?;
        self.check_types(dataset)?;
        self.check_categories(dataset)?;
        self.check_bounds(dataset)
    }

    fn warnings(&self) -> Vec<String> {
        vec!["Fallback engine reports only the first violation of each phase".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flights_core::{ColumnBuilder, ColumnType, ContractBuilder};
    use pretty_assertions::assert_eq;

    fn contract() -> Contract {
        ContractBuilder::new("flights")
            .column(ColumnBuilder::new("flight_id", ColumnType::Int).ge(0.0).build())
            .column(ColumnBuilder::new("duration", ColumnType::Float).ge(0.0).build())
            .column(ColumnBuilder::new("origin", ColumnType::String).build())
            .category("origin", ["JFK", "LAX"])
            .build()
    }

    fn dataset(ids: Vec<DataValue>, durations: Vec<DataValue>, origins: Vec<DataValue>) -> DataSet {
        DataSet::from_columns(vec![
            ("flight_id", ids),
            ("duration", durations),
            ("origin", origins),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_dataset() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(1), DataValue::Int(2)],
            vec![DataValue::Float(1.5), DataValue::Float(0.0)],
            vec!["JFK".into(), "LAX".into()],
        );
        assert_eq!(FallbackValidator::new(&contract).validate(&data), Ok(()));
    }

    #[test]
    fn test_presence_reports_all_missing() {
        let contract = contract();
        let data = DataSet::from_columns(vec![("duration", vec![DataValue::Float(1.0)])]).unwrap();
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert_eq!(err, ValidationError::missing_columns(["flight_id", "origin"]));
    }

    #[test]
    fn test_no_coercion() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(1)],
            vec![DataValue::Int(5)],
            vec!["JFK".into()],
        );
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert_eq!(err, ValidationError::type_mismatch("duration", "int64", "float64"));
    }

    #[test]
    fn test_category_violation_is_set_difference() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(1), DataValue::Int(2), DataValue::Int(3)],
            vec![DataValue::Float(1.0); 3],
            vec!["XXX".into(), "JFK".into(), "XXX".into()],
        );
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert_eq!(err, ValidationError::category_violation("origin", ["XXX"]));
    }

    #[test]
    fn test_first_bounds_violation_wins() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(-1), DataValue::Int(2)],
            vec![DataValue::Float(-5.0), DataValue::Float(1.0)],
            vec!["JFK".into(), "LAX".into()],
        );
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert!(!err.is_aggregate());
        assert_eq!(err.column(), Some("flight_id"));
        assert_eq!(err.kind(), "range_violation");
    }

    #[test]
    fn test_duration_bounds_violation() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(1), DataValue::Int(2)],
            vec![DataValue::Float(5.0), DataValue::Float(-1.0)],
            vec!["JFK".into(), "LAX".into()],
        );
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert_eq!(err.column(), Some("duration"));
        assert_eq!(err.kind(), "range_violation");
        assert!(err.to_string().contains("-1"), "{}", err);
    }

    #[test]
    fn test_ignores_extra_columns() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(7)],
            vec![DataValue::Float(1.0)],
            vec!["LAX".into()],
        )
        .with_column("gate", vec!["B12".into()])
        .unwrap();
        assert_eq!(FallbackValidator::new(&contract).validate(&data), Ok(()));
    }

    #[test]
    fn test_null_integer_is_type_mismatch() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(1), DataValue::Null],
            vec![DataValue::Float(1.0); 2],
            vec!["JFK".into(), "LAX".into()],
        );
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert_eq!(err, ValidationError::type_mismatch("flight_id", "float64", "int64"));
    }

    #[test]
    fn test_null_category_is_violation() {
        let contract = contract();
        let data = dataset(
            vec![DataValue::Int(1), DataValue::Int(2)],
            vec![DataValue::Float(1.0); 2],
            vec![DataValue::Null, "JFK".into()],
        );
        let err = FallbackValidator::new(&contract).validate(&data).unwrap_err();
        assert_eq!(err, ValidationError::category_violation("origin", ["null"]));
    }

    #[test]
    fn test_nullable_columns_accept_nulls() {
        let contract = ContractBuilder::new("flights")
            .column(
                ColumnBuilder::new("flight_id", ColumnType::Int)
                    .nullable(true)
                    .ge(0.0)
                    .build(),
            )
            .column(ColumnBuilder::new("origin", ColumnType::String).nullable(true).build())
            .category("origin", ["JFK"])
            .build();
        let data = DataSet::from_columns(vec![
            ("flight_id", vec![DataValue::Null, DataValue::Int(3)]),
            ("origin", vec!["JFK".into(), DataValue::Null]),
        ])
        .unwrap();
        assert_eq!(FallbackValidator::new(&contract).validate(&data), Ok(()));
    }
}
