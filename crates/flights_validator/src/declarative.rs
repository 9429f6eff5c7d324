//! Declarative validation engine backed by Arrow arrays.
//!
//! The dataset is coerced (or type-checked) into a `RecordBatch` holding one
//! typed array per declared column, then every check is evaluated against
//! those arrays. All violations are collected and returned together.

use crate::coerce::coerce_column;
use crate::constraints::{category_difference, pattern_failures, range_failures};
use crate::{Column, DataSet, DataValue, TableValidator};
use arrow_array::{
    Array, ArrayRef, Float64Array, Int64Array, RecordBatch, RecordBatchOptions, StringArray,
    TimestampMicrosecondArray,
};
use arrow_schema::{Field, Schema as ArrowSchema};
use flights_core::{Check, ColumnSpec, ColumnType, Contract, ValidationError};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Validates datasets against a contract and reports every violation.
///
/// Regex patterns are compiled once when the validator is created.
pub struct DeclarativeValidator<'a> {
    contract: &'a Contract,
    patterns: HashMap<String, Result<Regex, String>>,
}

impl<'a> DeclarativeValidator<'a> {
    /// Creates a declarative validator for a contract.
    pub fn new(contract: &'a Contract) -> Self {
        let patterns = contract
            .schema
            .columns
            .iter()
            .flat_map(|spec| spec.checks.iter())
            .filter_map(|check| match check {
                Check::Pattern { regex } => Some(regex),
                _ => None,
            })
            .map(|regex| (regex.clone(), Regex::new(regex).map_err(|e| e.to_string())))
            .collect();

        Self { contract, patterns }
    }

    /// Builds the typed record batch for the declared columns present in the dataset.
    ///
    /// Columns that fail coercion or type conformance are left out of the
    /// batch and their errors pushed to `errors`.
    pub fn to_record_batch(
        &self,
        dataset: &DataSet,
        errors: &mut Vec<ValidationError>,
    ) -> Result<RecordBatch, ValidationError> {
        let mut fields = Vec::new();
        let mut arrays: Vec<ArrayRef> = Vec::new();

        for spec in &self.contract.schema.columns {
            let Some(column) = dataset.column(&spec.name) else {
                continue;
            };
            match self.to_array(spec, column) {
                Ok(array) => {
                    fields.push(Field::new(spec.name.clone(), array.data_type().clone(), true));
                    arrays.push(array);
                }
                Err(err) => {
                    warn!(column = %spec.name, "Column could not be typed: {}", err);
                    errors.push(err);
                }
            }
        }

        let options = RecordBatchOptions::new().with_row_count(Some(dataset.len()));
        RecordBatch::try_new_with_options(Arc::new(ArrowSchema::new(fields)), arrays, &options)
            .map_err(|e| ValidationError::Engine(e.to_string()))
    }

    fn check_columns(&self, dataset: &DataSet, errors: &mut Vec<ValidationError>) {
        let schema = &self.contract.schema;
        errors.extend(
            schema
                .column_names()
                .filter(|name| !dataset.has_column(name))
                .map(|name| ValidationError::missing_columns([name])),
        );
        if schema.strict {
            errors.extend(
                dataset
                    .column_names()
                    .filter(|name| !schema.contains(name))
                    .map(ValidationError::unexpected_column),
            );
        }
    }

    fn to_array(&self, spec: &ColumnSpec, column: &Column) -> Result<ArrayRef, ValidationError> {
        let values: Cow<'_, [DataValue]> = if self.contract.schema.coerce {
            let coerced = coerce_column(column, spec.column_type).map_err(|failures| {
                ValidationError::coercion_failed(&spec.name, spec.column_type.as_str(), failures)
            })?;
            Cow::Owned(coerced)
        } else {
            let dtype = column.dtype();
            if !dtype.conforms_to(spec.column_type) {
                return Err(ValidationError::type_mismatch(
                    &spec.name,
                    dtype.as_str(),
                    spec.column_type.as_str(),
                ));
            }
            Cow::Borrowed(column.values())
        };
        Ok(build_array(spec.column_type, &values))
    }

    fn run_check(&self, spec: &ColumnSpec, check: &Check, array: &ArrayRef) -> Option<ValidationError> {
        let inapplicable =
            || ValidationError::inapplicable_check(&spec.name, check.kind(), array.data_type().to_string());

        match check {
            Check::Range { min, max } => {
                let Some(values) = numeric_values(array) else {
                    return Some(inapplicable());
                };
                let failures = range_failures(values, *min, *max);
                (!failures.is_empty())
                    .then(|| ValidationError::range_violation(&spec.name, *min, *max, failures))
            }
            Check::AllowedValues { values } => {
                let Some(strings) = array.as_any().downcast_ref::<StringArray>() else {
                    return Some(inapplicable());
                };
                let invalid = category_difference(strings.iter().flatten(), values);
                (!invalid.is_empty()).then(|| ValidationError::category_violation(&spec.name, invalid))
            }
            Check::Pattern { regex } => {
                let Some(strings) = array.as_any().downcast_ref::<StringArray>() else {
                    return Some(inapplicable());
                };
                let compiled = match self.patterns.get(regex) {
                    Some(Ok(compiled)) => compiled,
                    Some(Err(error)) => {
                        return Some(ValidationError::InvalidPattern {
                            column: spec.name.clone(),
                            error: error.clone(),
                        });
                    }
                    None => {
                        return Some(ValidationError::Engine(format!(
                            "pattern '{}' was not compiled",
                            regex
                        )));
                    }
                };
                let values = strings
                    .iter()
                    .enumerate()
                    .filter_map(|(row, value)| value.map(|v| (row, v)));
                let failures = pattern_failures(values, compiled);
                (!failures.is_empty())
                    .then(|| ValidationError::pattern_mismatch(&spec.name, regex, failures))
            }
        }
    }
}

impl TableValidator for DeclarativeValidator<'_> {
    fn name(&self) -> &'static str {
        "declarative"
    }

    fn contract(&self) -> &Contract {
        self.contract
    }

    fn validate(&self, dataset: &DataSet) -> Result<(), ValidationError> {
        debug!(
            contract = %self.contract.name,
            rows = dataset.len(),
            "Running declarative validation"
        );

        let mut errors = Vec::new();
        self.check_columns(dataset, &mut errors);
        let batch = self.to_record_batch(dataset, &mut errors)?;

        for spec in &self.contract.schema.columns {
            let Some(array) = batch.column_by_name(&spec.name) else {
                continue;
            };
            if !spec.nullable && array.null_count() > 0 {
                let rows = (0..array.len()).filter(|&row| array.is_null(row)).collect();
                errors.push(ValidationError::null_violation(&spec.name, rows));
            }
            errors.extend(
                spec.checks
                    .iter()
                    .filter_map(|check| self.run_check(spec, check, array)),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(violations = errors.len(), "Declarative validation failed");
            Err(ValidationError::aggregate(errors))
        }
    }
}

fn build_array(column_type: ColumnType, values: &[DataValue]) -> ArrayRef {
    match column_type {
        ColumnType::Int => Arc::new(values.iter().map(DataValue::as_int).collect::<Int64Array>()),
        ColumnType::Float => {
            Arc::new(values.iter().map(DataValue::as_float).collect::<Float64Array>())
        }
        ColumnType::String => {
            Arc::new(values.iter().map(DataValue::as_string).collect::<StringArray>())
        }
        ColumnType::Timestamp => Arc::new(
            values
                .iter()
                .map(|v| v.as_timestamp().map(|t| t.timestamp_micros()))
                .collect::<TimestampMicrosecondArray>()
                .with_timezone("UTC"),
        ),
    }
}

fn numeric_values(array: &ArrayRef) -> Option<Vec<(usize, f64)>> {
    if let Some(ints) = array.as_any().downcast_ref::<Int64Array>() {
        return Some(
            ints.iter()
                .enumerate()
                .filter_map(|(row, v)| v.map(|v| (row, v as f64)))
                .collect(),
        );
    }
    array.as_any().downcast_ref::<Float64Array>().map(|floats| {
        floats
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.map(|v| (row, v)))
            .collect()
    })
}
