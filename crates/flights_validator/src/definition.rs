//! Validation of a contract definition, independent of any data.

use flights_core::{Check, ColumnType, Contract, ContractError};
use regex::Regex;
use std::collections::HashSet;
use validator::Validate;

/// Validates that a contract is well-formed.
///
/// Returns every problem found. An empty list indicates success.
///
/// # Example
///
/// ```rust
/// use flights_core::flight_contract;
/// use flights_validator::validate_definition;
///
/// assert!(validate_definition(flight_contract()).is_empty());
/// ```
pub fn validate_definition(contract: &Contract) -> Vec<ContractError> {
    let mut errors = Vec::new();

    if let Err(e) = contract.validate() {
        errors.push(ContractError::InvalidFields(e));
    }

    let mut seen = HashSet::new();
    for spec in &contract.schema.columns {
        if !seen.insert(spec.name.as_str()) {
            errors.push(ContractError::DuplicateColumn(spec.name.clone()));
        }

        for check in &spec.checks {
            let applicable = match check {
                Check::Range { .. } => spec.column_type.is_numeric(),
                Check::AllowedValues { .. } | Check::Pattern { .. } => {
                    spec.column_type == ColumnType::String
                }
            };
            if !applicable {
                errors.push(ContractError::InapplicableCheck {
                    column: spec.name.clone(),
                    check: check.kind().to_string(),
                    column_type: spec.column_type,
                });
            }

            match check {
                Check::Range {
                    min: Some(min),
                    max: Some(max),
                } if min > max => {
                    errors.push(ContractError::InvalidRange {
                        column: spec.name.clone(),
                        min: *min,
                        max: *max,
                    });
                }
                Check::Pattern { regex } => {
                    if let Err(e) = Regex::new(regex) {
                        errors.push(ContractError::InvalidPattern {
                            column: spec.name.clone(),
                            error: e.to_string(),
                        });
                    }
                }
                _ => {}
            }
        }
    }

    for entry in contract.categories.iter() {
        match contract.schema.column(&entry.column) {
            None => errors.push(ContractError::UnknownCategoryColumn(entry.column.clone())),
            Some(spec) if spec.column_type != ColumnType::String => {
                errors.push(ContractError::NonStringCategory {
                    column: entry.column.clone(),
                    actual: spec.column_type,
                });
            }
            Some(_) => {}
        }
    }

    errors
}
