//! Builder pattern for creating data contracts.
//!
//! This module provides ergonomic builders for constructing contracts
//! and their column specifications with a fluent API.

use crate::{CategoryTable, Check, ColumnSpec, ColumnType, Contract, Schema};

/// Builder for creating a `Contract`.
///
/// # Example
///
/// ```rust
/// use flights_core::{ColumnBuilder, ColumnType, ContractBuilder};
///
/// let contract = ContractBuilder::new("flights")
///     .version("1.0.0")
///     .description("Raw flight records")
///     .column(ColumnBuilder::new("flight_id", ColumnType::Int).ge(0.0).build())
///     .column(
///         ColumnBuilder::new("origin", ColumnType::String)
///             .is_in(["JFK", "LAX"])
///             .build(),
///     )
///     .category("origin", ["JFK", "LAX"])
///     .build();
///
/// assert_eq!(contract.schema.len(), 2);
/// assert!(contract.schema.strict);
/// ```
#[derive(Debug)]
pub struct ContractBuilder {
    name: String,
    version: String,
    description: Option<String>,
    columns: Vec<ColumnSpec>,
    strict: bool,
    coerce: bool,
    categories: CategoryTable,
}

impl ContractBuilder {
    /// Creates a new contract builder.
    ///
    /// The schema starts strict and coercing, at version `1.0.0`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            description: None,
            columns: Vec::new(),
            strict: true,
            coerce: true,
            categories: CategoryTable::new(),
        }
    }

    /// Sets the contract version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the contract description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a column to the schema.
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds multiple columns to the schema.
    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Sets whether undeclared columns are rejected.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether values are cast before checking.
    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// Adds a categorical column to the category table.
    pub fn category<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.insert(column, values);
        self
    }

    /// Replaces the category table.
    pub fn categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    /// Builds the contract.
    pub fn build(self) -> Contract {
        Contract {
            name: self.name,
            version: self.version,
            description: self.description,
            schema: Schema {
                columns: self.columns,
                strict: self.strict,
                coerce: self.coerce,
            },
            categories: self.categories,
        }
    }
}

/// Builder for creating a `ColumnSpec`.
///
/// Columns are non-nullable unless stated otherwise.
///
/// # Example
///
/// ```rust
/// use flights_core::{ColumnBuilder, ColumnType};
///
/// let column = ColumnBuilder::new("duration", ColumnType::Float)
///     .description("Block time in minutes")
///     .ge(0.0)
///     .build();
/// assert!(!column.nullable);
/// ```
#[derive(Debug)]
pub struct ColumnBuilder {
    name: String,
    column_type: ColumnType,
    nullable: bool,
    description: Option<String>,
    checks: Vec<Check>,
}

impl ColumnBuilder {
    /// Creates a new column builder.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            description: None,
            checks: Vec::new(),
        }
    }

    /// Sets whether the column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the column description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a check to the column.
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds a lower bound check.
    pub fn ge(self, min: f64) -> Self {
        self.check(Check::ge(min))
    }

    /// Adds an upper bound check.
    pub fn le(self, max: f64) -> Self {
        self.check(Check::le(max))
    }

    /// Adds a set membership check.
    pub fn is_in<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check(Check::is_in(values))
    }

    /// Adds a pattern check.
    pub fn pattern(self, regex: impl Into<String>) -> Self {
        self.check(Check::pattern(regex))
    }

    /// Builds the column specification.
    pub fn build(self) -> ColumnSpec {
        ColumnSpec {
            name: self.name,
            column_type: self.column_type,
            nullable: self.nullable,
            description: self.description,
            checks: self.checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contract_builder() {
        let contract = ContractBuilder::new("test")
            .version("2.0.0")
            .description("Test contract")
            .column(ColumnBuilder::new("id", ColumnType::Int).build())
            .strict(false)
            .coerce(false)
            .build();

        assert_eq!(contract.name, "test");
        assert_eq!(contract.version, "2.0.0");
        assert_eq!(contract.description, Some("Test contract".to_string()));
        assert_eq!(contract.schema.len(), 1);
        assert!(!contract.schema.strict);
        assert!(!contract.schema.coerce);
        assert!(contract.categories.is_empty());
    }

    #[test]
    fn test_column_builder_checks_in_order() {
        let column = ColumnBuilder::new("code", ColumnType::String)
            .nullable(true)
            .is_in(["A", "B"])
            .pattern("^[A-Z]$")
            .build();

        assert!(column.nullable);
        assert_eq!(
            column.checks,
            vec![Check::is_in(["A", "B"]), Check::pattern("^[A-Z]$")]
        );
    }

    #[test]
    fn test_category_helpers() {
        let contract = ContractBuilder::new("test")
            .category("status", ["on_time"])
            .category("airline", ["Delta"])
            .build();

        let columns: Vec<&str> = contract
            .categories
            .iter()
            .map(|e| e.column.as_str())
            .collect();
        assert_eq!(columns, vec!["status", "airline"]);
    }

    #[test]
    fn test_bounds_helpers() {
        let column = ColumnBuilder::new("delay", ColumnType::Float)
            .ge(-30.0)
            .le(600.0)
            .build();
        assert_eq!(column.checks, vec![Check::ge(-30.0), Check::le(600.0)]);
    }
}
