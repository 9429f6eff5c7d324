//! Validation report types.
//!
//! A report wraps the outcome of one validation call together with the
//! statistics the CLI prints.

use crate::ValidationError;

/// Report of validation results.
///
/// Contains detailed information about validation outcomes,
/// including violations, warnings, and statistics.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// Leaf violations encountered
    pub errors: Vec<ValidationError>,

    /// List of warnings
    pub warnings: Vec<String>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default)]
pub struct ValidationStats {
    /// Name of the engine that ran
    pub engine: String,

    /// Number of records validated
    pub records_validated: usize,

    /// Number of schema columns present in the dataset
    pub columns_checked: usize,

    /// Number of checks declared on those columns
    pub checks_declared: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a new successful validation report.
    pub fn success() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Creates a report from a validation outcome.
    ///
    /// Aggregates are flattened so that `errors` only holds leaf violations.
    pub fn from_outcome(outcome: Result<(), ValidationError>, stats: ValidationStats) -> Self {
        let errors = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => err.violations().into_iter().cloned().collect(),
        };
        Self {
            passed: errors.is_empty(),
            errors,
            warnings: Vec::new(),
            stats,
        }
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.passed = false;
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
