//! Engine selection and the shared validator interface.
//!
//! Two engines implement [`TableValidator`]:
//!
//! - `declarative` (feature `arrow`): coerces into typed arrays, honors
//!   `strict`, nullability and pattern checks, and reports every violation
//! - `fallback`: four early-exit phases without coercion
//!
//! `auto` picks the declarative engine whenever it is compiled in.

#[cfg(feature = "arrow")]
use crate::DeclarativeValidator;
use crate::{DataSet, EngineError, FallbackValidator};
use flights_core::{
    Contract, ValidationError, ValidationReport, ValidationStats, flight_contract,
};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// A validation engine bound to one contract.
///
/// # Example
///
/// ```rust
/// use flights_core::flight_contract;
/// use flights_validator::{DataSet, EngineKind, select_validator};
///
/// let validator = select_validator(flight_contract(), EngineKind::Fallback).unwrap();
/// let report = validator.validate_with_report(&DataSet::empty());
///
/// assert!(!report.passed);
/// assert_eq!(report.stats.engine, "fallback");
/// ```
pub trait TableValidator: Send + Sync {
    /// Engine name used in reports.
    fn name(&self) -> &'static str;

    /// The contract this validator checks against.
    fn contract(&self) -> &Contract;

    /// Validates a dataset. Does not modify it.
    fn validate(&self, dataset: &DataSet) -> Result<(), ValidationError>;

    /// Notes attached to every report produced by this engine.
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Validates a dataset and wraps the outcome in a report.
    fn validate_with_report(&self, dataset: &DataSet) -> ValidationReport {
        let start = Instant::now();
        let outcome = self.validate(dataset);

        let present: Vec<_> = self
            .contract()
            .schema
            .columns
            .iter()
            .filter(|spec| dataset.has_column(&spec.name))
            .collect();
        let stats = ValidationStats {
            engine: self.name().to_string(),
            records_validated: dataset.len(),
            columns_checked: present.len(),
            checks_declared: present.iter().map(|spec| spec.checks.len()).sum(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let mut report = ValidationReport::from_outcome(outcome, stats);
        for warning in self.warnings() {
            report.add_warning(warning);
        }
        report
    }
}

/// Engine requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Declarative when available, fallback otherwise
    #[default]
    Auto,
    /// Collect-all engine backed by Arrow
    Declarative,
    /// First-violation engine without coercion
    Fallback,
}

impl EngineKind {
    /// Returns the engine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Auto => "auto",
            EngineKind::Declarative => "declarative",
            EngineKind::Fallback => "fallback",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(EngineKind::Auto),
            "declarative" => Ok(EngineKind::Declarative),
            "fallback" => Ok(EngineKind::Fallback),
            other => Err(EngineError::UnknownEngine(other.to_string())),
        }
    }
}

/// Returns true if the declarative engine is compiled in.
pub fn declarative_available() -> bool {
    cfg!(feature = "arrow")
}

/// Returns the preferred validator for a contract.
pub fn default_validator(contract: &Contract) -> Box<dyn TableValidator + '_> {
    #[cfg(feature = "arrow")]
    {
        Box::new(DeclarativeValidator::new(contract))
    }
    #[cfg(not(feature = "arrow"))]
    {
        debug!("Declarative engine not compiled in, using fallback");
        Box::new(FallbackValidator::new(contract))
    }
}

/// Returns the validator for the requested engine.
///
/// # Errors
///
/// Returns `EngineError::DeclarativeUnavailable` when the declarative engine
/// is requested explicitly but not compiled in.
pub fn select_validator(
    contract: &Contract,
    kind: EngineKind,
) -> Result<Box<dyn TableValidator + '_>, EngineError> {
    debug!(engine = %kind, contract = %contract.name, "Selecting validation engine");
    match kind {
        EngineKind::Auto => Ok(default_validator(contract)),
        EngineKind::Fallback => Ok(Box::new(FallbackValidator::new(contract))),
        EngineKind::Declarative => declarative(contract),
    }
}

#[cfg(feature = "arrow")]
fn declarative(contract: &Contract) -> Result<Box<dyn TableValidator + '_>, EngineError> {
    Ok(Box::new(DeclarativeValidator::new(contract)))
}

#[cfg(not(feature = "arrow"))]
fn declarative(_contract: &Contract) -> Result<Box<dyn TableValidator + '_>, EngineError> {
    Err(EngineError::DeclarativeUnavailable)
}

/// Validates a dataset with the preferred engine.
///
/// Uses the built-in flight contract when `contract` is `None`.
///
/// # Example
///
/// ```rust
/// use flights_validator::{DataSet, validate};
///
/// let dataset = DataSet::from_json_str(r#"[{"flight_id": 1}]"#).unwrap();
/// let err = validate(&dataset, None).unwrap_err();
/// assert!(err.to_string().contains("departure_time"));
/// ```
pub fn validate(dataset: &DataSet, contract: Option<&Contract>) -> Result<(), ValidationError> {
    let contract = match contract {
        Some(contract) => contract,
        None => flight_contract(),
    };
    default_validator(contract).validate(dataset)
}
