use anyhow::{Context, Result};
use flights_validator::{DataSet, EngineKind, select_validator};
use std::path::Path;
use tracing::info;

use crate::commands::load_contract;
use crate::output;

pub fn execute(
    data_path: &str,
    contract_path: Option<&str>,
    engine: &str,
    format: &str,
) -> Result<()> {
    info!("Validating dataset: {}", data_path);
    info!("Engine: {}", engine);

    let contract = load_contract(contract_path)?;
    output::print_info(&format!(
        "Contract loaded: {} v{} ({} columns)",
        contract.name,
        contract.version,
        contract.schema.len()
    ));

    let kind: EngineKind = engine.parse()?;
    let validator = select_validator(&contract, kind)?;

    let dataset = DataSet::from_path(Path::new(data_path))
        .with_context(|| format!("Failed to load dataset: {}", data_path))?;
    output::print_info(&format!(
        "Dataset loaded: {} rows, {} columns",
        dataset.len(),
        dataset.num_columns()
    ));

    let report = validator.validate_with_report(&dataset);

    // Print the validation report
    output::print_validation_report(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
