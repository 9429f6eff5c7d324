use anyhow::{Result, bail};
use flights_validator::validate_definition;
use tracing::info;

use crate::commands::load_contract;
use crate::output;

pub fn execute(contract_path: Option<&str>, format: &str) -> Result<()> {
    info!("Checking contract definition");

    let contract = load_contract(contract_path)?;
    let errors = validate_definition(&contract);

    match format {
        "json" => output::print_contract_json(&contract, &errors)?,
        _ => {
            output::print_info(&format!(
                "Contract loaded: {} v{}",
                contract.name, contract.version
            ));
            if errors.is_empty() {
                output::print_success("Contract definition is valid");
            } else {
                for error in &errors {
                    output::print_error(&error.to_string());
                }
            }
            output::print_contract_summary(&contract);
        }
    }

    if !errors.is_empty() {
        bail!("Contract definition has {} error(s)", errors.len());
    }

    Ok(())
}
