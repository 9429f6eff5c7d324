use anyhow::{Context, Result};
use flights_core::flight_contract;
use flights_parser::to_yaml;
use std::fs::File;
use std::io::Write;
use tracing::debug;

use crate::output;

pub fn execute(output_path: Option<&str>) -> Result<()> {
    debug!("Serializing the built-in flight contract");

    let yaml = to_yaml(flight_contract()).context("Failed to serialize contract to YAML")?;

    // Output to file or stdout
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", path))?;
        output::print_success(&format!("Contract written to: {}", path));
    } else {
        print!("{}", yaml);
    }

    Ok(())
}
