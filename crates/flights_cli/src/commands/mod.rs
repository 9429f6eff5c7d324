pub mod check;
pub mod init;
pub mod scaffold;
pub mod validate;

use anyhow::{Context, Result};
use flights_core::{Contract, flight_contract};
use flights_parser::parse_file;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the contract file when none is given.
pub const CONTRACT_ENV: &str = "FLIGHTS_CONTRACT";

/// Loads the contract from `path`, then `$FLIGHTS_CONTRACT`, then the built-in flight contract.
pub fn load_contract(path: Option<&str>) -> Result<Contract> {
    let path = path
        .map(str::to_string)
        .or_else(|| std::env::var(CONTRACT_ENV).ok().filter(|p| !p.is_empty()));

    match path {
        Some(path) => {
            info!("Loading contract: {}", path);
            parse_file(Path::new(&path))
                .with_context(|| format!("Failed to parse contract file: {}", path))
        }
        None => {
            debug!("No contract given, using the built-in flight contract");
            Ok(flight_contract().clone())
        }
    }
}
