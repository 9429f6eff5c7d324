//! Parser for flight data contracts (YAML/TOML formats).
//!
//! This module provides functionality to parse contracts from YAML and TOML files
//! into the strongly-typed `Contract` structure, and to write them back as YAML.
//!
//! # Example
//!
//! ```rust
//! use flights_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: flights
//! version: "1.0.0"
//! schema:
//!   columns:
//!     - name: flight_id
//!       type: int
//!       checks:
//!         - type: range
//!           min: 0
//! categories: []
//! "#;
//!
//! let contract = parse_yaml(yaml).expect("Failed to parse contract");
//! assert_eq!(contract.name, "flights");
//! assert!(contract.schema.strict);
//! ```

use flights_core::Contract;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during contract parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported contract file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a contract from a YAML string.
///
/// # Example
///
/// ```rust
/// use flights_parser::parse_yaml;
///
/// let yaml = r#"
/// name: my_dataset
/// schema:
///   strict: false
///   columns:
///     - name: id
///       type: int
/// "#;
///
/// let contract = parse_yaml(yaml).unwrap();
/// assert_eq!(contract.version, "1.0.0");
/// assert!(!contract.schema.strict);
/// ```
pub fn parse_yaml(content: &str) -> Result<Contract> {
    let contract: Contract = serde_yaml_ng::from_str(content)?;
    Ok(contract)
}

/// Parse a contract from a TOML string.
///
/// # Example
///
/// ```rust
/// use flights_parser::parse_toml;
///
/// let toml = r#"
/// name = "my_dataset"
///
/// [schema]
/// coerce = false
///
/// [[schema.columns]]
/// name = "id"
/// type = "int"
/// "#;
///
/// let contract = parse_toml(toml).unwrap();
/// assert_eq!(contract.name, "my_dataset");
/// assert!(!contract.schema.coerce);
/// ```
pub fn parse_toml(content: &str) -> Result<Contract> {
    let contract: Contract =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(contract)
}

/// Serialize a contract to YAML.
pub fn to_yaml(contract: &Contract) -> Result<String> {
    Ok(serde_yaml_ng::to_string(contract)?)
}

/// Detect the contract format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `ContractFormat::Yaml`
/// * `.toml` → `ContractFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ContractFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ContractFormat::Yaml),
        "toml" => Ok(ContractFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a contract from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use flights_parser::parse_file;
/// use std::path::Path;
///
/// let contract = parse_file(Path::new("data_contracts/raw_data.yaml")).unwrap();
/// println!("Loaded contract: {}", contract.name);
/// ```
pub fn parse_file(path: &Path) -> Result<Contract> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ContractFormat::Yaml => parse_yaml(&content),
        ContractFormat::Toml => parse_toml(&content),
    }
}
