//! # Flight Contracts Core
//!
//! Core data structures and types for validating flight records.
//!
//! This crate provides the building blocks for describing what a tabular
//! flight dataset must look like, and for reporting how a dataset failed to
//! conform.
//!
//! ## Key Concepts
//!
//! - **Contract**: A named, versioned schema plus its category table
//! - **Schema**: Ordered column specifications with `strict` and `coerce` options
//! - **Check**: A rule on column values (range, allowed values, pattern)
//! - **Category Table**: The permitted values of each categorical column
//! - **ValidationError**: The violation taxonomy shared by every engine
//!
//! ## Example
//!
//! ```rust
//! use flights_core::{flight_contract, ColumnType};
//!
//! let contract = flight_contract();
//! let flight_id = contract.schema.column("flight_id").unwrap();
//! assert_eq!(flight_id.column_type, ColumnType::Int);
//! assert_eq!(contract.categories.get("status").unwrap().len(), 3);
//! ```

pub mod builder;
pub mod contract;
pub mod error;
pub mod flight;
pub mod report;

pub use builder::*;
pub use contract::*;
pub use error::*;
pub use flight::*;
pub use report::*;
