//! # Flight Contracts Validator
//!
//! Validation engines for flight data contracts. This crate loads tabular
//! datasets and checks them against a [`flights_core::Contract`]:
//!
//! - Dataset model and JSON loading (extended JSON dates, ids and longs)
//! - Declarative engine (feature `arrow`): coercion, strictness,
//!   nullability and every check, all violations reported at once
//! - Fallback engine: presence, types, categories and bounds, first
//!   violation only
//! - Contract definition checks
//!
//! ## Example
//!
//! ```rust
//! use flights_core::flight_contract;
//! use flights_validator::{DataSet, EngineKind, select_validator};
//!
//! let dataset = DataSet::from_json_str(r#"[{
//!     "flight_id": 1,
//!     "departure_time": {"$date": "2024-03-01T08:00:00Z"},
//!     "arrival_time": {"$date": "2024-03-01T11:00:00Z"},
//!     "origin": "JFK",
//!     "destination": "LAX",
//!     "duration": 180.0,
//!     "airline": "Delta",
//!     "status": "on_time"
//! }]"#).unwrap();
//!
//! let validator = select_validator(flight_contract(), EngineKind::Auto).unwrap();
//! let report = validator.validate_with_report(&dataset);
//!
//! if report.passed {
//!     println!("Validation passed!");
//! } else {
//!     println!("Validation failed: {:?}", report.errors);
//! }
//! # assert!(report.passed);
//! ```

mod coerce;
mod constraints;
mod dataset;
#[cfg(feature = "arrow")]
mod declarative;
mod definition;
mod engine;
mod error;
mod fallback;
mod loader;

pub use coerce::*;
pub use constraints::*;
pub use dataset::*;
#[cfg(feature = "arrow")]
pub use declarative::*;
pub use definition::*;
pub use engine::*;
pub use error::*;
pub use fallback::*;
