//! The built-in flight records contract.
//!
//! Used whenever a caller does not supply a contract of its own.

use crate::{CategoryTable, ColumnBuilder, ColumnType, Contract, ContractBuilder};
use once_cell::sync::Lazy;

/// Airports served by the pipeline.
pub const AIRPORTS: [&str; 5] = ["JFK", "LAX", "SFO", "ORD", "ATL"];

/// Flight status values.
pub const FLIGHT_STATUSES: [&str; 3] = ["on_time", "delayed", "cancelled"];

/// Operating airlines.
pub const AIRLINES: [&str; 4] = ["Delta", "United", "American", "Southwest"];

static FLIGHT_CONTRACT: Lazy<Contract> = Lazy::new(build_flight_contract);

/// Returns the process-wide flight contract.
pub fn flight_contract() -> &'static Contract {
    &FLIGHT_CONTRACT
}

/// Category table for the flight contract.
pub fn flight_categories() -> CategoryTable {
    CategoryTable::new()
        .with("origin", AIRPORTS)
        .with("destination", AIRPORTS)
        .with("status", FLIGHT_STATUSES)
        .with("airline", AIRLINES)
}

fn build_flight_contract() -> Contract {
    ContractBuilder::new("flights")
        .version("1.0.0")
        .description("Raw flight records exported from the operational store")
        .column(
            ColumnBuilder::new("flight_id", ColumnType::Int)
                .description("Flight identifier")
                .ge(0.0)
                .build(),
        )
        .column(ColumnBuilder::new("departure_time", ColumnType::Timestamp).build())
        .column(ColumnBuilder::new("arrival_time", ColumnType::Timestamp).build())
        .column(
            ColumnBuilder::new("origin", ColumnType::String)
                .is_in(AIRPORTS)
                .build(),
        )
        .column(
            ColumnBuilder::new("destination", ColumnType::String)
                .is_in(AIRPORTS)
                .build(),
        )
        .column(
            ColumnBuilder::new("duration", ColumnType::Float)
                .description("Block time in minutes")
                .ge(0.0)
                .build(),
        )
        .column(
            ColumnBuilder::new("airline", ColumnType::String)
                .is_in(AIRLINES)
                .build(),
        )
        .column(
            ColumnBuilder::new("status", ColumnType::String)
                .is_in(FLIGHT_STATUSES)
                .build(),
        )
        .categories(flight_categories())
        .build()
}
