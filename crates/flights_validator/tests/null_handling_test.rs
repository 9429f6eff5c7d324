//! Tests to verify correct handling of null values across both engines.
//!
//! This test suite ensures that null values are handled consistently:
//! - The declarative engine enforces nullability and skips nulls in checks
//! - The fallback engine rejects nulls in non-nullable columns through its
//!   type and category phases, and skips them in bounds
//! - An all-null nullable column conforms to any declared type

use flights_core::{ColumnBuilder, ColumnType, Contract, ContractBuilder, ValidationError, flight_contract};
use flights_validator::{DataSet, DataValue, EngineKind, TableValidator, select_validator};

fn contract(nullable: bool) -> Contract {
    ContractBuilder::new("flights")
        .column(
            ColumnBuilder::new("status", ColumnType::String)
                .nullable(nullable)
                .is_in(["on_time", "delayed"])
                .build(),
        )
        .column(
            ColumnBuilder::new("duration", ColumnType::Float)
                .nullable(true)
                .ge(0.0)
                .build(),
        )
        .category("status", ["on_time", "delayed"])
        .build()
}

fn dataset() -> DataSet {
    DataSet::from_records(vec![
        vec![("status", DataValue::from("on_time")), ("duration", DataValue::Float(10.0))],
        vec![("status", DataValue::Null), ("duration", DataValue::Null)],
    ])
}

#[cfg(feature = "arrow")]
#[test]
fn test_null_in_non_nullable_column_fails_declarative() {
    let contract = contract(false);
    let validator = select_validator(&contract, EngineKind::Declarative).unwrap();

    let report = validator.validate_with_report(&dataset());

    assert!(!report.passed, "Null in non-nullable column should fail");
    assert_eq!(report.errors.len(), 1);
    assert!(
        report.errors[0].to_string().contains("null"),
        "Error should mention null: {}",
        report.errors[0]
    );
}

#[cfg(feature = "arrow")]
#[test]
fn test_null_in_nullable_column_passes_declarative() {
    let contract = contract(true);
    let validator = select_validator(&contract, EngineKind::Declarative).unwrap();

    let report = validator.validate_with_report(&dataset());
    assert!(report.passed, "Unexpected errors: {:?}", report.errors);
}

#[test]
fn test_fallback_rejects_null_category_value() {
    let contract = contract(false);
    let validator = select_validator(&contract, EngineKind::Fallback).unwrap();

    assert_eq!(
        validator.validate(&dataset()),
        Err(ValidationError::category_violation("status", ["null"]))
    );
}

#[test]
fn test_fallback_accepts_nulls_in_nullable_columns() {
    let contract = contract(true);
    let validator = select_validator(&contract, EngineKind::Fallback).unwrap();

    assert_eq!(validator.validate(&dataset()), Ok(()));
}

fn flight_row(flight_id: DataValue, origin: DataValue) -> Vec<(&'static str, DataValue)> {
    vec![
        ("flight_id", flight_id),
        ("departure_time", DataValue::from("2024-03-01T08:00:00Z")),
        ("arrival_time", DataValue::from("2024-03-01T11:00:00Z")),
        ("origin", origin),
        ("destination", DataValue::from("LAX")),
        ("duration", DataValue::Float(180.0)),
        ("airline", DataValue::from("Delta")),
        ("status", DataValue::from("on_time")),
    ]
}

#[test]
fn test_nulls_in_flight_records_fail_every_engine() {
    let json = r#"[
        {"flight_id": 1, "departure_time": {"$date": "2024-03-01T08:00:00Z"},
         "arrival_time": {"$date": "2024-03-01T11:00:00Z"}, "origin": null,
         "destination": "LAX", "duration": 180.0, "airline": "Delta", "status": "on_time"},
        {"flight_id": null, "departure_time": {"$date": "2024-03-02T08:00:00Z"},
         "arrival_time": {"$date": "2024-03-02T11:00:00Z"}, "origin": "JFK",
         "destination": "SFO", "duration": 330.0, "airline": "United", "status": "delayed"}
    ]"#;
    let dataset = DataSet::from_json_str(json).unwrap();

    let fallback = select_validator(flight_contract(), EngineKind::Fallback).unwrap();
    assert_eq!(
        fallback.validate(&dataset),
        Err(ValidationError::type_mismatch("flight_id", "float64", "int64"))
    );

    let validator = select_validator(flight_contract(), EngineKind::Auto).unwrap();
    assert!(validator.validate(&dataset).is_err());
}

#[test]
fn test_fallback_reports_null_origin_once_types_conform() {
    let dataset = DataSet::from_records(vec![
        flight_row(DataValue::Int(1), DataValue::Null),
        flight_row(DataValue::Int(2), DataValue::from("JFK")),
    ]);
    let contract = ContractBuilder::new("flights")
        .column(ColumnBuilder::new("flight_id", ColumnType::Int).ge(0.0).build())
        .column(ColumnBuilder::new("origin", ColumnType::String).build())
        .strict(false)
        .category("origin", ["JFK", "LAX"])
        .build();
    let validator = select_validator(&contract, EngineKind::Fallback).unwrap();

    assert_eq!(
        validator.validate(&dataset),
        Err(ValidationError::category_violation("origin", ["null"]))
    );
}

#[test]
fn test_all_null_column_conforms_to_any_type() {
    let contract = contract(true);
    let dataset = DataSet::from_columns(vec![
        ("status", vec![DataValue::Null, DataValue::Null]),
        ("duration", vec![DataValue::Null, DataValue::Null]),
    ])
    .unwrap();

    for kind in [EngineKind::Auto, EngineKind::Fallback] {
        let validator = select_validator(&contract, kind).unwrap();
        assert_eq!(validator.validate(&dataset), Ok(()), "engine {}", validator.name());
    }
}
