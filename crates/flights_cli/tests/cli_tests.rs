use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the flights binary
#[allow(deprecated)]
fn flights() -> Command {
    let mut cmd = Command::cargo_bin("flights").expect("Failed to find flights binary");
    cmd.env_remove("FLIGHTS_CONTRACT");
    cmd
}

/// Extracts the JSON document printed after any log lines
fn json_output(stdout: &[u8]) -> serde_json::Value {
    let output_str = String::from_utf8_lossy(stdout);
    let json_start = output_str.find('{').expect("Should contain JSON object");
    serde_json::from_str(&output_str[json_start..]).expect("Output should be valid JSON")
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_builtin_contract() {
    flights()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract definition is valid"))
        .stdout(predicate::str::contains("flights"))
        .stdout(predicate::str::contains("departure_time"))
        .stdout(predicate::str::contains("Categories:  4"));
}

#[test]
fn test_check_yaml_contract() {
    flights()
        .arg("check")
        .arg(fixture_path("contract.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("flights_scenario"))
        .stdout(predicate::str::contains("1.2.0"))
        .stdout(predicate::str::contains("Columns:     3"));
}

#[test]
fn test_check_toml_contract() {
    flights()
        .arg("check")
        .arg(fixture_path("contract.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("flights_toml"))
        .stdout(predicate::str::contains("Strict:      false"));
}

#[test]
fn test_check_contract_from_env() {
    flights()
        .env("FLIGHTS_CONTRACT", fixture_path("contract.toml"))
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("flights_toml"));
}

#[test]
fn test_check_invalid_contract() {
    flights()
        .arg("check")
        .arg(fixture_path("invalid_contract.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_bad_definition() {
    flights()
        .arg("check")
        .arg(fixture_path("bad_definition.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate column name: flight_id"))
        .stderr(predicate::str::contains("min 10 is greater than max 1"))
        .stderr(predicate::str::contains("3 error(s)"));
}

#[test]
fn test_check_json_output() {
    let output = flights()
        .arg("check")
        .arg("--format")
        .arg("json")
        .arg(fixture_path("contract.yml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = json_output(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["name"], "flights_scenario");
    assert_eq!(json["columns"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_check_missing_file() {
    flights()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_valid_flights() {
    flights()
        .arg("validate")
        .arg(fixture_path("valid_flights.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Records:        2"));
}

#[test]
fn test_validate_valid_flights_fallback() {
    flights()
        .arg("validate")
        .arg("--engine")
        .arg("fallback")
        .arg(fixture_path("valid_flights.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("fallback"));
}

#[test]
fn test_validate_invalid_flights_fallback_reports_first_violation() {
    flights()
        .arg("validate")
        .arg("--engine")
        .arg("fallback")
        .arg(fixture_path("invalid_flights.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("Column 'origin' has invalid values: {'XXX'}"))
        .stdout(predicate::str::contains("Total errors:   1"));
}

#[test]
fn test_validate_missing_columns_fallback() {
    flights()
        .arg("validate")
        .arg("-e")
        .arg("fallback")
        .arg(fixture_path("missing_columns.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Missing columns: [departure_time, arrival_time, destination, airline, status]",
        ));
}

#[test]
fn test_validate_null_flights_fallback() {
    flights()
        .arg("validate")
        .arg("--engine")
        .arg("fallback")
        .arg(fixture_path("null_flights.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Column 'flight_id' has dtype float64, expected int64",
        ));
}

#[test]
fn test_validate_with_contract_file() {
    flights()
        .arg("validate")
        .arg("--contract")
        .arg(fixture_path("contract.yml"))
        .arg(fixture_path("flights.jsonl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("flights_scenario"))
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn test_validate_contract_from_env() {
    flights()
        .env("FLIGHTS_CONTRACT", fixture_path("contract.yml"))
        .arg("validate")
        .arg("--engine")
        .arg("fallback")
        .arg(fixture_path("scenario_invalid.jsonl"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("flights_scenario"))
        .stdout(predicate::str::contains("'XXX'"));
}

#[test]
fn test_validate_json_output() {
    let output = flights()
        .arg("validate")
        .arg("--engine")
        .arg("fallback")
        .arg("--format")
        .arg("json")
        .arg(fixture_path("invalid_flights.json"))
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let json = json_output(&output);
    assert_eq!(json["passed"], false);
    assert_eq!(json["engine"], "fallback");
    assert_eq!(json["errors"][0]["kind"], "category_violation");
    assert_eq!(json["errors"][0]["column"], "origin");
    assert_eq!(json["summary"]["records_validated"], 2);
    assert_eq!(json["summary"]["checks_declared"], 6);
}

#[test]
fn test_validate_unknown_engine() {
    flights()
        .arg("validate")
        .arg("--engine")
        .arg("pandas")
        .arg(fixture_path("valid_flights.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown validation engine"));
}

#[test]
fn test_validate_missing_data_file() {
    flights()
        .arg("validate")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dataset"));
}

#[test]
fn test_validate_unsupported_data_format() {
    flights()
        .arg("validate")
        .arg(fixture_path("contract.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported dataset format"));
}

#[cfg(feature = "arrow")]
#[test]
fn test_validate_invalid_flights_declarative_reports_all() {
    flights()
        .arg("validate")
        .arg("--engine")
        .arg("declarative")
        .arg(fixture_path("invalid_flights.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("declarative"))
        .stdout(predicate::str::contains("flight_id"))
        .stdout(predicate::str::contains("duration"))
        .stdout(predicate::str::contains("'XXX'"))
        .stdout(predicate::str::contains("Total errors:   3"));
}

#[cfg(feature = "arrow")]
#[test]
fn test_validate_strict_rejects_extra_columns() {
    flights()
        .arg("validate")
        .arg(fixture_path("export_with_ids.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Column '_id' is not declared in the schema"));

    flights()
        .arg("validate")
        .arg("--engine")
        .arg("fallback")
        .arg(fixture_path("export_with_ids.json"))
        .assert()
        .success();
}

// ============================================================================
// init command tests
// ============================================================================

#[test]
fn test_init_stdout() {
    flights()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("name: flights"))
        .stdout(predicate::str::contains("flight_id"))
        .stdout(predicate::str::contains("allowed_values"));
}

#[test]
fn test_init_with_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("raw_data.yaml");

    flights()
        .arg("init")
        .arg("--output")
        .arg(output_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract written to"));

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("departure_time"));

    flights()
        .arg("check")
        .arg(output_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract definition is valid"));
}

// ============================================================================
// scaffold command tests
// ============================================================================

#[test]
fn test_scaffold_creates_skeleton() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("flight_analytics");

    flights()
        .arg("scaffold")
        .arg(root.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'flight_analytics' scaffolded"));

    for relative in [
        "data_contracts/raw_data.yaml",
        "data_contracts/processed_data.yaml",
        "configs/dev.yaml",
        "configs/prod.yaml",
        "configs/features.yaml",
        "sql/sampling.sql",
        "sql/aggregations.sql",
        "notebooks/01_eda.ipynb",
        "README.md",
        ".gitignore",
        "Makefile",
        "Dockerfile",
    ] {
        assert!(root.join(relative).is_file(), "missing {}", relative);
    }

    let notebook = fs::read_to_string(root.join("notebooks/99_scratchpad.ipynb")).unwrap();
    let notebook: serde_json::Value = serde_json::from_str(&notebook).unwrap();
    assert_eq!(notebook["nbformat"], 4);

    flights()
        .arg("check")
        .arg(root.join("data_contracts/processed_data.yaml").to_str().unwrap())
        .assert()
        .success();
}

#[test]
fn test_scaffold_keeps_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("README.md"), "# mine\n").unwrap();
    fs::create_dir_all(root.join("sql")).unwrap();
    fs::write(root.join("sql/sampling.sql"), "").unwrap();

    flights()
        .arg("scaffold")
        .arg(root.to_str().unwrap())
        .arg("--name")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("File already exists: README.md"))
        .stdout(predicate::str::contains("1 kept"));

    assert_eq!(fs::read_to_string(root.join("README.md")).unwrap(), "# mine\n");
    assert!(!fs::read_to_string(root.join("sql/sampling.sql")).unwrap().is_empty());
    assert!(
        fs::read_to_string(root.join("configs/dev.yaml"))
            .unwrap()
            .contains("project: demo")
    );
}

#[test]
fn test_help_lists_commands() {
    flights()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("scaffold"));
}
