//! Project skeleton for a flight analytics pipeline.

use anyhow::{Context, Result};
use flights_core::flight_contract;
use flights_parser::to_yaml;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::output;

const EMPTY_NOTEBOOK: &str = r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 5}"#;

const NOTEBOOKS: [&str; 3] = [
    "notebooks/01_eda.ipynb",
    "notebooks/02_feature_testing.ipynb",
    "notebooks/99_scratchpad.ipynb",
];

const GITIGNORE: &str = "/target\n/data\n*.log\n.env\n.ipynb_checkpoints/\n";

const DOCKERFILE: &str = "\
FROM rust:1.85-slim AS build
WORKDIR /app
COPY . .
RUN cargo install flights_cli --locked --root /usr/local

FROM debian:bookworm-slim
COPY --from=build /usr/local/bin/flights /usr/local/bin/flights
COPY data_contracts /app/data_contracts
WORKDIR /app
ENTRYPOINT [\"flights\"]
";

pub fn execute(dir: &str, name: Option<&str>) -> Result<()> {
    let root = Path::new(dir);
    let project = name
        .map(str::to_string)
        .or_else(|| root.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .unwrap_or_else(|| "flight_analytics".to_string());

    info!("Scaffolding project '{}' in {}", project, root.display());

    let mut created = 0;
    let mut skipped = Vec::new();

    for (relative, content) in project_files(&project)? {
        let path = root.join(&relative);
        if is_non_empty_file(&path) {
            debug!("Keeping existing file: {}", path.display());
            skipped.push(relative);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        created += 1;
    }

    for relative in &skipped {
        output::print_info(&format!("File already exists: {}", relative));
    }
    output::print_success(&format!(
        "Project '{}' scaffolded in {} ({} files created, {} kept)",
        project,
        root.display(),
        created,
        skipped.len()
    ));

    Ok(())
}

/// Files of the skeleton, relative to the project root.
fn project_files(project: &str) -> Result<Vec<(String, String)>> {
    let raw_contract =
        to_yaml(flight_contract()).context("Failed to serialize the flight contract")?;

    let mut files = vec![
        ("data_contracts/raw_data.yaml".to_string(), raw_contract),
        (
            "data_contracts/processed_data.yaml".to_string(),
            processed_contract(project),
        ),
        ("configs/dev.yaml".to_string(), environment_config(project, "dev")),
        ("configs/prod.yaml".to_string(), environment_config(project, "prod")),
        ("configs/features.yaml".to_string(), FEATURES_CONFIG.to_string()),
        ("sql/sampling.sql".to_string(), SAMPLING_SQL.to_string()),
        ("sql/aggregations.sql".to_string(), AGGREGATIONS_SQL.to_string()),
        ("README.md".to_string(), readme(project)),
        (".gitignore".to_string(), GITIGNORE.to_string()),
        ("Makefile".to_string(), MAKEFILE.to_string()),
        ("Dockerfile".to_string(), DOCKERFILE.to_string()),
    ];
    files.extend(
        NOTEBOOKS
            .iter()
            .map(|path| (path.to_string(), EMPTY_NOTEBOOK.to_string())),
    );
    Ok(files)
}

fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}

fn processed_contract(project: &str) -> String {
    format!(
        "\
name: {project}_processed
version: 1.0.0
description: Cleaned flight records ready for feature building
schema:
  columns:
    - name: flight_id
      type: int
      checks:
        - type: range
          min: 0
    - name: duration
      type: float
      checks:
        - type: range
          min: 0
"
    )
}

fn environment_config(project: &str, environment: &str) -> String {
    let log_level = if environment == "prod" { "info" } else { "debug" };
    format!(
        "\
project: {project}
environment: {environment}
log_level: {log_level}
contracts:
  raw: data_contracts/raw_data.yaml
  processed: data_contracts/processed_data.yaml
validation:
  engine: auto
"
    )
}

fn readme(project: &str) -> String {
    format!(
        "\
# {project}

Flight analytics pipeline.

## Layout

- `data_contracts/`: contracts for raw and processed flight records
- `configs/`: per-environment settings and feature definitions
- `sql/`: sampling and aggregation queries
- `notebooks/`: exploration

## Validating data

```sh
flights validate exports/flights.json --contract data_contracts/raw_data.yaml
```
"
    )
}

const FEATURES_CONFIG: &str = "\
features:
  - name: departure_hour
    source: departure_time
  - name: route
    source: [origin, destination]
  - name: is_delayed
    source: status
";

const SAMPLING_SQL: &str = "\
-- Uniform sample of raw flight records
SELECT *
FROM flights
WHERE random() < 0.01;
";

const AGGREGATIONS_SQL: &str = "\
-- Average block time and delay rate per route
SELECT origin,
       destination,
       AVG(duration) AS avg_duration,
       AVG(CASE WHEN status = 'delayed' THEN 1.0 ELSE 0.0 END) AS delay_rate
FROM flights
GROUP BY origin, destination;
";

const MAKEFILE: &str = "\
.PHONY: check validate

check:
\tflights check data_contracts/raw_data.yaml

validate:
\tflights validate $(DATA) --contract data_contracts/raw_data.yaml
";
