use anyhow::Result;
use colored::*;
use flights_core::{Contract, ContractError, ValidationError, ValidationReport};
use serde_json::{Value, json};

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.to_string().red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    let stats = &report.stats;
    println!("\n{}", "Summary:".bold());
    println!("  Engine:         {}", stats.engine);
    println!("  Records:        {}", stats.records_validated);
    println!("  Columns:        {}", stats.columns_checked);
    println!("  Checks:         {}", stats.checks_declared);
    println!("  Total errors:   {}", report.errors.len());
    println!("  Total warnings: {}", report.warnings.len());
    println!("  Duration:       {} ms", stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "engine": report.stats.engine,
        "errors": report.errors.iter().map(violation_json).collect::<Vec<_>>(),
        "warnings": report.warnings,
        "summary": {
            "error_count": report.errors.len(),
            "warning_count": report.warnings.len(),
            "records_validated": report.stats.records_validated,
            "columns_checked": report.stats.columns_checked,
            "checks_declared": report.stats.checks_declared,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn violation_json(error: &ValidationError) -> Value {
    json!({
        "kind": error.kind(),
        "column": error.column(),
        "message": error.to_string(),
    })
}

pub fn print_contract_summary(contract: &Contract) {
    println!("\nContract Summary:");
    println!("  Name:        {}", contract.name);
    println!("  Version:     {}", contract.version);
    println!(
        "  Description: {}",
        contract.description.as_deref().unwrap_or("N/A")
    );
    println!("  Strict:      {}", contract.schema.strict);
    println!("  Coerce:      {}", contract.schema.coerce);
    println!("  Columns:     {}", contract.schema.len());
    println!("  Categories:  {}", contract.categories.len());

    println!("\nColumns:");
    for spec in &contract.schema.columns {
        let checks: Vec<&str> = spec.checks.iter().map(|c| c.kind()).collect();
        println!(
            "  {:<16} {:<10} {:<9} {}",
            spec.name,
            spec.column_type.as_str(),
            if spec.nullable { "nullable" } else { "required" },
            checks.join(", ")
        );
    }
}

pub fn print_contract_json(contract: &Contract, errors: &[ContractError]) -> Result<()> {
    let output = json!({
        "valid": errors.is_empty(),
        "name": contract.name,
        "version": contract.version,
        "columns": contract.schema.column_names().collect::<Vec<_>>(),
        "categories": contract.categories.iter().map(|c| c.column.as_str()).collect::<Vec<_>>(),
        "errors": errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
