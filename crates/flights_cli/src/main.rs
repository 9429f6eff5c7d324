mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flights")]
#[command(version, about = "Flight data contracts CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dataset (JSON, JSON Lines) against a contract
    Validate {
        /// Path to the dataset file (.json, .jsonl, .ndjson)
        data: String,

        /// Path to the contract file (YAML or TOML); falls back to $FLIGHTS_CONTRACT,
        /// then the built-in flight contract
        #[arg(short, long)]
        contract: Option<String>,

        /// Validation engine: auto, declarative, fallback
        #[arg(short, long, default_value = "auto")]
        engine: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a contract definition without validating data
    Check {
        /// Path to the contract file (YAML or TOML); falls back to $FLIGHTS_CONTRACT,
        /// then the built-in flight contract
        contract: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write the built-in flight contract as YAML
    Init {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Create the flight analytics project skeleton
    Scaffold {
        /// Target directory
        dir: String,

        /// Project name used in generated files (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            data,
            contract,
            engine,
            format,
        } => commands::validate::execute(&data, contract.as_deref(), &engine, &format),

        Commands::Check { contract, format } => {
            commands::check::execute(contract.as_deref(), &format)
        }

        Commands::Init { output } => commands::init::execute(output.as_deref()),

        Commands::Scaffold { dir, name } => commands::scaffold::execute(&dir, name.as_deref()),
    }
}
