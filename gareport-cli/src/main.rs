// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Gareport CLI - batched Google Analytics reporting queries.
//!
//! # Examples
//!
//! ```bash
//! # One report from flags, printed as an aligned table
//! gareport query --view-id 123456 --metrics sessions --dimensions country
//!
//! # Typed metrics and an explicit date range
//! gareport query --view-id 123456 \
//!     --start 2020-01-01 --end 2020-01-31 \
//!     --metrics sessions=integer,bounceRate=percent \
//!     --dimensions country --all
//!
//! # Several reports from a definition file, one CSV file per report
//! gareport batch reports.json --out-dir ./out --all
//!
//! # Verify credentials without querying
//! gareport check
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gareport_client::ClientError;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{batch, check, query};

// ============================================================================
// CLI Definition
// ============================================================================

/// Gareport CLI - batched Analytics Reporting v4 queries.
#[derive(Parser)]
#[command(name = "gareport")]
#[command(about = "Batched Google Analytics reporting queries")]
#[command(long_about = r#"
Gareport builds Analytics Reporting v4 report requests, submits them in a
single batched call, and reshapes the paginated result into flat records.

Credentials are a service-account key file, found via --credentials,
GOOGLE_APPLICATION_CREDENTIALS, or ~/.config/gareport/credentials.json.

Examples:
  gareport query --view-id 123456 --metrics sessions --dimensions country
  gareport batch reports.json --out-dir ./out --all
  gareport check
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a service-account key file.
    #[arg(long, short = 'c', global = true)]
    pub credentials: Option<PathBuf>,

    /// Output format (table, csv, or json).
    #[arg(long, short = 'f', default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one report built from flags.
    #[command(visible_alias = "q")]
    Query(query::QueryArgs),

    /// Run a batch of reports from a JSON definition file.
    #[command(visible_alias = "b")]
    Batch(batch::BatchArgs),

    /// Load credentials and authorize, without querying.
    Check,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned columns per report.
    #[default]
    Table,
    /// CSV rows per report.
    Csv,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Credential or token-exchange failure.
    AuthError = 2,
    /// Request ceiling exhausted.
    CeilingExceeded = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("gareport=debug,info")
    } else {
        EnvFilter::new("gareport=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ClientError>() {
        Some(ClientError::Auth(_)) => ExitCode::AuthError,
        Some(ClientError::RequestCeiling) => ExitCode::CeilingExceeded,
        _ => ExitCode::Error,
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Query(args) => query::run(args, &cli).await,
        Commands::Batch(args) => batch::run(args, &cli).await,
        Commands::Check => check::run(&cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(exit_code_for(&e) as i32);
    }

    Ok(())
}
