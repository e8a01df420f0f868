//! The `batch` command: several reports from a JSON definition file.
//!
//! The file holds an array of named wire-format requests:
//!
//! ```json
//! [
//!   {
//!     "name": "sessions-by-country",
//!     "viewId": "123456",
//!     "dateRanges": [{"startDate": "2020-01-01", "endDate": "2020-01-31"}],
//!     "metrics": [{"expression": "ga:sessions"}],
//!     "dimensions": [{"name": "ga:country"}]
//!   }
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gareport_client::{
    run_reports, ApiResponse, ClientOptions, ServiceAccountKey, DEFAULT_MAX_REQUESTS,
};
use gareport_core::{Report, ReportRequest};
use serde::Deserialize;
use tracing::info;

use crate::output;
use crate::Cli;

/// Arguments for the batch command.
#[derive(clap::Args)]
pub struct BatchArgs {
    /// JSON file with an array of named report definitions.
    pub file: PathBuf,

    /// Write one `<name>.csv` per report into this directory instead of
    /// printing.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Fetch all pages until no continuation token remains.
    #[arg(long)]
    pub all: bool,

    /// Submission ceiling (safety valve against runaway pagination).
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS)]
    pub max_requests: u32,
}

/// One named report definition from the file.
#[derive(Debug, Deserialize)]
struct ReportDefinition {
    name: String,
    #[serde(flatten)]
    request: ReportRequest,
}

/// Runs the batch command.
pub async fn run(args: &BatchArgs, cli: &Cli) -> Result<()> {
    let key = ServiceAccountKey::discover(cli.credentials.as_deref())?;

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let definitions: Vec<ReportDefinition> = serde_json::from_str(&content)
        .with_context(|| format!("invalid report definitions in {}", args.file.display()))?;

    let reports = definitions
        .into_iter()
        .map(|definition| Report::from_wire(definition.name, definition.request))
        .collect();

    let options = ClientOptions {
        max_requests: args.max_requests,
        all_results: args.all,
    };

    let response = run_reports(key, options, reports).await?;

    match &args.out_dir {
        Some(out_dir) => write_csv_files(&response, out_dir, cli),
        None => output::render(&response, cli),
    }
}

/// Writes one CSV file per report, named after the report.
fn write_csv_files(response: &ApiResponse, out_dir: &Path, cli: &Cli) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    let records = response.to_records()?;

    for (index, report) in response.reports().iter().enumerate() {
        let name = response.requests()[index].name();
        let path = out_dir.join(format!("{name}.csv"));

        let file = fs::File::create(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        output::csv::write_records(file, &report.column_names(), &records[index])?;

        info!(path = %path.display(), "Wrote report");
        if !cli.quiet {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
