//! The `query` command: one report built from flags.

use anyhow::Result;
use gareport_client::{run_reports, ClientOptions, ServiceAccountKey, DEFAULT_MAX_REQUESTS};
use gareport_core::Report;

use crate::output;
use crate::Cli;

/// Arguments for the query command.
#[derive(clap::Args)]
pub struct QueryArgs {
    /// Analytics view (profile) ID.
    #[arg(long)]
    pub view_id: String,

    /// Start date (`YYYY-MM-DD`, or relative values like `7daysAgo`).
    #[arg(long, default_value = "7daysAgo")]
    pub start: String,

    /// End date (`YYYY-MM-DD`, or relative values like `today`).
    #[arg(long, default_value = "today")]
    pub end: String,

    /// Comma-separated metric expressions. Append `=TYPE` for an explicit
    /// formatting type, e.g. `sessions,bounceRate=percent`.
    #[arg(long, value_delimiter = ',', required = true)]
    pub metrics: Vec<String>,

    /// Comma-separated dimension names.
    #[arg(long, value_delimiter = ',')]
    pub dimensions: Vec<String>,

    /// Report name, used for headers and CSV filenames.
    #[arg(long, default_value = "report")]
    pub name: String,

    /// Maximum rows per page.
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Fetch all pages until no continuation token remains.
    #[arg(long)]
    pub all: bool,

    /// Submission ceiling (safety valve against runaway pagination).
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS)]
    pub max_requests: u32,
}

/// Runs the query command.
pub async fn run(args: &QueryArgs, cli: &Cli) -> Result<()> {
    let key = ServiceAccountKey::discover(cli.credentials.as_deref())?;

    let mut report = Report::new(&args.name, &args.view_id);
    report.date(args.start.as_str(), args.end.as_str());

    for metric in &args.metrics {
        match metric.split_once('=') {
            Some((expression, formatting_type)) => {
                report.metric_typed(expression, formatting_type);
            }
            None => {
                report.metric(metric);
            }
        }
    }
    for dimension in &args.dimensions {
        report.dimension(dimension);
    }
    if let Some(page_size) = args.page_size {
        report.limit(page_size);
    }

    let options = ClientOptions {
        max_requests: args.max_requests,
        all_results: args.all,
    };

    let response = run_reports(key, options, vec![report]).await?;
    output::render(&response, cli)
}
