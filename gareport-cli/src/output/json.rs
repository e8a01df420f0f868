//! JSON output.

use anyhow::Result;
use gareport_core::Record;
use serde::Serialize;

/// JSON output for a single report.
#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    report: &'a str,
    records: &'a [Record],
}

/// Renders one report's records as a JSON object.
pub fn render(name: &str, records: &[Record], pretty: bool) -> Result<String> {
    let output = ReportOutput {
        report: name,
        records,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    Ok(json)
}
