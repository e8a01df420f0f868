//! Output sinks for flattened report records.

pub mod csv;
pub mod json;
pub mod table;


use anyhow::Result;
use gareport_client::ApiResponse;
use serde_json::Value;

use crate::{Cli, OutputFormat};

/// Renders every report in the response to stdout in the selected format.
pub fn render(response: &ApiResponse, cli: &Cli) -> Result<()> {
    let records = response.to_records()?;

    for (index, report) in response.reports().iter().enumerate() {
        let name = response.requests()[index].name();
        let columns = report.column_names();

        match cli.format {
            OutputFormat::Table => {
                let formatter = table::TableFormatter::new(!cli.no_color);
                print!("{}", formatter.format(name, &columns, &records[index]));
            }
            OutputFormat::Csv => {
                csv::write_records(std::io::stdout().lock(), &columns, &records[index])?;
            }
            OutputFormat::Json => {
                println!("{}", json::render(name, &records[index], cli.pretty)?);
            }
        }
    }

    Ok(())
}

/// Renders one record value for tabular output.
///
/// Strings print bare (no JSON quoting); everything else uses its JSON
/// rendering.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
