//! CSV output.

use std::io::Write;

use anyhow::Result;
use csv::Writer;
use gareport_core::Record;

use super::display_value;

/// Writes a header row plus one row per record.
///
/// Columns follow the report's column header order; a record missing a
/// column yields an empty cell.
pub fn write_records<W: Write>(writer: W, columns: &[String], records: &[Record]) -> Result<()> {
    let mut out = Writer::from_writer(writer);

    out.write_record(columns)?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).map(display_value).unwrap_or_default())
            .collect();
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}
