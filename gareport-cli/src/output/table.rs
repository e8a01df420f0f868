//! Aligned-column table output.

use gareport_core::Record;

use super::display_value;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";

/// Column gutter between cells.
const GUTTER: &str = "  ";

/// Table formatter with optional colors.
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats one report as a header line plus aligned columns.
    pub fn format(&self, name: &str, columns: &[String], records: &[Record]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Report: {}", self.cyan(name)));

        if records.is_empty() {
            lines.push("(no rows)".to_string());
            lines.push(String::new());
            return lines.join("\n");
        }

        // Cell text per row, in column order.
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).map(display_value).unwrap_or_default())
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(column.chars().count())
            })
            .collect();

        lines.push(self.bold(&self.pad_row(
            &columns.iter().map(String::as_str).collect::<Vec<_>>(),
            &widths,
        )));

        for row in &rows {
            lines.push(self.pad_row(&row.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
        }

        lines.push(String::new());
        lines.join("\n")
    }

    fn pad_row(&self, cells: &[&str], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(GUTTER)
            .trim_end()
            .to_string()
    }

    fn cyan(&self, text: &str) -> String {
        if self.use_colors {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
