//! Raw `reports:batchGet` response model.
//!
//! These types mirror the wire shape returned by the reporting endpoint.
//! Parsing is tolerant: the API omits `rows` entirely for empty result
//! sets, so collection fields default rather than fail.

use serde::{Deserialize, Serialize};

/// The full batched response: one [`RawReport`] per submitted request,
/// in the same ordinal position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchGetResponse {
    /// Ordinally-aligned report results.
    pub reports: Vec<RawReport>,
}

/// One report's raw result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReport {
    /// Column metadata for the rows below.
    pub column_header: ColumnHeader,

    /// Row data for this page.
    pub data: ReportData,

    /// Continuation token; present when more rows exist beyond this page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl RawReport {
    /// Column names in header order: dimensions first, then metric
    /// expressions. Output sinks use this to keep tabular column order
    /// stable across rows.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = self.column_header.dimensions.clone();
        names.extend(
            self.column_header
                .metric_header
                .metric_header_entries
                .iter()
                .map(|entry| entry.name.clone()),
        );
        names
    }
}

/// Dimension names plus metric header entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnHeader {
    /// Namespaced dimension names, in row order.
    pub dimensions: Vec<String>,

    /// Metric header block.
    pub metric_header: MetricHeader,
}

/// Wrapper around the metric header entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricHeader {
    /// One entry per requested metric, in row order.
    pub metric_header_entries: Vec<MetricHeaderEntry>,
}

/// Name and optional type tag for one metric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricHeaderEntry {
    /// Namespaced metric expression.
    pub name: String,

    /// Declared value type (`INTEGER`, `PERCENT`, ...). Kept as the raw
    /// tag so responses re-serialize losslessly; coercion interprets it.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
}

/// Row data plus row-count metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    /// Rows in this page. Pagination merges append here.
    pub rows: Vec<ReportRow>,

    /// Total matching rows across all pages, as reported by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,

    /// Per-date-range totals.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<DateRangeValues>,
}

/// One result row: dimension values plus per-date-range metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRow {
    /// Dimension values, aligned with the header's dimension names.
    pub dimensions: Vec<String>,

    /// One value set per requested date range.
    pub metrics: Vec<DateRangeValues>,
}

/// Metric values for one date range, aligned with the metric header
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRangeValues {
    /// Raw string values as returned by the server.
    pub values: Vec<String>,
}
