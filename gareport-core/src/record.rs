//! Flattening report rows into plain records.
//!
//! A [`Record`] maps column names to values: dimension columns keep their
//! raw string values, metric columns are coerced according to the type tag
//! declared in the column header.

use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;
use crate::response::RawReport;

/// One flattened row: column name to coerced value.
pub type Record = serde_json::Map<String, Value>;

/// How a metric column's raw string value is coerced.
///
/// Anything other than `INTEGER` or `PERCENT` (including an absent tag)
/// passes the raw value through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricType {
    /// Parse as a whole number.
    Integer,
    /// Parse as a float, render as a two-decimal percentage string.
    Percent,
    /// Pass through unchanged.
    #[default]
    Passthrough,
}

impl MetricType {
    /// Maps a header type tag onto a coercion kind.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("INTEGER") => MetricType::Integer,
            Some("PERCENT") => MetricType::Percent,
            _ => MetricType::Passthrough,
        }
    }

    /// Coerces one raw value.
    ///
    /// Values that fail to parse under their declared type are passed
    /// through as raw strings rather than dropped.
    pub fn coerce(self, raw: &str) -> Value {
        match self {
            MetricType::Integer => match raw.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::from(raw),
            },
            MetricType::Percent => match raw.parse::<f64>() {
                Ok(f) => Value::from(format!("{f:.2}%")),
                Err(_) => Value::from(raw),
            },
            MetricType::Passthrough => Value::from(raw),
        }
    }
}

impl RawReport {
    /// Flattens every row into a [`Record`].
    ///
    /// Dimension columns are keyed by dimension name and carry the raw
    /// string; metric columns are keyed by metric expression and coerced by
    /// declared type. Only the first metric-value set per row is read (the
    /// per-metric single-value convention of the remote API).
    ///
    /// # Errors
    ///
    /// Fails with [`CoreError::InvalidData`] when a row is shorter than its
    /// column header promises.
    pub fn flatten(&self) -> Result<Vec<Record>, CoreError> {
        let dimensions = &self.column_header.dimensions;
        let entries = &self.column_header.metric_header.metric_header_entries;

        debug!(rows = self.data.rows.len(), "flattening report rows");

        self.data
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let mut record = Record::new();

                for (i, name) in dimensions.iter().enumerate() {
                    let value = row.dimensions.get(i).ok_or_else(|| {
                        CoreError::InvalidData(format!(
                            "row {row_index} is missing dimension value {i} ({name})"
                        ))
                    })?;
                    record.insert(name.clone(), Value::from(value.as_str()));
                }

                let first_range = row.metrics.first();
                for (i, entry) in entries.iter().enumerate() {
                    let raw = first_range.and_then(|range| range.values.get(i)).ok_or_else(
                        || {
                            CoreError::InvalidData(format!(
                                "row {row_index} is missing metric value {i} ({})",
                                entry.name
                            ))
                        },
                    )?;
                    let kind = MetricType::from_tag(entry.metric_type.as_deref());
                    record.insert(entry.name.clone(), kind.coerce(raw));
                }

                Ok(record)
            })
            .collect()
    }
}
