//! Report descriptors and their wire format.
//!
//! A [`Report`] is a mutable, fluent builder for one Analytics Reporting v4
//! report request. The builder owns the caller-assigned name (used for
//! output filenames and for naming pagination clones) plus the wire-format
//! [`ReportRequest`] that is serialized into a `reports:batchGet` body.
//!
//! Metric and dimension names are namespaced with the `ga:` prefix exactly
//! once; re-applying the prefix is a no-op, so cloned reports keep their
//! names stable.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Namespace prefix for metric and dimension names.
pub const GA_NAMESPACE: &str = "ga:";

// ============================================================================
// Wire Types
// ============================================================================

/// A start/end date pair, both formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Inclusive start date.
    pub start_date: String,
    /// Inclusive end date.
    pub end_date: String,
}

/// A metric entry (`ga:sessions`, `ga:pageviews`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Namespaced metric expression.
    pub expression: String,

    /// Optional formatting type (`INTEGER`, `PERCENT`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatting_type: Option<String>,
}

/// A dimension entry (`ga:country`, `ga:pagePath`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Namespaced dimension name.
    pub name: String,
}

/// The wire shape of one report request.
///
/// No validation is performed here: a missing `viewId` or empty metric list
/// is passed through unchanged and rejected server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    /// Analytics view (profile) ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,

    /// Ordered date ranges.
    pub date_ranges: Vec<DateRange>,

    /// Ordered metrics.
    pub metrics: Vec<Metric>,

    /// Ordered dimensions.
    pub dimensions: Vec<Dimension>,

    /// Maximum rows per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,

    /// Continuation token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// The body of a `reports:batchGet` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetRequest {
    /// Ordered report requests; results come back in the same order.
    pub report_requests: Vec<ReportRequest>,
}

// ============================================================================
// Date Input
// ============================================================================

/// A date argument: either a pre-formatted string passed through verbatim,
/// or a calendar date normalized to `YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub enum DateInput {
    /// Already-formatted date string (also covers relative values such as
    /// `7daysAgo` or `today`, which the API accepts as-is).
    Formatted(String),
    /// Calendar date, formatted on use.
    Calendar(NaiveDate),
}

impl DateInput {
    fn into_wire(self) -> String {
        match self {
            DateInput::Formatted(s) => s,
            DateInput::Calendar(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Formatted(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Formatted(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Calendar(value)
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Explicit overrides for [`Report::clone_with`].
///
/// Every field is optional; `Some` replaces the copied value wholesale,
/// `None` leaves the copy untouched.
#[derive(Debug, Clone, Default)]
pub struct ReportOverrides {
    /// Replacement view ID.
    pub view_id: Option<String>,
    /// Replacement date ranges.
    pub date_ranges: Option<Vec<DateRange>>,
    /// Replacement metrics.
    pub metrics: Option<Vec<Metric>>,
    /// Replacement dimensions.
    pub dimensions: Option<Vec<Dimension>>,
    /// Replacement page size.
    pub page_size: Option<i64>,
    /// Replacement continuation token.
    pub page_token: Option<String>,
}

// ============================================================================
// Report Builder
// ============================================================================

/// A named, mutable report descriptor.
///
/// Builder methods mutate in place and return `&mut Self` for chaining:
///
/// ```
/// use gareport_core::Report;
///
/// let mut report = Report::new("sessions-by-country", "123456");
/// report
///     .date("2020-01-01", "2020-01-31")
///     .metric("sessions")
///     .dimension("country")
///     .limit(1000);
/// ```
///
/// Not safe for concurrent mutation by multiple callers; build a report on
/// one thread, then hand it to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    name: String,
    request: ReportRequest,
}

impl Report {
    /// Creates a new report bound to a view ID.
    pub fn new(name: impl Into<String>, view_id: impl Into<String>) -> Self {
        let mut report = Self {
            name: name.into(),
            request: ReportRequest::default(),
        };
        report.view(view_id);
        report
    }

    /// Creates a report from an already-built wire request.
    ///
    /// Used when report definitions are loaded from a file rather than
    /// assembled through the builder.
    pub fn from_wire(name: impl Into<String>, request: ReportRequest) -> Self {
        Self {
            name: name.into(),
            request,
        }
    }

    /// The caller-assigned report name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read access to the wire request being built.
    pub fn request(&self) -> &ReportRequest {
        &self.request
    }

    /// Sets the view (profile) ID.
    pub fn view(&mut self, id: impl Into<String>) -> &mut Self {
        self.request.view_id = Some(id.into());
        self
    }

    /// Appends a date range.
    pub fn date(&mut self, start: impl Into<DateInput>, end: impl Into<DateInput>) -> &mut Self {
        let range = DateRange {
            start_date: start.into().into_wire(),
            end_date: end.into().into_wire(),
        };
        self.request.date_ranges.push(range);
        self
    }

    /// Replaces the date range at `index`, or appends when `index` is past
    /// the end of the sequence.
    pub fn date_at(
        &mut self,
        index: usize,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
    ) -> &mut Self {
        let range = DateRange {
            start_date: start.into().into_wire(),
            end_date: end.into().into_wire(),
        };
        replace_or_push(&mut self.request.date_ranges, index, range);
        self
    }

    /// Appends a metric, namespacing the expression.
    pub fn metric(&mut self, expression: &str) -> &mut Self {
        self.request.metrics.push(Metric {
            expression: namespaced(expression),
            formatting_type: None,
        });
        self
    }

    /// Appends a metric with an explicit formatting type.
    ///
    /// The type tag is uppercased on entry (`integer` and `INTEGER` are
    /// equivalent).
    pub fn metric_typed(&mut self, expression: &str, formatting_type: &str) -> &mut Self {
        self.request.metrics.push(Metric {
            expression: namespaced(expression),
            formatting_type: Some(formatting_type.to_uppercase()),
        });
        self
    }

    /// Replaces the metric at `index`, or appends past the end.
    pub fn metric_at(&mut self, index: usize, metric: Metric) -> &mut Self {
        replace_or_push(&mut self.request.metrics, index, metric);
        self
    }

    /// Appends a dimension, namespacing the name.
    pub fn dimension(&mut self, name: &str) -> &mut Self {
        self.request.dimensions.push(Dimension {
            name: namespaced(name),
        });
        self
    }

    /// Replaces the dimension at `index`, or appends past the end.
    pub fn dimension_at(&mut self, index: usize, dimension: Dimension) -> &mut Self {
        replace_or_push(&mut self.request.dimensions, index, dimension);
        self
    }

    /// Limits the returned row count per page.
    pub fn limit(&mut self, page_size: i64) -> &mut Self {
        self.request.page_size = Some(page_size);
        self
    }

    /// Sets the continuation token for a follow-up page request.
    pub fn page_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.request.page_token = Some(token.into());
        self
    }

    /// Deep-copies this report under a new name, then applies `overrides`
    /// field by field.
    ///
    /// Unset override fields keep the copied value; array overrides replace
    /// the whole sequence. The pagination path uses this to derive a
    /// continuation request that differs only in name and `pageToken`.
    pub fn clone_with(&self, new_name: impl Into<String>, overrides: ReportOverrides) -> Self {
        let mut request = self.request.clone();

        if let Some(view_id) = overrides.view_id {
            request.view_id = Some(view_id);
        }
        if let Some(date_ranges) = overrides.date_ranges {
            request.date_ranges = date_ranges;
        }
        if let Some(metrics) = overrides.metrics {
            request.metrics = metrics;
        }
        if let Some(dimensions) = overrides.dimensions {
            request.dimensions = dimensions;
        }
        if let Some(page_size) = overrides.page_size {
            request.page_size = Some(page_size);
        }
        if let Some(page_token) = overrides.page_token {
            request.page_token = Some(page_token);
        }

        Self {
            name: new_name.into(),
            request,
        }
    }

    /// Returns the canonical wire object for this report.
    pub fn to_wire(&self) -> ReportRequest {
        self.request.clone()
    }
}

impl fmt::Display for Report {
    /// Renders the wire request as indented JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.request).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Prepends the `ga:` namespace unless the name already carries it.
///
/// Idempotent: `namespaced(namespaced(x)) == namespaced(x)`.
pub fn namespaced(name: &str) -> String {
    if name.starts_with(GA_NAMESPACE) {
        name.to_string()
    } else {
        format!("{GA_NAMESPACE}{name}")
    }
}

fn replace_or_push<T>(items: &mut Vec<T>, index: usize, item: T) {
    if index < items.len() {
        items[index] = item;
    } else {
        items.push(item);
    }
}

// ============================================================================
// Tests
// ============================================================================
