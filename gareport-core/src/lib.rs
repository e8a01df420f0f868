// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gareport Core
//!
//! Data model for batched Google Analytics Reporting v4 queries.
//!
//! This crate holds everything that does not touch the network:
//!
//! - [`Report`] - named, fluent report descriptor builder
//! - Wire-format request types ([`ReportRequest`], [`BatchGetRequest`], ...)
//! - Raw response types ([`BatchGetResponse`], [`RawReport`], ...)
//! - [`MetricType`] - closed coercion enum for flattening rows into
//!   [`Record`]s
//! - [`CoreError`] - structural and serialization failures
//!
//! Authentication and request orchestration live in `gareport-client`;
//! output formatting lives in `gareport-cli`.

pub mod error;
pub mod record;
pub mod report;
pub mod response;

// Re-export error types
pub use error::CoreError;

// Re-export report builder and wire request types
pub use report::{
    namespaced, BatchGetRequest, DateInput, DateRange, Dimension, Metric, Report, ReportOverrides,
    ReportRequest, GA_NAMESPACE,
};

// Re-export response types
pub use response::{
    BatchGetResponse, ColumnHeader, DateRangeValues, MetricHeader, MetricHeaderEntry, RawReport,
    ReportData, ReportRow,
};

// Re-export record flattening types
pub use record::{MetricType, Record};
