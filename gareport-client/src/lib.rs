// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gareport Client
//!
//! Authentication and batched request orchestration for the Analytics
//! Reporting API.
//!
//! ## Key Types
//!
//! - [`ServiceAccountKey`] - parsed service-account credentials
//! - [`GoogleService`] - production implementation of the
//!   [`ReportingService`] seam (token exchange + `reports:batchGet`)
//! - [`Client`] - accumulates reports, authorizes, submits one batch,
//!   and drives pagination in fetch-all mode
//! - [`ApiResponse`] - ordinally-paired results with merge and
//!   flattening views
//! - [`ClientError`] - the failure taxonomy; everything is fatal and
//!   propagates
//!
//! ## Example
//!
//! ```no_run
//! use gareport_client::{run_reports, ClientOptions, ServiceAccountKey};
//! use gareport_core::Report;
//!
//! # async fn example() -> Result<(), gareport_client::ClientError> {
//! let key = ServiceAccountKey::discover(None)?;
//!
//! let mut sessions = Report::new("sessions-by-country", "123456");
//! sessions
//!     .date("2020-01-01", "2020-01-31")
//!     .metric("sessions")
//!     .dimension("country");
//!
//! let options = ClientOptions {
//!     all_results: true,
//!     ..ClientOptions::default()
//! };
//!
//! let response = run_reports(key, options, vec![sessions]).await?;
//! for records in response.to_records()? {
//!     println!("{} rows", records.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod response;
pub mod service;

#[cfg(test)]
pub(crate) mod testutil;

pub use auth::{AccessToken, SCOPE};
pub use client::{Client, ClientOptions, DEFAULT_MAX_REQUESTS};
pub use credentials::{ServiceAccountKey, ENV_CREDENTIALS};
pub use error::ClientError;
pub use response::ApiResponse;
pub use service::{GoogleService, ReportingService, BATCH_GET_URL};

use gareport_core::Report;

/// Convenience entry: builds a [`Client`] over [`GoogleService`], adds
/// every report, and runs the top-level `get`.
///
/// # Errors
///
/// Propagates [`ClientError::NoReports`] for an empty report list, plus
/// any authorization or submission failure.
pub async fn run_reports(
    key: ServiceAccountKey,
    options: ClientOptions,
    reports: Vec<Report>,
) -> Result<ApiResponse, ClientError> {
    let mut client = Client::with_options(GoogleService::new(key), options);
    for report in reports {
        client.add(report);
    }
    client.get().await
}
