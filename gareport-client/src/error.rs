//! Client-side errors.
//!
//! Every failure is fatal and propagates to the caller of the entry point;
//! no local recovery or retry is attempted. A batch submission is
//! all-or-nothing: one error fails the entire submission.

use gareport_core::CoreError;
use thiserror::Error;

/// Errors raised by credential handling, authorization, and submission.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential loading, key parsing, assertion signing, or token
    /// exchange failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// `submit` was called with zero report descriptors.
    #[error("Cannot submit an empty batch")]
    EmptyBatch,

    /// `get` was called with no accumulated reports.
    #[error("No reports to submit")]
    NoReports,

    /// The per-client request ceiling was exhausted before a submission
    /// attempt. Signals runaway pagination or misconfiguration.
    #[error("Request ceiling exhausted")]
    RequestCeiling,

    /// Transport or API failure during a batch submission. Not retried;
    /// the caller decides whether to re-invoke.
    #[error("Remote API error: {0}")]
    Remote(String),

    /// Two aggregates of different ordinal length were merged.
    #[error("Cannot merge responses of different lengths: {left} vs {right}")]
    MergeMismatch {
        /// Report count on the receiving side.
        left: usize,
        /// Report count on the incoming side.
        right: usize,
    },

    /// Structural failure in the core data model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Remote(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Core(CoreError::Serialization(err))
    }
}
