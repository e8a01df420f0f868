//! Core error types for gareport.

use thiserror::Error;

/// Core error type for gareport data-model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A response was structurally inconsistent with its column header.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
