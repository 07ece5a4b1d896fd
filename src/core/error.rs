//! Error types and error handling for the Gemini relay.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (HTTP status
//! codes, response bodies) is handled in the adapter modules.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Fixed user-facing message for tier exhaustion.
///
/// Callers never learn which tier failed or why.
pub const EXHAUSTED_MESSAGE: &str =
    "Sorry, I'm having trouble generating a response. Please try again.";

/// Main error type for the relay service
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Generation timed out after {0:?}")]
    GenerationTimeout(Duration),

    #[error("Search is not configured: {0}")]
    SearchUnconfigured(String),

    #[error("Search backend error: {message}. Status code: {status}")]
    SearchBackend { status: u16, message: String },

    #[error("{EXHAUSTED_MESSAGE}")]
    PipelineExhausted,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl RelayError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error should push the pipeline to the next tier
    pub fn is_tier_failure(&self) -> bool {
        matches!(
            self,
            RelayError::Generation(_)
                | RelayError::MalformedResponse(_)
                | RelayError::GenerationTimeout(_)
                | RelayError::Http(_)
                | RelayError::SerdeError(_)
        )
    }

    /// Check if this error came from the search side
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            RelayError::SearchUnconfigured(_)
                | RelayError::SearchBackend { .. }
                | RelayError::InvalidQuery(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            RelayError::InvalidRequest(_) | RelayError::InvalidQuery(_)
        )
    }
}
