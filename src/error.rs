//! Error types for Desk API operations.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during Desk API operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Configuration is missing or incomplete.
    #[error("Desk configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request body could not be encoded as JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Query parameters could not be encoded.
    #[error("Failed to encode query string: {0}")]
    Query(#[from] serde_qs::Error),

    /// The outbound request could not be assembled.
    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The call exceeded its deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the call.
    #[error("Request cancelled")]
    Cancelled,

    /// The server answered with a status the operation does not accept.
    #[error("Unexpected status code: {status}, body: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body did not match the expected envelope.
    #[error("Failed to parse response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// A middleware or custom transport aborted the call.
    #[error("Request aborted: {0}")]
    Aborted(String),
}

impl DeskError {
    /// The HTTP status carried by an unexpected-status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the call stopped because of cancellation or a deadline.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled | Self::Timeout(_) => true,
            Self::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for Desk operations.
pub type Result<T> = core::result::Result<T, DeskError>;
