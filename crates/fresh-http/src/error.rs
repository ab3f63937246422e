//! Fetch error types.

use thiserror::Error;

/// Errors that can occur when fetching over the network.
///
/// These model the request *failing outright* (unreachable host, timeout,
/// malformed payload). An HTTP error status is not a `FetchError`; it comes
/// back as a regular [`crate::Response`] so callers can decide what a 304 or
/// a 503 means for them.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The network request could not be completed.
    #[error("network unreachable: {0}")]
    Unreachable(String),

    /// The request timed out.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Failed to parse the response body.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}
