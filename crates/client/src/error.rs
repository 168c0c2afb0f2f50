//! Upstream source error types.

use std::sync::Arc;

/// Errors from a vacancy source (API client or scraper).
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Non-2xx HTTP response.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SourceError::Timeout } else { SourceError::Network(Arc::new(err)) }
    }
}

impl From<SourceError> for vacstat_core::Error {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Timeout => vacstat_core::Error::UpstreamTimeout("upstream request timed out".into()),
            SourceError::Parse(msg) => vacstat_core::Error::Parse(msg),
            other => vacstat_core::Error::Upstream(other.to_string()),
        }
    }
}
