//! Transport error taxonomy
//!
//! Every API operation fails with one of three observable categories:
//! the request never completed ([`ApiError::Network`] / [`ApiError::Timeout`]),
//! the server answered with a non-success status ([`ApiError::Http`]), or the
//! body could not be decoded into the expected shape ([`ApiError::Decode`]).
//! HTTP errors keep the response payload so callers can inspect the backend's
//! `detail` message; no variant is retried silently.

use std::time::Duration;

use thiserror::Error;

/// API operation errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request could not be completed (DNS, connect, broken pipe, ...)
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}")]
    Http {
        status: u16,
        /// Parsed response body, when the server sent JSON
        payload: Option<serde_json::Value>,
    },

    /// The response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// Client construction or configuration failed
    #[error("configuration error: {0}")]
    Config(String),

    /// The request exceeded the configured timeout
    #[error("timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// HTTP status code, when the server produced a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `detail` message, when present in the error payload
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { payload: Some(payload), .. } => {
                payload.get("detail").and_then(|d| d.as_str())
            }
            _ => None,
        }
    }

    /// Whether a caller-driven retry could plausibly succeed.
    ///
    /// Server errors and transport failures are transient; client errors,
    /// decode mismatches, and configuration problems are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Decode(_) | Self::Config(_) => false,
        }
    }

    /// True for a 404 response
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
