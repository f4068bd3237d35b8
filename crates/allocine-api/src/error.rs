//! Error type for Allocine API operations.

use thiserror::Error;

/// Errors surfaced by Allocine API operations.
///
/// Request-scoped variants carry the failing URL so callers can log or retry
/// at their level; nothing is retried internally and no partially populated
/// object is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AllocineError {
    /// A caller-supplied parameter name collides with one of the reserved
    /// authentication parameters (`partner`, `sed`, `sig`).
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// The assembled request string does not parse as a well-formed URL.
    #[error("invalid URL `{url}`")]
    InvalidUrl {
        /// The string that failed to parse.
        url: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The HTTP round trip failed: connection error, timeout, body read
    /// failure, or a non-success status from the server.
    #[error("transport failure for `{url}`")]
    Transport {
        /// The request URL.
        url: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body does not match the expected JSON shape.
    #[error("failed to map response from `{url}`")]
    Mapping {
        /// The request URL.
        url: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}
