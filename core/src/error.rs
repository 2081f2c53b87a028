//! Error types for the Stellar Burgers API client.
//!
//! # Design
//! Only failures below the HTTP layer are errors. A 4xx or 5xx reply is an
//! ordinary `ApiResponse` for the caller to assert against. `Timeout` is split
//! out from the other transport failures because callers treat a hung server
//! differently from one that refused the connection.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `ApiClient` and `ApiResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response arrived within the client's configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// DNS, connection, TLS or protocol failure.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The JSON request body could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body is not the JSON the caller asked for.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}
