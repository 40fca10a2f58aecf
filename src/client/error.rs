// src/client/error.rs

use thiserror::Error;

/// Errors surfaced by the client data layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status. Carries the response body
    /// text, or the status reason when the body was empty.
    #[error("{status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced an HTTP response (no connectivity, DNS
    /// failure, connection refused).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("cache storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// True for failures where the request never reached the server. Only
    /// these are eligible for the offline fallback.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}
