//! Error types for the CompreFace client.

use thiserror::Error;

/// Result type alias for CompreFace operations.
pub type Result<T> = std::result::Result<T, ComprefaceError>;

/// Error type for CompreFace API operations.
#[derive(Error, Debug)]
pub enum ComprefaceError {
    /// Non-2xx response from the service.
    #[error("compreface: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// HTTP transport error.
    #[error("compreface: http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed response body.
    #[error("compreface: json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("compreface: invalid configuration: {0}")]
    Config(String),
}
