//! Error types for the WooCommerce catalog client.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, WooError>;

/// Errors that can occur while talking to the WooCommerce REST API.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the store
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl WooError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<WooError> for hotsync_core::Error {
    fn from(err: WooError) -> Self {
        hotsync_core::Error::Catalog(err.to_string())
    }
}
