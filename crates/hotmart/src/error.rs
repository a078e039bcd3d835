//! Error types for the Hotmart API client.

use thiserror::Error;

/// Result type alias for Hotmart API operations.
pub type Result<T> = std::result::Result<T, HotmartError>;

/// Errors that can occur while talking to the Hotmart API.
#[derive(Debug, Error)]
pub enum HotmartError {
    /// HTTP transport error (network, timeout, DNS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication succeeded at the transport level but produced no
    /// usable access token
    #[error("authentication error: {0}")]
    Auth(String),
}

impl HotmartError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// True when the call never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl From<HotmartError> for hotsync_core::Error {
    fn from(err: HotmartError) -> Self {
        match err {
            HotmartError::Auth(message) => hotsync_core::Error::Auth(message),
            other => hotsync_core::Error::Remote(other.to_string()),
        }
    }
}
