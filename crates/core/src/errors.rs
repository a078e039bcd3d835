//! Error types shared across the sync workspace.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the sync engine by its collaborators.
///
/// Each variant names the collaborator that failed so a cycle report can say
/// which step aborted the pass. The HTTP crates convert their own error
/// enums into these at the trait boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential store read/write failure.
    #[error("secret store error: {0}")]
    Secrets(String),

    /// Remote product API failure (transport, non-2xx, bad payload).
    #[error("remote store error: {0}")]
    Remote(String),

    /// Authentication failed or the auth endpoint returned no usable token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Local catalog read/write failure.
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl Error {
    pub fn secrets(message: impl Into<String>) -> Self {
        Self::Secrets(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }
}
