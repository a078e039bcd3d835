//! Credential storage contract.
//!
//! The job needs exactly two persisted values: the operator-provided API key
//! and the short-lived access token derived from it. Both go through this
//! trait so the engine never reaches into ambient global state; the CLI
//! provides a file-backed implementation and tests use an in-memory map.

use async_trait::async_trait;

use crate::Result;

/// Storage key for the operator-provided Hotmart API key.
pub const API_KEY_SECRET: &str = "hotmart_api_key";

/// Storage key for the current Hotmart access token.
pub const ACCESS_TOKEN_SECRET: &str = "hotmart_access_token";

/// Key/value store for sync credentials.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read a secret. `Ok(None)` means the key was never set.
    async fn get_secret(&self, key: &str) -> Result<Option<String>>;

    /// Write a secret, overwriting any previous value.
    async fn set_secret(&self, key: &str, value: &str) -> Result<()>;
}
