//! Remote product API contract.

use async_trait::async_trait;

use crate::product::RemoteProduct;
use crate::Result;

/// The remote store's HTTP API as the engine sees it.
///
/// One implementation talks to the real Hotmart endpoints; tests substitute
/// a scripted mock. Every call is a single attempt — retry policy, if any,
/// belongs to the scheduler tick, not to this seam.
#[async_trait]
pub trait RemoteStoreApi: Send + Sync {
    /// Exchange the long-lived API key for an access token.
    ///
    /// An `Ok` return always carries a non-empty token; a success response
    /// without one is reported as an authentication error.
    async fn authenticate(&self, api_key: &str) -> Result<String>;

    /// Ask the remote API whether `access_token` is still valid.
    ///
    /// `Err` means the answer could not be determined (transport failure);
    /// callers must not treat that as either verdict.
    async fn check_token(&self, access_token: &str) -> Result<bool>;

    /// Fetch the full remote product list.
    ///
    /// Malformed records (missing or blank SKU) are skipped by the
    /// implementation and never appear in the returned sequence.
    async fn list_products(&self, access_token: &str) -> Result<Vec<RemoteProduct>>;
}
