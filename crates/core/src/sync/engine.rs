//! Sync cycle engine: token check, refresh-on-demand, fetch and upsert.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::{NewCatalogProduct, ProductCatalog, ProductFields, ProductStatus};
use crate::product::RemoteProduct;
use crate::remote::RemoteStoreApi;
use crate::secrets::{SecretStore, ACCESS_TOKEN_SECRET, API_KEY_SECRET};
use crate::Result;

/// Validity verdict for the stored access token.
///
/// `Indeterminate` means the check endpoint could not be reached. That is
/// not "still valid": a pass that cannot tell must abort rather than call
/// the product API with a possibly stale token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValidity {
    Valid,
    Expired,
    Indeterminate,
}

/// Terminal status of one sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Ok,
    /// Another pass held the cycle lock; this tick did nothing.
    AlreadyRunning,
    ConfigError,
    TokenIndeterminate,
    AuthError,
    FetchError,
    UpsertError,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Ok => "ok",
            SyncStatus::AlreadyRunning => "already_running",
            SyncStatus::ConfigError => "config_error",
            SyncStatus::TokenIndeterminate => "token_indeterminate",
            SyncStatus::AuthError => "auth_error",
            SyncStatus::FetchError => "fetch_error",
            SyncStatus::UpsertError => "upsert_error",
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub status: SyncStatus,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub duration_ms: i64,
    pub error: Option<String>,
}

impl SyncReport {
    pub fn succeeded(&self) -> bool {
        self.status == SyncStatus::Ok
    }
}

/// Tracks mutable progress during a sync cycle.
struct Cycle {
    started_at: Instant,
    created: usize,
    updated: usize,
    skipped: usize,
}

impl Cycle {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            created: 0,
            updated: 0,
            skipped: 0,
        }
    }

    fn report(&self, status: SyncStatus, error: Option<String>) -> SyncReport {
        SyncReport {
            status,
            created: self.created,
            updated: self.updated,
            skipped: self.skipped,
            duration_ms: self.started_at.elapsed().as_millis() as i64,
            error,
        }
    }

    /// Record a cycle failure: log it, then return the terminal report.
    fn fail(&self, status: SyncStatus, message: impl Into<String>) -> SyncReport {
        let message = message.into();
        warn!("sync pass aborted ({}): {}", status, message);
        self.report(status, Some(message))
    }
}

enum Upserted {
    Created,
    Updated,
}

/// Orchestrates one full sync pass per invocation.
///
/// All collaborators are injected; the engine owns no ambient state beyond
/// the cycle lock that keeps overlapping scheduler ticks from racing on the
/// stored token or double-writing the catalog.
pub struct SyncEngine {
    secrets: Arc<dyn SecretStore>,
    remote: Arc<dyn RemoteStoreApi>,
    catalog: Arc<dyn ProductCatalog>,
    cycle_lock: Mutex<()>,
}

impl SyncEngine {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        remote: Arc<dyn RemoteStoreApi>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            secrets,
            remote,
            catalog,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Store the operator-provided API key and immediately exchange it for
    /// an access token.
    ///
    /// The key stays stored even when the exchange fails, so a later
    /// scheduled pass can retry the authentication.
    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        self.secrets.set_secret(API_KEY_SECRET, api_key).await?;
        let token = self.remote.authenticate(api_key).await?;
        self.secrets.set_secret(ACCESS_TOKEN_SECRET, &token).await?;
        info!("api key stored and initial access token obtained");
        Ok(())
    }

    /// Run one sync pass: `CheckingToken → {Refreshing,} Fetching →
    /// Upserting`, strictly sequential.
    ///
    /// Never panics and never returns `Err`: every failure mode is folded
    /// into the report so the scheduler loop just logs it and waits for the
    /// next tick.
    pub async fn run_cycle(&self) -> SyncReport {
        let Ok(_guard) = self.cycle_lock.try_lock() else {
            debug!("previous sync pass still running, skipping this tick");
            return SyncReport {
                status: SyncStatus::AlreadyRunning,
                created: 0,
                updated: 0,
                skipped: 0,
                duration_ms: 0,
                error: None,
            };
        };
        let mut cycle = Cycle::new();

        let api_key = match self.secrets.get_secret(API_KEY_SECRET).await {
            Ok(Some(key)) if !key.trim().is_empty() => key,
            Ok(_) => {
                return cycle.fail(
                    SyncStatus::ConfigError,
                    "no API key configured; set one before running the sync",
                );
            }
            Err(err) => {
                return cycle.fail(SyncStatus::ConfigError, format!("failed to read API key: {}", err));
            }
        };

        let stored_token = match self.secrets.get_secret(ACCESS_TOKEN_SECRET).await {
            Ok(value) => value.filter(|token| !token.trim().is_empty()),
            Err(err) => {
                return cycle.fail(
                    SyncStatus::ConfigError,
                    format!("failed to read access token: {}", err),
                );
            }
        };

        let access_token = match (self.token_validity(stored_token.as_deref()).await, stored_token) {
            (TokenValidity::Indeterminate, _) => {
                return cycle.fail(
                    SyncStatus::TokenIndeterminate,
                    "token validity could not be determined; aborting pass",
                );
            }
            (TokenValidity::Valid, Some(token)) => token,
            _ => {
                // Single refresh attempt per pass; the fresh token is used
                // directly without a second check round trip.
                let fresh = match self.remote.authenticate(&api_key).await {
                    Ok(token) => token,
                    Err(err) => {
                        return cycle.fail(SyncStatus::AuthError, format!("authentication failed: {}", err));
                    }
                };
                if let Err(err) = self.secrets.set_secret(ACCESS_TOKEN_SECRET, &fresh).await {
                    return cycle.fail(
                        SyncStatus::AuthError,
                        format!("failed to persist refreshed access token: {}", err),
                    );
                }
                info!("access token refreshed");
                fresh
            }
        };

        let products = match self.remote.list_products(&access_token).await {
            Ok(products) => products,
            Err(err) => {
                return cycle.fail(SyncStatus::FetchError, format!("product fetch failed: {}", err));
            }
        };
        debug!("fetched {} products from remote store", products.len());

        for product in &products {
            if !product.has_usable_sku() {
                warn!("skipping remote product '{}' with blank sku", product.name);
                cycle.skipped += 1;
                continue;
            }
            match self.upsert(product).await {
                Ok(Upserted::Created) => cycle.created += 1,
                Ok(Upserted::Updated) => cycle.updated += 1,
                Err(err) => {
                    // Each upsert is its own unit of work: earlier writes
                    // stay committed, the rest of the list is unattempted.
                    return cycle.fail(
                        SyncStatus::UpsertError,
                        format!("upsert failed for sku {}: {}", product.sku, err),
                    );
                }
            }
        }

        info!(
            "sync pass complete: {} created, {} updated, {} skipped",
            cycle.created, cycle.updated, cycle.skipped
        );
        cycle.report(SyncStatus::Ok, None)
    }

    /// Classify the stored token. An absent token counts as expired; a
    /// transport failure on the check endpoint yields `Indeterminate`.
    async fn token_validity(&self, token: Option<&str>) -> TokenValidity {
        let Some(token) = token else {
            debug!("no stored access token");
            return TokenValidity::Expired;
        };
        match self.remote.check_token(token).await {
            Ok(true) => TokenValidity::Valid,
            Ok(false) => {
                debug!("stored access token is expired");
                TokenValidity::Expired
            }
            Err(err) => {
                warn!("token check failed: {}", err);
                TokenValidity::Indeterminate
            }
        }
    }

    async fn upsert(&self, product: &RemoteProduct) -> Result<Upserted> {
        let fields = ProductFields::new(
            product.name.clone(),
            product.description.clone(),
            product.price,
            product.stock,
        );
        match self.catalog.find_by_sku(&product.sku).await? {
            Some(existing) => {
                self.catalog.update(existing.id, fields).await?;
                debug!("updated catalog product {} (sku {})", existing.id, product.sku);
                Ok(Upserted::Updated)
            }
            None => {
                let created = self
                    .catalog
                    .create(NewCatalogProduct {
                        sku: product.sku.clone(),
                        status: ProductStatus::Publish,
                        fields,
                    })
                    .await?;
                debug!("created catalog product {} (sku {})", created.id, product.sku);
                Ok(Upserted::Created)
            }
        }
    }
}
