//! HTTP client for the WooCommerce products API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;

use hotsync_core::catalog::{CatalogProduct, NewCatalogProduct, ProductCatalog, ProductFields};

use crate::error::{Result, WooError};
use crate::types::{WooApiError, WooProduct, WooProductPayload};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for a WooCommerce store's products API.
///
/// Authentication uses the store's REST consumer key/secret over HTTP basic
/// auth, the way WooCommerce provisions machine credentials.
#[derive(Debug, Clone)]
pub struct WooCatalog {
    client: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooCatalog {
    /// Create a new catalog client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The store root (e.g., "https://shop.example.com")
    /// * `consumer_key` / `consumer_secret` - WooCommerce REST credentials
    pub fn new(base_url: &str, consumer_key: &str, consumer_secret: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/wp-json/wc/v3/products", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.consumer_key, Some(&self.consumer_secret))
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
            WooError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    fn api_error(status: StatusCode, body: &str) -> WooError {
        if let Ok(error) = serde_json::from_str::<WooApiError>(body) {
            return WooError::api(status.as_u16(), format!("{}: {}", error.code, error.message));
        }
        WooError::api(status.as_u16(), format!("Request failed: {}", body))
    }

    /// Look a product up by SKU.
    ///
    /// GET /wp-json/wc/v3/products?sku={sku}
    pub async fn find_product_by_sku(&self, sku: &str) -> Result<Option<WooProduct>> {
        let url = format!("{}?sku={}", self.products_url(), urlencoding::encode(sku));
        let response = self.authorize(self.client.get(&url)).send().await?;
        let mut matches: Vec<WooProduct> = Self::parse_response(response).await?;
        debug!("sku lookup '{}' matched {} product(s)", sku, matches.len());
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.remove(0)))
        }
    }

    /// Create a product.
    ///
    /// POST /wp-json/wc/v3/products
    pub async fn create_product(&self, payload: WooProductPayload) -> Result<WooProduct> {
        let response = self
            .authorize(self.client.post(self.products_url()))
            .json(&payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Update a product by id.
    ///
    /// PUT /wp-json/wc/v3/products/{id}
    pub async fn update_product(&self, id: i64, payload: WooProductPayload) -> Result<()> {
        let url = format!("{}/{}", self.products_url(), id);
        let response = self
            .authorize(self.client.put(&url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(Self::api_error(status, &body));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for WooCatalog {
    async fn find_by_sku(&self, sku: &str) -> hotsync_core::Result<Option<CatalogProduct>> {
        let found = self.find_product_by_sku(sku).await.map_err(hotsync_core::Error::from)?;
        Ok(found.map(|product| CatalogProduct {
            id: product.id,
            sku: if product.sku.is_empty() {
                sku.to_string()
            } else {
                product.sku
            },
        }))
    }

    async fn create(&self, product: NewCatalogProduct) -> hotsync_core::Result<CatalogProduct> {
        let sku = product.sku.clone();
        let created = self
            .create_product(WooProductPayload::create(product))
            .await
            .map_err(hotsync_core::Error::from)?;
        Ok(CatalogProduct {
            id: created.id,
            sku,
        })
    }

    async fn update(&self, id: i64, fields: ProductFields) -> hotsync_core::Result<()> {
        self.update_product(id, WooProductPayload::update(fields))
            .await
            .map_err(hotsync_core::Error::from)?;
        Ok(())
    }
}
