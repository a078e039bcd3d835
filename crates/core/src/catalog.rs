//! Local catalog contract.
//!
//! The storefront's product store is an external collaborator: the engine
//! only looks products up by SKU and writes them through create/update. The
//! trait is intentionally narrow so the WooCommerce REST implementation and
//! the in-memory test catalog stay interchangeable.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Publication status for newly created catalog products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Publish,
    Draft,
}

/// Handle to an existing product in the local catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Catalog-assigned identifier used for updates.
    pub id: i64,
    pub sku: String,
}

/// The field set written on every upsert.
///
/// Stock management is always switched on so the remote stock count becomes
/// authoritative for the local product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub regular_price: Decimal,
    pub manage_stock: bool,
    pub stock_quantity: i32,
}

impl ProductFields {
    pub fn new(name: impl Into<String>, description: impl Into<String>, regular_price: Decimal, stock_quantity: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            regular_price,
            manage_stock: true,
            stock_quantity,
        }
    }
}

/// Payload for creating a product that does not exist locally yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCatalogProduct {
    pub sku: String,
    pub status: ProductStatus,
    #[serde(flatten)]
    pub fields: ProductFields,
}

/// Storefront product store, keyed by SKU.
///
/// Invariant: at most one product per SKU. The sync job never deletes.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Look a product up by its SKU.
    async fn find_by_sku(&self, sku: &str) -> Result<Option<CatalogProduct>>;

    /// Create a new product and return its handle.
    async fn create(&self, product: NewCatalogProduct) -> Result<CatalogProduct>;

    /// Overwrite the managed field set of an existing product.
    async fn update(&self, id: i64, fields: ProductFields) -> Result<()>;
}
