//! Wire types for the WooCommerce products REST API.

use hotsync_core::catalog::{NewCatalogProduct, ProductFields, ProductStatus};
use serde::{Deserialize, Serialize};

/// The slice of a product record this client reads back.
#[derive(Debug, Clone, Deserialize)]
pub struct WooProduct {
    pub id: i64,
    #[serde(default)]
    pub sku: String,
}

/// Error envelope returned by WooCommerce on failed requests.
#[derive(Debug, Deserialize)]
pub struct WooApiError {
    pub code: String,
    pub message: String,
}

/// Create/update payload for a product.
///
/// WooCommerce serializes prices as JSON strings; `regular_price` is
/// converted from the decimal field set here. `sku` and `status` are only
/// sent on create.
#[derive(Debug, Serialize)]
pub struct WooProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub name: String,
    pub description: String,
    pub regular_price: String,
    pub manage_stock: bool,
    pub stock_quantity: i32,
}

impl WooProductPayload {
    pub fn update(fields: ProductFields) -> Self {
        Self {
            sku: None,
            status: None,
            name: fields.name,
            description: fields.description,
            regular_price: fields.regular_price.to_string(),
            manage_stock: fields.manage_stock,
            stock_quantity: fields.stock_quantity,
        }
    }

    pub fn create(product: NewCatalogProduct) -> Self {
        let status = match product.status {
            ProductStatus::Publish => "publish",
            ProductStatus::Draft => "draft",
        };
        let mut payload = Self::update(product.fields);
        payload.sku = Some(product.sku);
        payload.status = Some(status.to_string());
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_payload_carries_sku_status_and_string_price() {
        let payload = WooProductPayload::create(NewCatalogProduct {
            sku: "NEW-1".to_string(),
            status: ProductStatus::Publish,
            fields: ProductFields::new("Course", "Desc", dec!(99.90), 10),
        });
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["sku"], "NEW-1");
        assert_eq!(json["status"], "publish");
        assert_eq!(json["regular_price"], "99.90");
        assert_eq!(json["manage_stock"], true);
        assert_eq!(json["stock_quantity"], 10);
    }

    #[test]
    fn update_payload_omits_sku_and_status() {
        let payload = WooProductPayload::update(ProductFields::new("Course", "Desc", dec!(5), 1));
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert!(json.get("sku").is_none());
        assert!(json.get("status").is_none());
    }
}
