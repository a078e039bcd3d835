//! Remote product model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product as returned by the remote store's listing endpoint.
///
/// Transient: instances live for the duration of a single sync pass and are
/// never persisted by this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteProduct {
    /// Unique product key shared with the local catalog.
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
}

impl RemoteProduct {
    /// A product whose SKU is blank cannot be matched against the local
    /// catalog and must be skipped as malformed.
    pub fn has_usable_sku(&self) -> bool {
        !self.sku.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_sku_is_not_usable() {
        let product = RemoteProduct {
            sku: "  ".to_string(),
            name: "Course".to_string(),
            description: String::new(),
            price: dec!(99.90),
            stock: 10,
        };
        assert!(!product.has_usable_sku());
    }

    #[test]
    fn deserializes_from_listing_payload() {
        let product: RemoteProduct = serde_json::from_str(
            r#"{"sku":"ABC-1","name":"Course A","description":"Intro","price":99.9,"stock":10}"#,
        )
        .expect("deserialize remote product");
        assert_eq!(product.sku, "ABC-1");
        assert_eq!(product.price, dec!(99.9));
        assert!(product.has_usable_sku());
    }

    #[test]
    fn description_defaults_to_empty() {
        let product: RemoteProduct =
            serde_json::from_str(r#"{"sku":"ABC-2","name":"Course B","price":10,"stock":0}"#)
                .expect("deserialize without description");
        assert_eq!(product.description, "");
    }
}
