//! WooCommerce REST catalog client.
//!
//! Implements the local catalog contract over the WooCommerce products API
//! (`/wp-json/wc/v3/products`), authenticated with a consumer key/secret
//! pair.

mod client;
mod error;
mod types;

pub use client::WooCatalog;
pub use error::{Result, WooError};
pub use types::*;
