//! Hotmart REST API client: authentication, token validation and product
//! listing.

mod client;
mod error;
mod types;

pub use client::{HotmartClient, DEFAULT_API_URL};
pub use error::{HotmartError, Result};
pub use types::*;
