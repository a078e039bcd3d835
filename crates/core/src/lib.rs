//! Domain types, collaborator traits and the sync orchestrator for the
//! Hotmart → WooCommerce catalog sync job.
//!
//! This crate has no HTTP or filesystem dependencies of its own; the engine
//! talks to the remote store, the local catalog and the credential store
//! through the traits defined here.

pub mod catalog;
pub mod errors;
pub mod product;
pub mod remote;
pub mod secrets;
pub mod sync;

pub use errors::{Error, Result};
