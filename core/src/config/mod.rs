//! Minimal configuration module for Folio core
//!
//! Only exports pure data types. All discovery and loading happens in the
//! CLI layer.

pub mod types;

pub use types::{RouteEntry, SiteConfig};
