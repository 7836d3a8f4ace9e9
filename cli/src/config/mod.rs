//! Configuration discovery for the CLI

pub mod loader;

pub use loader::SiteConfigLoader;
