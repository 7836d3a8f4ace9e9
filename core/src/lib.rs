//! # Folio Core
//!
//! Core library for Folio - a transition-coordinated view router for
//! single-page sites.
//!
//! Paths resolve to views through an immutable route table. The router
//! owns the current path and notifies subscribers synchronously; the
//! transition coordinator sequences exit and enter animations on an
//! external render engine with last-navigation-wins cancellation; the
//! overlay menu closes itself on every navigation.

// Core modules
pub mod config;
pub mod error;
pub mod menu;
pub mod routing;
pub mod shell;
pub mod transition;

// Re-export commonly used types
pub use config::{RouteEntry, SiteConfig};
pub use error::{ConfigError, Error, Result, RouteError};
pub use menu::{MenuRegion, OverlayMenu};
pub use routing::{
    is_active, nav_items, NavItem, NavigationEvent, NavigationState, Route, RouteTable, Router,
    RouterOptions, Subscription, ViewId,
};
pub use shell::Shell;
pub use transition::{
    AnimationConfig, AnimationSpec, CompletionToken, Easing, EngineCall, Phase, RecordingEngine,
    RenderEngine, TransitionCoordinator, TransitionMode, TransitionPhase, TransitionState,
};

/// Current version of the folio-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
