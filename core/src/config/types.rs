//! Site configuration types
//!
//! Core only accepts fully loaded configuration and validates it before a
//! router is built from it.

use crate::error::{ConfigError, Result};
use crate::routing::{Route, RouteTable, ViewId, CATCH_ALL_PATH};
use crate::transition::AnimationConfig;
use serde::{Deserialize, Serialize};

/// One route as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub view: ViewId,
    /// Navigation label; defaults to the view id
    #[serde(default)]
    pub label: Option<String>,
}

impl RouteEntry {
    pub fn new(path: &str, view: &str, label: &str) -> Self {
        Self {
            path: path.to_string(),
            view: ViewId::from(view),
            label: Some(label.to_string()),
        }
    }
}

impl From<&RouteEntry> for Route {
    fn from(entry: &RouteEntry) -> Self {
        let route = Route::new(entry.path.clone(), entry.view.clone());
        match &entry.label {
            Some(label) => route.with_label(label.clone()),
            None => route,
        }
    }
}

/// Complete site configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Path the router starts at
    #[serde(default = "default_initial_path")]
    pub initial_path: String,
    /// View rendered for unmatched paths
    #[serde(default = "ViewId::not_found")]
    pub not_found_view: ViewId,
    /// Routes in navigation order
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub animation: AnimationConfig,
}

fn default_initial_path() -> String {
    "/".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            initial_path: default_initial_path(),
            not_found_view: ViewId::not_found(),
            routes: vec![
                RouteEntry::new("/", "hero", "Home"),
                RouteEntry::new("/about", "about", "About"),
                RouteEntry::new("/projects", "projects", "Projects"),
                RouteEntry::new("/skills", "skills", "Skills"),
                RouteEntry::new("/articles", "articles", "Articles"),
                RouteEntry::new("/profiles", "profiles", "Profiles"),
                RouteEntry::new("/resume", "resume", "Resume"),
                RouteEntry::new("/contact", "contact", "Contact"),
            ],
            animation: AnimationConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.routes.is_empty() {
            return Err(ConfigError::MissingField {
                field: "routes".to_string(),
            }
            .into());
        }

        if self.initial_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "initial_path".to_string(),
                value: String::new(),
            }
            .into());
        }

        if let Some(entry) = self
            .routes
            .iter()
            .find(|entry| entry.label.as_deref().is_some_and(|l| l.trim().is_empty()))
        {
            return Err(ConfigError::InvalidValue {
                field: format!("routes[{}].label", entry.path),
                value: String::new(),
            }
            .into());
        }

        self.animation.validate()?;
        self.route_table()?;
        Ok(())
    }

    /// Build the route table; duplicate paths are fatal
    pub fn route_table(&self) -> Result<RouteTable> {
        // An explicit `*` entry wins over `not_found_view`
        let has_catch_all = self.routes.iter().any(|entry| entry.path == CATCH_ALL_PATH);
        let fallback = (!has_catch_all)
            .then(|| Route::new(CATCH_ALL_PATH, self.not_found_view.clone()));
        let routes = self.routes.iter().map(Route::from).chain(fallback);
        Ok(RouteTable::new(routes)?)
    }
}
