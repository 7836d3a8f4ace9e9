//! Route definitions and the route table
//!
//! This module defines the view identifier, the route type and the
//! immutable table that resolves paths to views.

use crate::error::RouteError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Path that marks the catch-all route in a table definition
pub const CATCH_ALL_PATH: &str = "*";

/// View id used for unmatched paths when none is configured
pub const DEFAULT_NOT_FOUND_VIEW: &str = "not-found";

/// Opaque identifier of a renderable view
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl ViewId {
    /// Create a new view ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved fallback view
    pub fn not_found() -> Self {
        Self::new(DEFAULT_NOT_FOUND_VIEW)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ViewId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ViewId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Route definition mapping an exact path to a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Exact-match path, e.g. `/about`
    pub path: String,
    /// View rendered for this path
    pub view: ViewId,
    /// Human-readable label for navigation affordances
    pub label: String,
}

impl Route {
    /// Create a new route; the label defaults to the view id
    pub fn new(path: impl Into<String>, view: impl Into<ViewId>) -> Self {
        let view = view.into();
        Self {
            path: path.into(),
            label: view.0.clone(),
            view,
        }
    }

    /// Set the label shown for this route
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Static, ordered table of routes plus one fallback view.
///
/// Built once and never mutated. Lookups are exact string matches.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
    not_found: ViewId,
}

impl RouteTable {
    /// Build a table from routes in display order.
    ///
    /// A route whose path is `*` replaces the fallback view instead of
    /// being added as a regular entry.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouteError> {
        let mut table = Self {
            routes: Vec::new(),
            index: HashMap::new(),
            not_found: ViewId::not_found(),
        };
        let mut catch_all_seen = false;

        for route in routes {
            if route.path.is_empty() {
                return Err(RouteError::EmptyPath);
            }
            if route.view.0.is_empty() {
                return Err(RouteError::EmptyView { path: route.path });
            }

            if route.path == CATCH_ALL_PATH {
                if catch_all_seen {
                    return Err(RouteError::DuplicatePath { path: route.path });
                }
                catch_all_seen = true;
                table.not_found = route.view;
                continue;
            }

            if table.index.contains_key(&route.path) {
                return Err(RouteError::DuplicatePath { path: route.path });
            }
            table.index.insert(route.path.clone(), table.routes.len());
            table.routes.push(route);
        }

        debug!(
            routes = table.routes.len(),
            not_found = %table.not_found,
            "Route table built"
        );
        Ok(table)
    }

    /// Start a builder
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Resolve a path to its view, falling back to the not-found view
    pub fn resolve(&self, path: &str) -> &ViewId {
        self.lookup(path).map_or(&self.not_found, |route| &route.view)
    }

    /// Find the route registered for exactly this path
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.index.get(path).map(|&i| &self.routes[i])
    }

    /// Whether the path has a registered route
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Routes in declaration order, the fallback excluded
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The fallback view for unmatched paths
    pub fn not_found(&self) -> &ViewId {
        &self.not_found
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for route tables
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    not_found: Option<ViewId>,
}

impl RouteTableBuilder {
    /// Add a route whose label defaults to the view id
    pub fn route(mut self, path: impl Into<String>, view: impl Into<ViewId>) -> Self {
        self.routes.push(Route::new(path, view));
        self
    }

    /// Add a route with an explicit label
    pub fn labeled(
        mut self,
        path: impl Into<String>,
        view: impl Into<ViewId>,
        label: impl Into<String>,
    ) -> Self {
        self.routes.push(Route::new(path, view).with_label(label));
        self
    }

    /// Set the fallback view. Combining this with a `*` route is rejected
    /// at build time.
    pub fn fallback(mut self, view: impl Into<ViewId>) -> Self {
        self.not_found = Some(view.into());
        self
    }

    /// Validate and build the table
    pub fn build(self) -> Result<RouteTable, RouteError> {
        if self.not_found.is_some() && self.routes.iter().any(|r| r.path == CATCH_ALL_PATH) {
            return Err(RouteError::DuplicatePath {
                path: CATCH_ALL_PATH.to_string(),
            });
        }
        let mut table = RouteTable::new(self.routes)?;
        if let Some(view) = self.not_found {
            if view.0.is_empty() {
                return Err(RouteError::EmptyView {
                    path: CATCH_ALL_PATH.to_string(),
                });
            }
            table.not_found = view;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::builder()
            .labeled("/", "home", "Home")
            .labeled("/about", "about", "About")
            .route("/resume", "resume")
            .build()
            .expect("valid table")
    }

    #[test]
    fn test_resolve_exact_match() {
        let table = table();
        assert_eq!(table.resolve("/"), &ViewId::from("home"));
        assert_eq!(table.resolve("/about"), &ViewId::from("about"));
        assert_eq!(table.resolve("/resume"), &ViewId::from("resume"));
    }

    #[test]
    fn test_unmatched_paths_fall_back() {
        let table = table();
        for path in ["/missing", "/about/", "/resume/download", "", "about", "/ABOUT"] {
            assert_eq!(table.resolve(path), &ViewId::not_found(), "path {path:?}");
        }
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = RouteTable::builder()
            .route("/", "home")
            .route("/about", "about")
            .route("/about", "other")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicatePath {
                path: "/about".to_string()
            }
        );
    }

    #[test]
    fn test_catch_all_sets_fallback() {
        let table = RouteTable::new([Route::new("/", "home"), Route::new("*", "lost")]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("/nowhere"), &ViewId::from("lost"));

        let err = RouteTable::new([Route::new("*", "a"), Route::new("*", "b")]).unwrap_err();
        assert!(matches!(err, RouteError::DuplicatePath { .. }));
    }

    #[test]
    fn test_builder_fallback_conflicts_with_catch_all() {
        let err = RouteTable::builder()
            .route("/", "home")
            .route("*", "lost")
            .fallback("gone")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicatePath {
                path: "*".to_string()
            }
        );

        let table = RouteTable::builder()
            .route("/", "home")
            .fallback("gone")
            .build()
            .unwrap();
        assert_eq!(table.resolve("/x"), &ViewId::from("gone"));
    }

    #[test]
    fn test_empty_entries_rejected() {
        assert_eq!(
            RouteTable::new([Route::new("", "home")]).unwrap_err(),
            RouteError::EmptyPath
        );
        assert!(matches!(
            RouteTable::new([Route::new("/", "")]).unwrap_err(),
            RouteError::EmptyView { .. }
        ));
    }

    #[test]
    fn test_label_defaults_to_view() {
        let table = table();
        assert_eq!(table.lookup("/resume").unwrap().label, "resume");
        assert_eq!(table.lookup("/about").unwrap().label, "About");
        assert!(table.lookup("/nope").is_none());
        assert!(table.contains("/about"));
        assert!(!table.contains("/about/"));
    }

    #[test]
    fn test_order_preserved() {
        let paths: Vec<_> = table().routes().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec!["/", "/about", "/resume"]);
    }

    #[test]
    fn test_view_id_traits() {
        let view = ViewId::from("test");
        assert_eq!(format!("{}", view), "test");
        let s: &str = view.as_ref();
        assert_eq!(s, "test");
        let s: &str = view.borrow();
        assert_eq!(s, "test");
        assert_eq!(serde_json::to_string(&view).unwrap(), "\"test\"");
    }
}
