//! Active-link resolution and the navigation affordance surface

use super::route::{RouteTable, ViewId};
use serde::Serialize;

/// Whether a navigation entry for `route_path` is active at `current_path`.
///
/// Exact string equality: `/resume` is not active at `/resume/download`.
pub fn is_active(route_path: &str, current_path: &str) -> bool {
    route_path == current_path
}

/// One navigation entry as a host UI renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: String,
    pub label: String,
    pub view: ViewId,
    pub active: bool,
}

/// Navigation entries in route-table order; the fallback is not listed
pub fn nav_items(table: &RouteTable, current_path: &str) -> Vec<NavItem> {
    table
        .routes()
        .iter()
        .map(|route| NavItem {
            path: route.path.clone(),
            label: route.label.clone(),
            view: route.view.clone(),
            active: is_active(&route.path, current_path),
        })
        .collect()
}

/// The single active entry, if the current path is registered
pub fn active_item(table: &RouteTable, current_path: &str) -> Option<NavItem> {
    nav_items(table, current_path)
        .into_iter()
        .find(|item| item.active)
}
