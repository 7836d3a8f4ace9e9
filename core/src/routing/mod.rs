//! Routing: route table, router core and active-link resolution

pub mod active;
pub mod route;
pub mod router;

// Re-export commonly used types
pub use active::{active_item, is_active, nav_items, NavItem};
pub use route::{Route, RouteTable, RouteTableBuilder, ViewId, CATCH_ALL_PATH};
pub use router::{NavigationEvent, NavigationState, Router, RouterOptions, Subscription};
