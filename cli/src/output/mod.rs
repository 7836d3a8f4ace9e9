//! Terminal output helpers

mod format;

pub use format::{describe_state, menu_line, nav_rows, navigation_line};
