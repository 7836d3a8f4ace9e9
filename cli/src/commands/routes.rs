//! Route table listing

use crate::output;
use anyhow::Result;
use folio_core::{nav_items, SiteConfig};
use tracing::debug;

/// Print every route with the entry active at `path` marked
pub fn routes_command(config: &SiteConfig, path: Option<String>) -> Result<()> {
    let table = config.route_table()?;
    let current = path.unwrap_or_else(|| config.initial_path.clone());
    debug!(current = %current, "Listing routes");

    for row in output::nav_rows(&nav_items(&table, &current)) {
        println!("{}", row);
    }
    if !table.contains(&current) {
        println!("  {} is not registered, renders {}", current, table.resolve(&current));
    }
    println!("  {:<8} {}", "*", table.not_found());
    Ok(())
}
