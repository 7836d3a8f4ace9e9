//! Single path resolution

use anyhow::Result;
use folio_core::SiteConfig;

/// Print the view a path resolves to
pub fn resolve_command(config: &SiteConfig, path: &str) -> Result<()> {
    let table = config.route_table()?;
    println!("{}", table.resolve(path));
    Ok(())
}
