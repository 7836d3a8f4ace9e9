//! # folio CLI
//!
//! Command-line front end for Folio - a transition-coordinated view router.
//!
//! ## Usage
//!
//! - `folio` - Start interactive mode
//! - `folio routes` - Show the route table
//! - `folio resolve /about` - Show the view a path resolves to
//! - `folio play / /about /missing` - Play a navigation sequence
//!
//! Animations run on timers against a terminal render engine, so the
//! output shows every mount, unmount, animation and cancellation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::{Easing, TransitionMode};
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod config;
mod output;
mod runtime;

use commands::{interactive_command, play_command, resolve_command, routes_command};
use config::SiteConfigLoader;

/// folio - A transition-coordinated view router
#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play navigation against a transition-coordinated view router")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Transition mode override (sequential, cross_fade)
    #[arg(long, global = true)]
    mode: Option<TransitionMode>,

    /// Easing override (linear, ease_out_cubic, ease_in_out_cubic)
    #[arg(long, global = true)]
    easing: Option<Easing>,

    /// Use the built-in site and ignore configuration files
    #[arg(long, global = true)]
    builtin: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route table
    Routes {
        /// Path whose navigation entry is marked active
        #[arg(long)]
        path: Option<String>,
    },

    /// Show the view a path resolves to
    Resolve {
        /// Path to resolve
        path: String,
    },

    /// Navigate through a sequence of paths
    Play {
        /// Paths to visit in order
        #[arg(required = true)]
        paths: Vec<String>,

        /// Milliseconds between navigations
        #[arg(long, default_value_t = 1000)]
        gap_ms: u64,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> SiteConfigLoader {
    let mut loader = SiteConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(mode) = cli.mode {
        loader = loader.with_mode_override(mode);
    }

    if let Some(easing) = cli.easing {
        loader = loader.with_easing_override(easing);
    }

    if cli.builtin {
        loader = loader.without_search();
    }

    loader
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let site = build_config_loader(&cli).load().await?;

    match cli.command {
        Some(Commands::Routes { path }) => routes_command(&site, path),
        Some(Commands::Resolve { path }) => resolve_command(&site, &path),
        Some(Commands::Play { paths, gap_ms }) => {
            play_command(&site, paths, Duration::from_millis(gap_ms)).await
        }
        None => interactive_command(&site).await,
    }
}
