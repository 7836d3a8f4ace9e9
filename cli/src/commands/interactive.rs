//! Interactive mode command
//!
//! Reads one command per line and drives the shell between lines, so
//! animation completions fire on their timers while the prompt waits.

use crate::output;
use crate::runtime::Driver;
use anyhow::{Context, Result};
use folio_core::{MenuRegion, SiteConfig};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

const HELP: &str =
    "commands: <path> | back | menu | inside | outside | items | state | help | quit";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Navigate(String),
    Back,
    ToggleMenu,
    Pointer(MenuRegion),
    Items,
    State,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl InputCommand {
    /// Parse a trimmed input line
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => InputCommand::Empty,
            "back" => InputCommand::Back,
            "menu" => InputCommand::ToggleMenu,
            "inside" => InputCommand::Pointer(MenuRegion::Inside),
            "outside" => InputCommand::Pointer(MenuRegion::Outside),
            "items" => InputCommand::Items,
            "state" => InputCommand::State,
            "help" | "?" => InputCommand::Help,
            "quit" | "exit" | "q" => InputCommand::Quit,
            path if path.starts_with('/') => InputCommand::Navigate(path.to_string()),
            other => InputCommand::Unknown(other.to_string()),
        }
    }
}

/// Start interactive mode on stdin/stdout
pub async fn interactive_command(config: &SiteConfig) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", HELP)?;
    run_session(config, stdin, &mut stdout).await
}

/// Run a session over any line source and writer
pub async fn run_session<R, W>(config: &SiteConfig, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut driver = Driver::new(config)?;
    let mut lines = input.lines();
    driver.flush(out)?;

    loop {
        let deadline = driver.next_due();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("Input closed");
                    break;
                };
                if !handle(&mut driver, InputCommand::parse(&line), out)? {
                    break;
                }
            }
            _ = wait_for(deadline) => {
                driver.fire_due();
            }
        }
        driver.flush(out)?;
    }

    driver.settle().await;
    driver.flush(out)?;
    writeln!(out, "state: {}", output::describe_state(&driver.state()))?;
    Ok(())
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => futures::future::pending().await,
    }
}

/// Apply one command; returns false to end the session
fn handle<W: Write>(driver: &mut Driver, command: InputCommand, out: &mut W) -> Result<bool> {
    match command {
        InputCommand::Navigate(path) => driver.navigate(&path),
        InputCommand::Back => {
            if !driver.go_back() {
                writeln!(out, "no history")?;
            }
        }
        InputCommand::ToggleMenu => driver.toggle_menu(),
        InputCommand::Pointer(region) => driver.pointer_down(region),
        InputCommand::Items => {
            for row in output::nav_rows(&driver.nav_items()) {
                writeln!(out, "{}", row)?;
            }
        }
        InputCommand::State => {
            writeln!(out, "state: {}", output::describe_state(&driver.state()))?;
            let mounted = driver.shell().with_engine(|engine| engine.mounted().cloned());
            match mounted {
                Some(view) => writeln!(out, "mounted: {}", view)?,
                None => writeln!(out, "mounted: none")?,
            }
        }
        InputCommand::Help => writeln!(out, "{}", HELP)?,
        InputCommand::Quit => return Ok(false),
        InputCommand::Empty => {}
        InputCommand::Unknown(other) => writeln!(out, "unknown command: {} ({})", other, HELP)?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn session(script: &str) -> String {
        let mut out = Vec::new();
        run_session(&SiteConfig::default(), script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(InputCommand::parse(" /about "), InputCommand::Navigate("/about".into()));
        assert_eq!(InputCommand::parse("outside"), InputCommand::Pointer(MenuRegion::Outside));
        assert_eq!(InputCommand::parse("q"), InputCommand::Quit);
        assert_eq!(InputCommand::parse(""), InputCommand::Empty);
        assert_eq!(InputCommand::parse("about"), InputCommand::Unknown("about".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_navigates_and_settles() {
        let text = session("menu\n/projects\nstate\nquit\n").await;
        assert!(text.contains("menu open"));
        assert!(text.contains("menu closed"));
        assert!(text.contains("state: exiting(hero → projects)"));
        assert!(text.ends_with("state: idle(projects)\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_back_and_unknown() {
        let text = session("back\nwhere\n/about\nback\n").await;
        assert!(text.contains("no history"));
        assert!(text.contains("unknown command: where"));
        assert!(text.ends_with("state: idle(hero)\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_outside_press() {
        let text = session("menu\ninside\noutside\noutside\n").await;
        assert_eq!(text.matches("menu closed").count(), 1);
    }
}
