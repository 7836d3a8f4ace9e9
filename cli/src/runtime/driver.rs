//! Cooperative single-threaded driver
//!
//! Owns a [`Shell`] over a [`TimerEngine`]. Discrete events (navigation,
//! menu input) run to completion; animation completions fire when their
//! tokio deadline passes.

use super::engine::TimerEngine;
use crate::output;
use anyhow::Result;
use folio_core::{MenuRegion, NavItem, Shell, SiteConfig, TransitionState};
use std::io::Write;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Drives a shell and its timer engine
pub struct Driver {
    shell: Shell<TimerEngine>,
}

impl Driver {
    /// Build the shell for `config`
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let shell = Shell::new(config, TimerEngine::new())?;
        Ok(Self { shell })
    }

    pub fn shell(&self) -> &Shell<TimerEngine> {
        &self.shell
    }

    /// Navigate and report the new location
    pub fn navigate(&mut self, path: &str) {
        let view = self.shell.router().table().resolve(path).clone();
        self.push_line(output::navigation_line(path, &view));
        self.with_menu_report(|shell| shell.navigate(path));
    }

    /// Go back if history allows it
    pub fn go_back(&mut self) -> bool {
        let Some(target) = self.shell.router().history().first().cloned() else {
            return false;
        };
        let view = self.shell.router().table().resolve(&target).clone();
        self.push_line(output::navigation_line(&target, &view));
        self.with_menu_report(|shell| shell.go_back())
    }

    pub fn toggle_menu(&self) {
        self.shell.toggle_menu();
        self.push_line(output::menu_line(self.shell.menu_open()));
    }

    pub fn pointer_down(&mut self, region: MenuRegion) {
        self.with_menu_report(|shell| shell.pointer_down(region));
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        self.shell.nav_items()
    }

    pub fn state(&self) -> TransitionState {
        self.shell.transition_state()
    }

    /// Earliest animation deadline, if any animation is running
    pub fn next_due(&self) -> Option<Instant> {
        self.shell.with_engine(TimerEngine::next_due)
    }

    /// Fire every completion whose deadline has passed
    pub fn fire_due(&self) -> usize {
        let mut fired = 0;
        // Completing an exit schedules the enter animation, which may
        // itself already be due when durations are zero
        loop {
            let now = Instant::now();
            let due = self.shell.with_engine_mut(|engine| engine.take_due(now));
            if due.is_empty() {
                return fired;
            }
            for token in due {
                if self.shell.complete(token) {
                    fired += 1;
                } else {
                    debug!(%token, "Completion dropped");
                }
            }
        }
    }

    /// Run timers until no animation is pending
    pub async fn settle(&self) {
        while let Some(due) = self.next_due() {
            sleep_until(due).await;
            self.fire_due();
        }
    }

    /// Run timers for `duration` of wall time
    pub async fn advance(&self, duration: Duration) {
        let until = Instant::now() + duration;
        loop {
            match self.next_due().filter(|due| *due <= until) {
                Some(due) => {
                    sleep_until(due).await;
                    self.fire_due();
                }
                None => {
                    sleep_until(until).await;
                    self.fire_due();
                    return;
                }
            }
        }
    }

    /// Write pending output lines
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for line in self.shell.with_engine_mut(TimerEngine::take_lines) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    fn push_line(&self, line: String) {
        self.shell.with_engine_mut(|engine| engine.note(line));
    }

    /// Run `f` and report the menu state if it flipped
    fn with_menu_report<R>(&mut self, f: impl FnOnce(&mut Shell<TimerEngine>) -> R) -> R {
        let was_open = self.shell.menu_open();
        let result = f(&mut self.shell);
        if was_open != self.shell.menu_open() {
            self.push_line(output::menu_line(self.shell.menu_open()));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{TransitionMode, TransitionPhase, ViewId};

    fn driver() -> Driver {
        Driver::new(&SiteConfig::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_runs_full_sequence() {
        let mut driver = driver();
        driver.navigate("/about");
        assert_eq!(driver.state().phase(), TransitionPhase::Exiting);

        let start = Instant::now();
        driver.settle().await;
        assert_eq!(driver.state(), TransitionState::Idle(ViewId::from("about")));
        assert!(start.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_mid_exit_wins() {
        let mut driver = driver();
        driver.navigate("/about");
        driver.advance(Duration::from_millis(100)).await;
        driver.navigate("/skills");
        driver.settle().await;

        assert_eq!(driver.state(), TransitionState::Idle(ViewId::from("skills")));
        assert_eq!(
            driver.shell().with_engine(|e| e.mounted().cloned()),
            Some(ViewId::from("skills"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_stops_between_phases() {
        let mut driver = driver();
        driver.navigate("/resume");
        driver.advance(Duration::from_millis(450)).await;
        assert_eq!(driver.state().phase(), TransitionPhase::Entering);
        driver.advance(Duration::from_millis(300)).await;
        assert!(matches!(driver.state(), TransitionState::Idle(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_durations_settle_immediately() {
        let mut config = SiteConfig::default();
        config.animation.exit_ms = 0;
        config.animation.enter_ms = 0;
        config.animation.mode = TransitionMode::CrossFade;
        let mut driver = Driver::new(&config).unwrap();

        driver.navigate("/contact");
        assert_eq!(driver.fire_due(), 2);
        assert_eq!(driver.state(), TransitionState::Idle(ViewId::from("contact")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_writes_lines() {
        let mut driver = driver();
        driver.toggle_menu();
        driver.navigate("/about");
        driver.settle().await;

        let mut out = Vec::new();
        driver.flush(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("menu open"));
        assert!(text.contains("menu closed"));
        assert!(text.contains("/about"));
        assert!(text.contains("unmount"));
        assert!(!driver.shell().menu_open());
    }
}
