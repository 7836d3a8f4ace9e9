//! Terminal render engine
//!
//! Reports every mount, unmount and animation as a text line and schedules
//! animation completions as deadlines on the tokio clock.

use colored::Colorize;
use folio_core::{AnimationSpec, CompletionToken, RenderEngine, ViewId};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Instant,
    token: CompletionToken,
}

/// Render engine backed by timer deadlines
#[derive(Debug, Default)]
pub struct TimerEngine {
    scheduled: Vec<Scheduled>,
    mounted: Option<ViewId>,
    lines: Vec<String>,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending completion deadline
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduled.iter().map(|s| s.due).min()
    }

    /// Remove and return every completion due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<CompletionToken> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.scheduled.retain(|s| {
            if s.due <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| (s.due, s.token.sequence()));
        due.into_iter().map(|s| s.token).collect()
    }

    /// View currently in the interactive tree
    pub fn mounted(&self) -> Option<&ViewId> {
        self.mounted.as_ref()
    }

    /// Queue a line of output alongside the engine's own
    pub fn note(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Drain the output lines produced so far
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl RenderEngine for TimerEngine {
    fn mount(&mut self, view: &ViewId) {
        self.mounted = Some(view.clone());
        self.lines
            .push(format!("  {} mount    {}", "+".green(), view.as_str().bold()));
    }

    fn unmount(&mut self, view: &ViewId) {
        if self.mounted.as_ref() == Some(view) {
            self.mounted = None;
        }
        self.lines.push(format!("  {} unmount  {}", "-".red(), view));
    }

    fn animate(&mut self, view: &ViewId, spec: AnimationSpec, token: CompletionToken) {
        self.scheduled.push(Scheduled {
            due: Instant::now() + spec.duration,
            token,
        });
        self.lines.push(format!(
            "  {} {:<8} {} ({}ms) {}",
            "~".cyan(),
            spec.phase,
            view,
            spec.duration.as_millis(),
            token.to_string().dimmed()
        ));
    }

    fn cancel(&mut self, token: CompletionToken) {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.token != token);
        if self.scheduled.len() != before {
            self.lines
                .push(format!("  {} cancel   {}", "x".yellow(), token));
        }
    }
}
