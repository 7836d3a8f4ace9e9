//! Animation configuration for view transitions
//!
//! This module provides easing functions, transition timing configuration
//! and the animation specs handed to a render engine. Curves and durations
//! are presentation parameters; the coordinator only sequences them.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Upper bound for any single animation duration
pub const MAX_DURATION_MS: u64 = 60_000;

/// Easing options for transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInOutCubic,
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "linear" => Ok(Easing::Linear),
            "ease_in_out_cubic" | "easeinoutcubic" | "ease-in-out-cubic" => {
                Ok(Easing::EaseInOutCubic)
            }
            "ease_out_cubic" | "easeoutcubic" | "ease-out-cubic" => Ok(Easing::EaseOutCubic),
            _ => Err(ConfigError::InvalidValue {
                field: "easing".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Apply easing function to a normalized time value (0.0 to 1.0)
pub fn apply_easing(easing: Easing, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}

/// How the outgoing and incoming views are sequenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// The outgoing view animates out, then the incoming view animates in
    #[default]
    Sequential,
    /// The outgoing view leaves the interactive tree at once and fades
    /// while the incoming view waits out the exit duration
    CrossFade,
}

impl FromStr for TransitionMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "sequential" | "wait" => Ok(TransitionMode::Sequential),
            "cross_fade" | "crossfade" | "cross-fade" => Ok(TransitionMode::CrossFade),
            _ => Err(ConfigError::InvalidValue {
                field: "mode".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Which half of a transition an animation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Exit,
    Enter,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Exit => f.pad("exit"),
            Phase::Enter => f.pad("enter"),
        }
    }
}

/// A single animation request passed to the render engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    pub phase: Phase,
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSpec {
    /// Eased progress after `elapsed`, in 0.0..=1.0
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        apply_easing(self.easing, t)
    }
}

/// Configuration for transition and menu animations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub easing: Easing,
    pub exit_ms: u64,
    pub enter_ms: u64,
    pub mode: TransitionMode,
    /// Delay between consecutive overlay menu items
    pub menu_stagger_ms: u64,
    /// Duration of the overlay panel slide
    pub menu_slide_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            easing: Easing::EaseOutCubic,
            exit_ms: 300,
            enter_ms: 300,
            mode: TransitionMode::Sequential,
            menu_stagger_ms: 100,
            menu_slide_ms: 400,
        }
    }
}

impl AnimationConfig {
    /// Apply `FOLIO_UI_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FOLIO_UI_EASING") {
            match value.parse() {
                Ok(easing) => self.easing = easing,
                Err(e) => warn!("Ignoring FOLIO_UI_EASING: {}", e),
            }
        }
        if let Some(value) = lookup("FOLIO_UI_MODE") {
            match value.parse() {
                Ok(mode) => self.mode = mode,
                Err(e) => warn!("Ignoring FOLIO_UI_MODE: {}", e),
            }
        }
        if let Some(value) = lookup("FOLIO_UI_EXIT_MS") {
            match value.parse::<u64>() {
                Ok(ms) => self.exit_ms = ms,
                Err(_) => warn!("Ignoring FOLIO_UI_EXIT_MS: not a number: {}", value),
            }
        }
        if let Some(value) = lookup("FOLIO_UI_ENTER_MS") {
            match value.parse::<u64>() {
                Ok(ms) => self.enter_ms = ms,
                Err(_) => warn!("Ignoring FOLIO_UI_ENTER_MS: not a number: {}", value),
            }
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("exit_ms", self.exit_ms),
            ("enter_ms", self.enter_ms),
            ("menu_stagger_ms", self.menu_stagger_ms),
            ("menu_slide_ms", self.menu_slide_ms),
        ] {
            if value > MAX_DURATION_MS {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Animation request for one phase of a transition
    pub fn spec(&self, phase: Phase) -> AnimationSpec {
        let ms = match phase {
            Phase::Exit => self.exit_ms,
            Phase::Enter => self.enter_ms,
        };
        AnimationSpec {
            phase,
            duration: Duration::from_millis(ms),
            easing: self.easing,
        }
    }
}
