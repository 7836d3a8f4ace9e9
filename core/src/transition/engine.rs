//! Render engine seam
//!
//! The coordinator drives an external rendering/animation engine through
//! the [`RenderEngine`] trait. The engine reports completion later by
//! handing the [`CompletionToken`] back to the coordinator.

use super::animation::{AnimationSpec, Phase};
use crate::routing::ViewId;
use std::fmt;

/// Handle identifying one scheduled animation.
///
/// Tokens are unique per coordinator; a token from a superseded sequence
/// is simply ignored when it comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionToken {
    pub(crate) sequence: u64,
    pub(crate) phase: Phase,
}

impl CompletionToken {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl fmt::Display for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.sequence, self.phase)
    }
}

/// External collaborator that mounts views and runs animations
pub trait RenderEngine {
    /// Put a view into the interactive tree
    fn mount(&mut self, view: &ViewId);

    /// Remove a view from the interactive tree
    fn unmount(&mut self, view: &ViewId);

    /// Start an animation; the engine must eventually report `token`
    /// unless it is cancelled first. Reporting happens from a later event,
    /// never from inside this call.
    fn animate(&mut self, view: &ViewId, spec: AnimationSpec, token: CompletionToken);

    /// Drop a scheduled animation. Cancelling an unknown or already
    /// finished token must be harmless.
    fn cancel(&mut self, token: CompletionToken);
}

/// One call made against a [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Mount(ViewId),
    Unmount(ViewId),
    Animate {
        view: ViewId,
        spec: AnimationSpec,
        token: CompletionToken,
    },
    Cancel(CompletionToken),
}

/// Engine that records every call and tracks the mounted set.
///
/// Completions are never fired by the engine itself; callers feed the
/// tokens from [`RecordingEngine::pending`] back to the coordinator.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Vec<EngineCall>,
    mounted: Vec<ViewId>,
    pending: Vec<CompletionToken>,
    max_mounted: usize,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Drain the recorded calls
    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    /// Views currently in the interactive tree
    pub fn mounted(&self) -> &[ViewId] {
        &self.mounted
    }

    /// Highest number of simultaneously mounted views ever observed
    pub fn max_mounted(&self) -> usize {
        self.max_mounted
    }

    /// Animations started and not yet cancelled or reported
    pub fn pending(&self) -> &[CompletionToken] {
        &self.pending
    }

    /// The most recently started animation that is still pending
    pub fn last_pending(&self) -> Option<CompletionToken> {
        self.pending.last().copied()
    }

    /// Forget a token once it has been reported back
    pub fn finish(&mut self, token: CompletionToken) {
        self.pending.retain(|t| *t != token);
    }
}

impl RenderEngine for RecordingEngine {
    fn mount(&mut self, view: &ViewId) {
        self.calls.push(EngineCall::Mount(view.clone()));
        self.mounted.push(view.clone());
        self.max_mounted = self.max_mounted.max(self.mounted.len());
    }

    fn unmount(&mut self, view: &ViewId) {
        self.calls.push(EngineCall::Unmount(view.clone()));
        if let Some(pos) = self.mounted.iter().position(|v| v == view) {
            self.mounted.remove(pos);
        }
    }

    fn animate(&mut self, view: &ViewId, spec: AnimationSpec, token: CompletionToken) {
        self.calls.push(EngineCall::Animate {
            view: view.clone(),
            spec,
            token,
        });
        self.pending.push(token);
    }

    fn cancel(&mut self, token: CompletionToken) {
        self.calls.push(EngineCall::Cancel(token));
        self.pending.retain(|t| *t != token);
    }
}
