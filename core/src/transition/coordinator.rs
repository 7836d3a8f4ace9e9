//! Transition coordinator
//!
//! Sequences exit and enter animations between views, keyed by view
//! identity. At most one completion token is live at a time; starting a
//! new sequence cancels the previous one, so late callbacks from a
//! superseded sequence are ignored.

use super::animation::{AnimationConfig, Phase, TransitionMode};
use super::engine::{CompletionToken, RenderEngine};
use crate::routing::{NavigationEvent, ViewId};
use tracing::debug;

/// Coarse phase of the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Exiting,
    Entering,
}

/// Full coordinator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionState {
    Idle(ViewId),
    Exiting { from: ViewId, to: ViewId },
    Entering { from: ViewId, to: ViewId },
}

impl TransitionState {
    pub fn phase(&self) -> TransitionPhase {
        match self {
            TransitionState::Idle(_) => TransitionPhase::Idle,
            TransitionState::Exiting { .. } => TransitionPhase::Exiting,
            TransitionState::Entering { .. } => TransitionPhase::Entering,
        }
    }

    /// The view currently on screen
    pub fn active_view(&self) -> &ViewId {
        match self {
            TransitionState::Idle(view) => view,
            TransitionState::Exiting { from, .. } => from,
            TransitionState::Entering { to, .. } => to,
        }
    }

    /// The view a running transition is heading to
    pub fn pending_view(&self) -> Option<&ViewId> {
        match self {
            TransitionState::Idle(_) => None,
            TransitionState::Exiting { to, .. } | TransitionState::Entering { to, .. } => Some(to),
        }
    }

    /// The view the coordinator settles on if nothing else happens
    pub fn target_view(&self) -> &ViewId {
        self.pending_view().unwrap_or_else(|| self.active_view())
    }
}

type ChangeHook = Box<dyn FnMut(&TransitionState)>;

/// Drives a [`RenderEngine`] through exit/enter sequences
pub struct TransitionCoordinator<E: RenderEngine> {
    engine: E,
    config: AnimationConfig,
    state: TransitionState,
    /// Whether `state.active_view()` is in the interactive tree
    mounted: bool,
    live: Option<CompletionToken>,
    next_sequence: u64,
    hooks: Vec<ChangeHook>,
}

impl<E: RenderEngine> TransitionCoordinator<E> {
    /// Create a coordinator and mount the initial view
    pub fn new(mut engine: E, initial_view: ViewId, config: AnimationConfig) -> Self {
        engine.mount(&initial_view);
        Self {
            engine,
            config,
            state: TransitionState::Idle(initial_view),
            mounted: true,
            live: None,
            next_sequence: 0,
            hooks: Vec::new(),
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn phase(&self) -> TransitionPhase {
        self.state.phase()
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == TransitionPhase::Idle
    }

    /// The only completion token that will currently be honoured
    pub fn live_token(&self) -> Option<CompletionToken> {
        self.live
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Register a lifecycle hook called after every state change
    pub fn on_change<F>(&mut self, hook: F)
    where
        F: FnMut(&TransitionState) + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// React to a router notification
    pub fn on_navigation(&mut self, event: &NavigationEvent) {
        self.transition_to(event.view.clone());
    }

    /// Start heading to `to`.
    ///
    /// A no-op when `to` is already the target. Otherwise any in-flight
    /// sequence is abandoned and a new one starts from the view on screen.
    pub fn transition_to(&mut self, to: ViewId) {
        if &to == self.state.target_view() {
            debug!(view = %to, "Transition target unchanged");
            return;
        }

        if let Some(token) = self.live.take() {
            debug!(token = %token, "Cancelling superseded transition");
            self.engine.cancel(token);
        }

        let from = self.state.active_view().clone();
        if from == to {
            // Heading back to the view still on screen: play it back in
            if !self.mounted {
                self.engine.mount(&to);
                self.mounted = true;
            }
            self.start(&to, Phase::Enter);
            self.set_state(TransitionState::Entering { from, to });
            return;
        }

        self.start(&from, Phase::Exit);
        if self.config.mode == TransitionMode::CrossFade && self.mounted {
            self.engine.unmount(&from);
            self.mounted = false;
        }
        self.set_state(TransitionState::Exiting { from, to });
    }

    /// Report an animation as finished.
    ///
    /// Returns false for stale or unknown tokens, which change nothing.
    pub fn complete(&mut self, token: CompletionToken) -> bool {
        if self.live != Some(token) {
            debug!(token = %token, "Ignoring stale completion");
            return false;
        }
        self.live = None;

        match self.state.clone() {
            TransitionState::Exiting { from, to } => {
                if self.mounted {
                    self.engine.unmount(&from);
                }
                self.engine.mount(&to);
                self.mounted = true;
                self.start(&to, Phase::Enter);
                self.set_state(TransitionState::Entering { from, to });
            }
            TransitionState::Entering { to, .. } => {
                self.set_state(TransitionState::Idle(to));
            }
            TransitionState::Idle(_) => return false,
        }
        true
    }

    fn start(&mut self, view: &ViewId, phase: Phase) {
        let token = CompletionToken {
            sequence: self.next_sequence,
            phase,
        };
        self.next_sequence += 1;
        self.live = Some(token);
        self.engine.animate(view, self.config.spec(phase), token);
    }

    fn set_state(&mut self, state: TransitionState) {
        debug!(?state, "Transition state");
        self.state = state;
        for hook in &mut self.hooks {
            hook(&self.state);
        }
    }
}

impl<E: RenderEngine + std::fmt::Debug> std::fmt::Debug for TransitionCoordinator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionCoordinator")
            .field("engine", &self.engine)
            .field("state", &self.state)
            .field("mounted", &self.mounted)
            .field("live", &self.live)
            .finish()
    }
}
