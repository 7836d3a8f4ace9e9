//! View transitions: animation configuration, render engine seam and
//! the coordinator state machine

pub mod animation;
pub mod coordinator;
pub mod engine;

// Re-export commonly used types
pub use animation::{apply_easing, AnimationConfig, AnimationSpec, Easing, Phase, TransitionMode};
pub use coordinator::{TransitionCoordinator, TransitionPhase, TransitionState};
pub use engine::{CompletionToken, EngineCall, RecordingEngine, RenderEngine};
