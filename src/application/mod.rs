//! Application layer - orchestration of the assessment workflow.
//!
//! This layer coordinates domain transitions with the generation, fallback
//! and rendering ports. It owns the only mutable state in the system: the
//! current session held by [`AssessmentWorkflow`].

mod cancel;
pub mod synthesizer;
mod workflow;

pub use cancel::{CancelHandle, CancelSignal};
pub use synthesizer::{
    ContentOrigin, RoadmapSynthesizer, Synthesized, SynthesizerError, SynthesizerSettings,
};
pub use workflow::AssessmentWorkflow;
