//! lingolens-pipeline: orchestrates the staged analysis of an image or scene
//! description into language-learning content.
//!
//! One detection call resolves first (vision model for images, text model for
//! descriptions), then vocabulary, story, and conversation generation run
//! concurrently against its output. Detection failure is absorbed with a
//! neutral fallback; generation failures substitute their fallbacks and are
//! aggregated so the caller sees a partial run.

mod analyzer;
mod backend;
pub mod prompts;

pub use analyzer::{
    AnalysisOutcome, Analyzer, DETECTION_TEMPERATURE, GENERATION_TEMPERATURE,
    MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS, PipelineError, PipelineState, StageError,
    StageFailure, validate_description,
};
pub use backend::ModelBackend;
