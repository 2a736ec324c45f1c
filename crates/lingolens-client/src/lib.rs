//! lingolens-client: HTTP client for a local Ollama inference server.
//!
//! One structured or free-text generation call per request, plus a
//! connectivity probe. Retry policy belongs to the caller, not this layer.

mod api;
mod normalize;
mod types;

pub use api::{ClientError, OllamaClient};
pub use normalize::normalize_response;
pub use types::{
    ConnectionStatus, GenerateOutput, GenerateParams, KNOWN_MODELS, NUM_PREDICT, TEXT_MODEL,
    VISION_MODEL,
};
