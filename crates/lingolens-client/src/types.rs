//! Wire types for the Ollama generate and tags endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text model used for generation stages and description-based detection.
pub const TEXT_MODEL: &str = "gemma3n:latest";

/// Vision-capable model used for image detection.
pub const VISION_MODEL: &str = "llama3.2-vision:latest";

/// Response token budget sent with every generate request.
pub const NUM_PREDICT: u32 = 1000;

/// Model name fragments the connectivity probe accepts (matched
/// case-insensitively as substrings of installed model names).
pub const KNOWN_MODELS: [&str; 2] = ["gemma3n", "llama3.2-vision"];

/// Parameters for one generation call.
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub model: String,
    pub prompt: String,
    pub system: String,
    /// Sampling temperature; clamped to [0, 1] when the request is built.
    pub temperature: f32,
    /// Base64-encoded raw image bytes, attached for vision models.
    pub image_base64: Option<String>,
    /// Expected output schema. When set, the request declares the shape to
    /// the server and the response body is parsed as JSON.
    pub schema: Option<Value>,
}

/// Result of a generation call: parsed JSON when a schema was requested,
/// normalized raw text otherwise.
#[derive(Debug, Clone)]
pub enum GenerateOutput {
    Structured(Value),
    Text(String),
}

impl GenerateOutput {
    pub fn into_structured(self) -> Option<Value> {
        match self {
            GenerateOutput::Structured(v) => Some(v),
            GenerateOutput::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            GenerateOutput::Text(t) => Some(t),
            GenerateOutput::Structured(_) => None,
        }
    }
}

/// POST /api/generate request body.
#[derive(Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: &'a str,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a Value>,
    pub options: GenerateOptions,
}

#[derive(Serialize)]
pub(crate) struct GenerateOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

/// POST /api/generate response envelope.
#[derive(Deserialize)]
pub(crate) struct GenerateEnvelope {
    pub response: String,
}

/// GET /api/tags response.
#[derive(Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Deserialize)]
pub(crate) struct ModelTag {
    pub name: String,
}

/// Outcome of a connectivity probe. Never an error; failures map to both
/// flags being false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// The server answered the listing call.
    pub reachable: bool,
    /// At least one installed model matches the allow-list.
    pub model_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_omits_absent_fields() {
        let req = GenerateRequest {
            model: TEXT_MODEL,
            prompt: "hello",
            system: "be brief",
            stream: false,
            images: None,
            format: None,
            options: GenerateOptions {
                temperature: 0.7,
                num_predict: NUM_PREDICT,
            },
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("images"));
        assert!(!json.contains("format"));
        assert!(json.contains("\"stream\":false"));
        assert!(json.contains("\"num_predict\":1000"));
    }

    #[test]
    fn test_generate_request_includes_image_and_schema() {
        let schema = serde_json::json!({ "type": "object" });
        let req = GenerateRequest {
            model: VISION_MODEL,
            prompt: "describe",
            system: "vision",
            stream: false,
            images: Some(vec!["aGVsbG8="]),
            format: Some(&schema),
            options: GenerateOptions {
                temperature: 0.1,
                num_predict: NUM_PREDICT,
            },
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"images\":[\"aGVsbG8=\"]"));
        assert!(json.contains("\"format\":{\"type\":\"object\"}"));
    }

    #[test]
    fn test_generate_output_accessors() {
        let text = GenerateOutput::Text("hi".into());
        assert_eq!(text.clone().into_text().as_deref(), Some("hi"));
        assert!(text.into_structured().is_none());
    }
}
