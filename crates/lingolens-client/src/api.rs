//! Ollama HTTP API client.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::normalize::normalize_response;
use crate::types::{
    ConnectionStatus, GenerateEnvelope, GenerateOptions, GenerateOutput, GenerateParams,
    GenerateRequest, KNOWN_MODELS, NUM_PREDICT, TagsResponse,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connection failure reaching the server.
    #[error("model server unreachable: {0}")]
    ServerUnreachable(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("model request failed: {status}")]
    RequestFailed { status: StatusCode },
    /// The response body could not be parsed as the expected structure.
    #[error("invalid response format: {0}")]
    InvalidResponseFormat(#[source] serde_json::Error),
}

/// HTTP client for a local Ollama server.
///
/// Stateless beyond the base URL; connections are acquired and released per
/// call and timeouts are left to transport defaults.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the given server base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one generation request.
    ///
    /// With a schema, the request declares the expected output shape and the
    /// response is parsed as JSON; without one, the raw text is returned
    /// after quirk normalization. No retries happen at this layer.
    pub async fn generate(&self, params: &GenerateParams) -> Result<GenerateOutput, ClientError> {
        debug_assert!(!params.prompt.is_empty(), "prompt must be non-empty");
        debug_assert!(!params.system.is_empty(), "system prompt must be non-empty");

        let request = GenerateRequest {
            model: &params.model,
            prompt: &params.prompt,
            system: &params.system,
            stream: false,
            images: params.image_base64.as_deref().map(|b64| vec![b64]),
            format: params.schema.as_ref(),
            options: GenerateOptions {
                temperature: params.temperature.clamp(0.0, 1.0),
                num_predict: NUM_PREDICT,
            },
        };

        tracing::debug!(
            model = %params.model,
            structured = params.schema.is_some(),
            has_image = params.image_base64.is_some(),
            "generate request"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(ClientError::ServerUnreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed { status });
        }

        let body = response
            .text()
            .await
            .map_err(ClientError::ServerUnreachable)?;
        let envelope: GenerateEnvelope =
            serde_json::from_str(&body).map_err(ClientError::InvalidResponseFormat)?;

        if params.schema.is_some() {
            let value: Value = serde_json::from_str(&envelope.response)
                .map_err(ClientError::InvalidResponseFormat)?;
            Ok(GenerateOutput::Structured(value))
        } else {
            Ok(GenerateOutput::Text(normalize_response(&envelope.response)))
        }
    }

    /// Probe server reachability and whether a usable model is installed.
    ///
    /// Never errors; any failure degrades to a negative status.
    pub async fn check_connection(&self) -> ConnectionStatus {
        match self.list_models().await {
            Ok(names) => {
                let model_available = names.iter().any(|name| {
                    let lower = name.to_lowercase();
                    KNOWN_MODELS.iter().any(|known| lower.contains(known))
                });
                ConnectionStatus {
                    reachable: true,
                    model_available,
                }
            }
            Err(e) => {
                tracing::debug!("connection probe failed: {e}");
                ConnectionStatus {
                    reachable: false,
                    model_available: false,
                }
            }
        }
    }

    /// List installed model names via GET /api/tags.
    async fn list_models(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(ClientError::ServerUnreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed { status });
        }

        let body = response
            .text()
            .await
            .map_err(ClientError::ServerUnreachable)?;
        let tags: TagsResponse =
            serde_json::from_str(&body).map_err(ClientError::InvalidResponseFormat)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_probe_unreachable_server_degrades() {
        // Port 9 (discard) is a safe "nothing listening" target.
        let client = OllamaClient::new("http://127.0.0.1:9");
        let status = client.check_connection().await;
        assert!(!status.reachable);
        assert!(!status.model_available);
    }

    #[tokio::test]
    async fn test_generate_unreachable_server_is_typed() {
        let client = OllamaClient::new("http://127.0.0.1:9");
        let params = GenerateParams {
            model: crate::TEXT_MODEL.to_string(),
            prompt: "hello".to_string(),
            system: "be brief".to_string(),
            temperature: 0.7,
            image_base64: None,
            schema: None,
        };
        let err = client.generate(&params).await.unwrap_err();
        assert!(matches!(err, ClientError::ServerUnreachable(_)));
    }
}
