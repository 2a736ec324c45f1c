//! Seam between the pipeline and the inference server.

use async_trait::async_trait;

use lingolens_client::{ClientError, GenerateOutput, GenerateParams, OllamaClient};

/// A backend that can service one generation request.
///
/// The pipeline only talks to the model through this trait, so tests can
/// substitute a recording double for the HTTP client.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, params: GenerateParams) -> Result<GenerateOutput, ClientError>;
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn generate(&self, params: GenerateParams) -> Result<GenerateOutput, ClientError> {
        OllamaClient::generate(self, &params).await
    }
}
