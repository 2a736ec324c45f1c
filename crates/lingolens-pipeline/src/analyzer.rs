//! Staged analysis pipeline.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use lingolens_client::{ClientError, GenerateParams, TEXT_MODEL, VISION_MODEL};
use lingolens_types::schema::schema_for;
use lingolens_types::{
    AnalysisResult, Conversation, DetectionResult, ImageInput, LanguagePair, Stage, Story,
    VocabularyResult,
};

use crate::backend::ModelBackend;
use crate::prompts::{self, PromptPair, StageContext};

/// Minimum accepted scene-description length, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;
/// Maximum accepted scene-description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Detection runs cold to bias toward literal extraction.
pub const DETECTION_TEMPERATURE: f32 = 0.1;
/// Generation runs warm to bias toward creative variation.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input was rejected before any model call.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The run was cancelled; its output must be discarded, not applied.
    #[error("analysis superseded before completion")]
    Superseded,
}

/// Failure of a single stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("response failed validation: {0}")]
    Validation(String),
}

/// Check a scene description against the accepted length range.
///
/// Callers with their own pre-flight work (connectivity probes, prompts)
/// can reject bad input before doing any of it.
pub fn validate_description(description: &str) -> Result<(), PipelineError> {
    let len = description.trim().chars().count();
    if !(MIN_DESCRIPTION_CHARS..=MAX_DESCRIPTION_CHARS).contains(&len) {
        return Err(PipelineError::InvalidInput(format!(
            "description must be {MIN_DESCRIPTION_CHARS}-{MAX_DESCRIPTION_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

/// A stage whose fallback was substituted, and why.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: StageError,
}

/// Progress states of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Detecting,
    Generating,
    Complete,
    Failed,
}

/// Result of one analysis run: the merged content plus whatever generation
/// stages had their fallbacks substituted.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub failures: Vec<StageFailure>,
}

impl AnalysisOutcome {
    /// True when at least one generation stage fell back.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn final_state(&self) -> PipelineState {
        if self.failures.is_empty() {
            PipelineState::Complete
        } else {
            PipelineState::Failed
        }
    }
}

/// Orchestrates the detection stage and the three concurrent generation
/// stages over a [`ModelBackend`].
///
/// Re-entrancy is the caller's concern: one run is expected to complete or
/// fail before the next starts.
pub struct Analyzer<B> {
    backend: B,
    languages: LanguagePair,
}

impl<B: ModelBackend> Analyzer<B> {
    pub fn new(backend: B, languages: LanguagePair) -> Self {
        Self { backend, languages }
    }

    /// Analyze an image: vision-model detection, then generation.
    pub async fn analyze_image(
        &self,
        image: &ImageInput,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, PipelineError> {
        let PromptPair { system, user } = prompts::image_detection();
        let params = GenerateParams {
            model: VISION_MODEL.to_string(),
            prompt: user,
            system,
            temperature: DETECTION_TEMPERATURE,
            image_base64: Some(STANDARD.encode(&image.bytes)),
            schema: Some(schema_for(Stage::Detection)),
        };
        self.run(params, cancel).await
    }

    /// Analyze a free-text scene description: text-model detection (inferring
    /// plausible contents), then generation.
    ///
    /// Descriptions outside 10-500 characters are rejected before any
    /// network call.
    pub async fn analyze_description(
        &self,
        description: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, PipelineError> {
        validate_description(description)?;
        let PromptPair { system, user } = prompts::description_detection(description.trim());
        let params = GenerateParams {
            model: TEXT_MODEL.to_string(),
            prompt: user,
            system,
            temperature: DETECTION_TEMPERATURE,
            image_base64: None,
            schema: Some(schema_for(Stage::Detection)),
        };
        self.run(params, cancel).await
    }

    async fn run(
        &self,
        detection_params: GenerateParams,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, PipelineError> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Superseded);
        }

        tracing::info!(state = ?PipelineState::Detecting, "pipeline");
        // Detection failure is non-fatal: substitute the neutral fallback
        // and keep going.
        let detection = match self.detect(detection_params).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("detection failed, continuing with fallback: {e}");
                DetectionResult::unknown()
            }
        };

        if cancel.is_cancelled() {
            return Err(PipelineError::Superseded);
        }

        tracing::info!(state = ?PipelineState::Generating, "pipeline");
        let ctx = StageContext {
            detection: &detection,
            languages: self.languages,
        };
        // The three generation calls are independent: dispatched together,
        // joined when all have settled, no cross-stage data flow.
        let (vocabulary, story, conversation) = tokio::join!(
            self.stage_call::<VocabularyResult>(Stage::Vocabulary, prompts::vocabulary(&ctx)),
            self.stage_call::<Story>(Stage::Story, prompts::story(&ctx)),
            self.stage_call::<Conversation>(Stage::Conversation, prompts::conversation(&ctx)),
        );

        // A superseded run discards late-arriving output instead of applying it.
        if cancel.is_cancelled() {
            return Err(PipelineError::Superseded);
        }

        let mut failures = Vec::new();
        let vocabulary = vocabulary.unwrap_or_else(|error| {
            tracing::warn!("vocabulary generation failed: {error}");
            failures.push(StageFailure {
                stage: Stage::Vocabulary,
                error,
            });
            VocabularyResult::empty()
        });
        let story = story.unwrap_or_else(|error| {
            tracing::warn!("story generation failed: {error}");
            failures.push(StageFailure {
                stage: Stage::Story,
                error,
            });
            Story::failed()
        });
        let conversation = conversation.unwrap_or_else(|error| {
            tracing::warn!("conversation generation failed: {error}");
            failures.push(StageFailure {
                stage: Stage::Conversation,
                error,
            });
            Conversation::failed()
        });

        let outcome = AnalysisOutcome {
            result: AnalysisResult {
                detection: Some(detection),
                vocabulary: Some(vocabulary),
                story: Some(story),
                conversation: Some(conversation),
            },
            failures,
        };
        tracing::info!(state = ?outcome.final_state(), "pipeline");
        Ok(outcome)
    }

    async fn detect(&self, params: GenerateParams) -> Result<DetectionResult, StageError> {
        let output = self.backend.generate(params).await?;
        let value = output
            .into_structured()
            .ok_or_else(|| StageError::Validation("expected structured output".to_string()))?;
        let detection: DetectionResult =
            serde_json::from_value(value).map_err(|e| StageError::Validation(e.to_string()))?;
        detection
            .validate()
            .map_err(|e| StageError::Validation(e.to_string()))?;
        Ok(detection)
    }

    async fn stage_call<T>(&self, stage: Stage, prompt: PromptPair) -> Result<T, StageError>
    where
        T: serde::de::DeserializeOwned,
    {
        let params = GenerateParams {
            model: TEXT_MODEL.to_string(),
            prompt: prompt.user,
            system: prompt.system,
            temperature: GENERATION_TEMPERATURE,
            image_base64: None,
            schema: Some(schema_for(stage)),
        };
        let output = self.backend.generate(params).await?;
        let value = output
            .into_structured()
            .ok_or_else(|| StageError::Validation("expected structured output".to_string()))?;
        serde_json::from_value(value).map_err(|e| StageError::Validation(e.to_string()))
    }
}
