//! lingolens-types: shared data model for the lingolens workspace.
//!
//! Holds the analysis input/result types produced by the generation pipeline,
//! the export envelope, and the per-stage output schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod schema;

// ──────────────────── Languages ────────────────────

/// Supported learning languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Chinese,
    Japanese,
    Korean,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
        Language::Arabic,
    ];

    /// Lowercase code used in settings, exports, and dictionary files.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Chinese => "chinese",
            Language::Japanese => "japanese",
            Language::Korean => "korean",
            Language::Arabic => "arabic",
        }
    }

    /// Human-readable name as used in model prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Chinese => "Chinese (Simplified)",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Arabic => "Arabic",
        }
    }

    /// Parse a language code, case-insensitively.
    pub fn parse(code: &str) -> Option<Language> {
        let lower = code.trim().to_lowercase();
        Language::ALL.iter().copied().find(|l| l.code() == lower)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The learner's known language (source) and the language being learned (target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: Language::English,
            target: Language::Spanish,
        }
    }
}

// ──────────────────── Pipeline Stages ────────────────────

/// One discrete model-invocation step in the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Detection,
    Vocabulary,
    Story,
    Conversation,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Detection => "detection",
            Stage::Vocabulary => "vocabulary",
            Stage::Story => "story",
            Stage::Conversation => "conversation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────── Analysis Input ────────────────────

/// Image file extensions accepted as analysis input.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// An image selected for analysis.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Display name (file name).
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageInput {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Map a file extension to its image MIME type, if accepted.
    pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "webp" => Some("image/webp"),
            "gif" => Some("image/gif"),
            _ => None,
        }
    }
}

/// Input to one analysis run. Exactly one variant is active; selecting an
/// image clears a pending description and vice versa.
#[derive(Debug, Clone)]
pub enum AnalysisInput {
    Image(ImageInput),
    Description(String),
}

impl AnalysisInput {
    /// Payload-free projection of this input for export documents.
    pub fn summary(&self) -> InputSummary {
        match self {
            AnalysisInput::Image(img) => InputSummary::Image {
                name: img.name.clone(),
                size: img.size(),
            },
            AnalysisInput::Description(text) => InputSummary::Description {
                description: text.clone(),
            },
        }
    }

    pub fn mode(&self) -> InputMode {
        match self {
            AnalysisInput::Image(_) => InputMode::Image,
            AnalysisInput::Description(_) => InputMode::Description,
        }
    }
}

/// Which kind of input an analysis run consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Image,
    Description,
}

/// Serializable summary of an analysis input (no binary payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputSummary {
    Image { name: String, size: u64 },
    Description { description: String },
}

// ──────────────────── Detection ────────────────────

/// A single object the vision model identified in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    /// Model confidence, expected within [0, 1].
    pub confidence: f64,
    pub description: String,
}

/// Overall scene interpretation. All four fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub setting: String,
    pub location: String,
    pub activity: String,
    pub mood: String,
}

/// Output of the detection stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub objects: Vec<DetectedObject>,
    pub scene: Scene,
}

impl DetectionResult {
    /// Documented fallback when detection fails: no objects, neutral scene.
    pub fn unknown() -> Self {
        Self {
            objects: Vec::new(),
            scene: Scene {
                setting: "unknown".to_string(),
                location: "unknown".to_string(),
                activity: "unknown".to_string(),
                mood: "neutral".to_string(),
            },
        }
    }

    /// Check numeric ranges the schema declares but serde cannot enforce.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for obj in &self.objects {
            if !(0.0..=1.0).contains(&obj.confidence) {
                return Err(ValidationError::OutOfRange {
                    field: "objects[].confidence",
                    value: obj.confidence,
                });
            }
        }
        Ok(())
    }
}

// ──────────────────── Vocabulary ────────────────────

/// Part-of-speech category for a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
}

impl WordCategory {
    pub fn name(&self) -> &'static str {
        match self {
            WordCategory::Noun => "noun",
            WordCategory::Verb => "verb",
            WordCategory::Adjective => "adjective",
            WordCategory::Adverb => "adverb",
            WordCategory::Preposition => "preposition",
            WordCategory::Conjunction => "conjunction",
            WordCategory::Interjection => "interjection",
        }
    }
}

impl std::fmt::Display for WordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Learner difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One word in the generated vocabulary list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Word in the target language.
    pub word: String,
    /// Gloss translation into the source language.
    pub translation: String,
    pub category: WordCategory,
    pub difficulty: Difficulty,
    /// Example sentence in the target language.
    pub example: String,
    /// How this word relates to the analyzed scene.
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
}

/// Output of the vocabulary stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyResult {
    pub vocabulary: Vec<VocabularyEntry>,
}

impl VocabularyResult {
    /// Number of entries requested from the model.
    pub const TARGET_WORDS: usize = 10;

    /// Documented fallback when vocabulary generation fails.
    pub fn empty() -> Self {
        Self {
            vocabulary: Vec::new(),
        }
    }
}

// ──────────────────── Story ────────────────────

/// A short generated story in the target language.
///
/// Content length of 150-300 words is advisory, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub content: String,
    pub difficulty: Difficulty,
    pub word_count: u32,
    pub key_vocabulary: Vec<String>,
    pub moral: String,
    /// Summary translation into the source language.
    pub translation: String,
}

impl Story {
    /// Documented fallback when story generation fails.
    pub fn failed() -> Self {
        Self {
            title: "Story generation failed".to_string(),
            content: "Unable to generate a story at this time.".to_string(),
            difficulty: Difficulty::Beginner,
            word_count: 0,
            key_vocabulary: Vec::new(),
            moral: String::new(),
            translation: String::new(),
        }
    }
}

// ──────────────────── Conversation ────────────────────

/// One turn of generated dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    /// Line in the target language.
    pub text: String,
    /// Gloss translation into the source language.
    pub translation: String,
}

/// A generated conversation scenario, expected to hold 5-6 exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub scenario: String,
    /// Participant names, 2 or more.
    pub participants: Vec<String>,
    pub difficulty: Difficulty,
    pub dialogue: Vec<DialogueLine>,
    pub cultural_notes: String,
}

impl Conversation {
    /// Documented fallback when conversation generation fails.
    pub fn failed() -> Self {
        Self {
            scenario: "Conversation generation failed".to_string(),
            participants: vec!["System".to_string(), "User".to_string()],
            difficulty: Difficulty::Beginner,
            dialogue: vec![DialogueLine {
                speaker: "System".to_string(),
                text: "Unable to generate a conversation at this time.".to_string(),
                translation: "Unable to generate a conversation at this time.".to_string(),
            }],
            cultural_notes: "Please try again later.".to_string(),
        }
    }
}

// ──────────────────── Aggregate Result ────────────────────

/// Merged output of one analysis run. Each field is written by exactly one
/// pipeline stage and is present only if that stage produced output (or its
/// fallback was substituted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection: Option<DetectionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<VocabularyResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<Story>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Conversation>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.detection.is_none()
            && self.vocabulary.is_none()
            && self.story.is_none()
            && self.conversation.is_none()
    }
}

// ──────────────────── Export Envelope ────────────────────

/// On-disk export format for an analysis run. Importing one of these
/// reconstructs the full result without any model calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub timestamp: DateTime<Utc>,
    /// Target language of the run.
    pub language: Language,
    #[serde(rename = "sourceLanguage")]
    pub source_language: Language,
    #[serde(rename = "inputMode")]
    pub input_mode: InputMode,
    pub input: InputSummary,
    pub results: AnalysisResult,
}

impl AnalysisDocument {
    pub fn new(input: &AnalysisInput, languages: LanguagePair, results: AnalysisResult) -> Self {
        Self {
            timestamp: Utc::now(),
            language: languages.target,
            source_language: languages.source,
            input_mode: input.mode(),
            input: input.summary(),
            results,
        }
    }

    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair {
            source: self.source_language,
            target: self.language,
        }
    }
}

// ──────────────────── Validation ────────────────────

/// A parsed model response that violates a schema-declared constraint.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("spanish"), Some(Language::Spanish));
        assert_eq!(Language::parse("SPANISH"), Some(Language::Spanish));
        assert_eq!(Language::parse(" korean "), Some(Language::Korean));
        assert_eq!(Language::parse("klingon"), None);
    }

    #[test]
    fn test_language_serde_codes() {
        let json = serde_json::to_string(&Language::Chinese).unwrap();
        assert_eq!(json, "\"chinese\"");
        let parsed: Language = serde_json::from_str("\"arabic\"").unwrap();
        assert_eq!(parsed, Language::Arabic);
    }

    #[test]
    fn test_default_language_pair() {
        let pair = LanguagePair::default();
        assert_eq!(pair.source, Language::English);
        assert_eq!(pair.target, Language::Spanish);
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(ImageInput::mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(ImageInput::mime_for_extension("webp"), Some("image/webp"));
        assert_eq!(ImageInput::mime_for_extension("bmp"), None);
    }

    #[test]
    fn test_input_summary_has_no_payload() {
        let input = AnalysisInput::Image(ImageInput {
            name: "beach.jpg".into(),
            mime_type: "image/jpeg".into(),
            bytes: vec![0u8; 2048],
        });
        match input.summary() {
            InputSummary::Image { name, size } => {
                assert_eq!(name, "beach.jpg");
                assert_eq!(size, 2048);
            }
            _ => panic!("Expected Image summary"),
        }
        assert_eq!(input.mode(), InputMode::Image);
    }

    #[test]
    fn test_detection_fallback() {
        let det = DetectionResult::unknown();
        assert!(det.objects.is_empty());
        assert_eq!(det.scene.setting, "unknown");
        assert_eq!(det.scene.mood, "neutral");
        assert!(det.validate().is_ok());
    }

    #[test]
    fn test_detection_validate_rejects_bad_confidence() {
        let det = DetectionResult {
            objects: vec![DetectedObject {
                name: "dog".into(),
                confidence: 1.3,
                description: "a dog".into(),
            }],
            scene: DetectionResult::unknown().scene,
        };
        assert!(det.validate().is_err());
    }

    #[test]
    fn test_vocabulary_entry_optional_phonetic() {
        let json = r#"{
            "word": "playa",
            "translation": "beach",
            "category": "noun",
            "difficulty": "beginner",
            "example": "Vamos a la playa.",
            "context": "The scene is set on a beach."
        }"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, WordCategory::Noun);
        assert!(entry.phonetic.is_none());
        // phonetic is omitted on re-serialization
        let out = serde_json::to_string(&entry).unwrap();
        assert!(!out.contains("phonetic"));
    }

    #[test]
    fn test_category_and_difficulty_display_match_wire_codes() {
        assert_eq!(WordCategory::Noun.to_string(), "noun");
        assert_eq!(Difficulty::Beginner.to_string(), "beginner");
        // the displayed name is the serialized name
        let json = serde_json::to_string(&WordCategory::Interjection).unwrap();
        assert_eq!(json, format!("\"{}\"", WordCategory::Interjection));
        let json = serde_json::to_string(&Difficulty::Advanced).unwrap();
        assert_eq!(json, format!("\"{}\"", Difficulty::Advanced));
    }

    #[test]
    fn test_analysis_result_partial() {
        let mut result = AnalysisResult::default();
        assert!(result.is_empty());
        result.story = Some(Story::failed());
        assert!(!result.is_empty());
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("vocabulary"));
        assert!(json.contains("story"));
    }

    #[test]
    fn test_analysis_document_round_trip() {
        let input = AnalysisInput::Description("a busy market in the morning".into());
        let results = AnalysisResult {
            detection: Some(DetectionResult::unknown()),
            vocabulary: Some(VocabularyResult::empty()),
            story: Some(Story::failed()),
            conversation: Some(Conversation::failed()),
        };
        let doc = AnalysisDocument::new(&input, LanguagePair::default(), results);
        let json = serde_json::to_string_pretty(&doc).unwrap();
        assert!(json.contains("\"sourceLanguage\""));
        assert!(json.contains("\"inputMode\""));
        let parsed: AnalysisDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
