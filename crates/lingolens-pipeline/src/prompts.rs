//! Typed prompt templates, one per pipeline stage.
//!
//! Each template takes an explicit parameter struct and returns a
//! [`PromptPair`], keeping prompt text and schema expectations in one place
//! instead of scattered format strings.

use lingolens_types::{DetectionResult, LanguagePair};

/// System and user prompt for one model call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Upper bound on detected object names threaded into generation prompts,
/// keeping prompt size bounded regardless of how much detection returns.
pub const OBJECT_PROMPT_LIMIT: usize = 5;

/// Shared inputs for the three generation stages.
pub struct StageContext<'a> {
    pub detection: &'a DetectionResult,
    pub languages: LanguagePair,
}

impl StageContext<'_> {
    /// Comma-joined names of at most [`OBJECT_PROMPT_LIMIT`] detected objects.
    fn object_names(&self) -> String {
        self.detection
            .objects
            .iter()
            .take(OBJECT_PROMPT_LIMIT)
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Detection prompt for the image path (vision model).
pub fn image_detection() -> PromptPair {
    PromptPair {
        system: "You are an expert computer vision system. Analyze images to identify \
                 objects, people, animals, locations, activities, and scenes with high accuracy."
            .to_string(),
        user: "Analyze this image and identify all visible elements. For each object give \
               its name, a confidence between 0 and 1, and a short description. Then \
               summarize the scene: its setting, the type of location, the activity taking \
               place, and the overall mood."
            .to_string(),
    }
}

/// Detection prompt for the text-description path. The model is asked to
/// infer plausible scene contents rather than see an image.
pub fn description_detection(description: &str) -> PromptPair {
    PromptPair {
        system: "You are an expert scene analyst. Given a short written description of a \
                 scene, infer the objects and atmosphere that would plausibly be present."
            .to_string(),
        user: format!(
            "A scene is described as follows: \"{description}\". Without seeing an image, \
             infer the objects likely present in such a scene. For each object give its \
             name, a confidence between 0 and 1, and a short description. Then summarize \
             the scene: its setting, the type of location, the activity taking place, and \
             the overall mood."
        ),
    }
}

/// Vocabulary-stage prompt.
pub fn vocabulary(ctx: &StageContext) -> PromptPair {
    let target = ctx.languages.target.display_name();
    let source = ctx.languages.source.display_name();
    let scene = &ctx.detection.scene;
    PromptPair {
        system: format!(
            "You are an expert language teacher specializing in {target}. Create \
             comprehensive vocabulary lists for language learners based on scene content."
        ),
        user: format!(
            "Based on this scene analysis:\n\
             - Objects detected: {objects}\n\
             - Scene: {location}, {activity}\n\n\
             Create a vocabulary list of {count} practical {target} words useful in this \
             context. Translate each word into {source}, label its part of speech and \
             difficulty, give an example sentence in {target}, and explain how the word \
             relates to the scene.",
            objects = ctx.object_names(),
            location = scene.location,
            activity = scene.activity,
            count = lingolens_types::VocabularyResult::TARGET_WORDS,
        ),
    }
}

/// Story-stage prompt.
pub fn story(ctx: &StageContext) -> PromptPair {
    let target = ctx.languages.target.display_name();
    let source = ctx.languages.source.display_name();
    let scene = &ctx.detection.scene;
    PromptPair {
        system: format!(
            "You are a creative storyteller and language teacher. Write engaging short \
             stories in {target} that help language learners practice reading comprehension."
        ),
        user: format!(
            "Create an engaging short story in {target} based on this scene:\n\
             - Setting: {location}\n\
             - Activity: {activity}\n\
             - Objects present: {objects}\n\n\
             Make the story 150-300 words, appropriate for language learners, and \
             incorporate cultural elements. Include a moral and a summary translation \
             in {source}.",
            location = scene.location,
            activity = scene.activity,
            objects = ctx.object_names(),
        ),
    }
}

/// Conversation-stage prompt.
pub fn conversation(ctx: &StageContext) -> PromptPair {
    let target = ctx.languages.target.display_name();
    let source = ctx.languages.source.display_name();
    let scene = &ctx.detection.scene;
    PromptPair {
        system: format!(
            "You are an expert dialogue creator and language teacher. Create realistic \
             conversations in {target} that would naturally occur in the given context."
        ),
        user: format!(
            "Create a realistic dialogue scenario in {target} based on this context:\n\
             - Location: {location}\n\
             - Activity: {activity}\n\
             - Objects/Setting: {objects}\n\n\
             Write a single conversation with 5-6 exchanges between two or more \
             participants. Translate each line into {source} and add relevant cultural \
             notes.",
            location = scene.location,
            activity = scene.activity,
            objects = ctx.object_names(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingolens_types::{DetectedObject, Language, Scene};

    fn detection_with_objects(count: usize) -> DetectionResult {
        DetectionResult {
            objects: (1..=count)
                .map(|i| DetectedObject {
                    name: format!("object{i}"),
                    confidence: 0.9,
                    description: format!("description of object{i}"),
                })
                .collect(),
            scene: Scene {
                setting: "outdoors".into(),
                location: "beach".into(),
                activity: "swimming".into(),
                mood: "relaxed".into(),
            },
        }
    }

    #[test]
    fn test_object_names_truncate_to_limit() {
        let detection = detection_with_objects(8);
        let ctx = StageContext {
            detection: &detection,
            languages: LanguagePair::default(),
        };
        for prompt in [vocabulary(&ctx), story(&ctx), conversation(&ctx)] {
            assert!(prompt.user.contains("object5"), "top-5 prefix must appear");
            assert!(
                !prompt.user.contains("object6"),
                "objects past the limit must not appear"
            );
        }
    }

    #[test]
    fn test_prompts_name_both_languages() {
        let detection = detection_with_objects(2);
        let ctx = StageContext {
            detection: &detection,
            languages: LanguagePair {
                source: Language::French,
                target: Language::Chinese,
            },
        };
        let prompt = vocabulary(&ctx);
        assert!(prompt.system.contains("Chinese (Simplified)"));
        assert!(prompt.user.contains("French"));
    }

    #[test]
    fn test_description_detection_embeds_description() {
        let prompt = description_detection("a quiet cafe on a rainy evening");
        assert!(prompt.user.contains("a quiet cafe on a rainy evening"));
        assert!(prompt.user.contains("Without seeing an image"));
    }

    #[test]
    fn test_generation_prompts_survive_empty_detection() {
        let detection = DetectionResult::unknown();
        let ctx = StageContext {
            detection: &detection,
            languages: LanguagePair::default(),
        };
        let prompt = story(&ctx);
        assert!(prompt.user.contains("unknown"));
    }
}
