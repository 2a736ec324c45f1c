//! Per-stage output schemas for schema-constrained generation.
//!
//! Each schema is sent as the `format` field of an Ollama generate request so
//! the server constrains its output shape, and doubles as the contract the
//! typed result structs are deserialized against.

use serde_json::{Value, json};

use crate::Stage;

/// JSON Schema describing the expected model output for a stage.
pub fn schema_for(stage: Stage) -> Value {
    match stage {
        Stage::Detection => detection_schema(),
        Stage::Vocabulary => vocabulary_schema(),
        Stage::Story => story_schema(),
        Stage::Conversation => conversation_schema(),
    }
}

fn difficulty_schema() -> Value {
    json!({
        "type": "string",
        "enum": ["beginner", "intermediate", "advanced"]
    })
}

fn detection_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "objects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "confidence": { "type": "number", "minimum": 0, "maximum": 1 },
                        "description": { "type": "string" }
                    },
                    "required": ["name", "confidence", "description"]
                }
            },
            "scene": {
                "type": "object",
                "properties": {
                    "setting": { "type": "string" },
                    "location": { "type": "string" },
                    "activity": { "type": "string" },
                    "mood": { "type": "string" }
                },
                "required": ["setting", "location", "activity", "mood"]
            }
        },
        "required": ["objects", "scene"]
    })
}

fn vocabulary_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "vocabulary": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "word": { "type": "string" },
                        "translation": { "type": "string" },
                        "category": {
                            "type": "string",
                            "enum": [
                                "noun", "verb", "adjective", "adverb",
                                "preposition", "conjunction", "interjection"
                            ]
                        },
                        "difficulty": difficulty_schema(),
                        "example": { "type": "string" },
                        "context": { "type": "string" },
                        "phonetic": { "type": "string" }
                    },
                    "required": [
                        "word", "translation", "category",
                        "difficulty", "example", "context"
                    ]
                }
            }
        },
        "required": ["vocabulary"]
    })
}

fn story_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "content": { "type": "string" },
            "difficulty": difficulty_schema(),
            "word_count": { "type": "integer", "minimum": 0 },
            "key_vocabulary": {
                "type": "array",
                "items": { "type": "string" }
            },
            "moral": { "type": "string" },
            "translation": { "type": "string" }
        },
        "required": [
            "title", "content", "difficulty", "word_count",
            "key_vocabulary", "moral", "translation"
        ]
    })
}

fn conversation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "scenario": { "type": "string" },
            "participants": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 2
            },
            "difficulty": difficulty_schema(),
            "dialogue": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "speaker": { "type": "string" },
                        "text": { "type": "string" },
                        "translation": { "type": "string" }
                    },
                    "required": ["speaker", "text", "translation"]
                }
            },
            "cultural_notes": { "type": "string" }
        },
        "required": [
            "scenario", "participants", "difficulty",
            "dialogue", "cultural_notes"
        ]
    })
}
