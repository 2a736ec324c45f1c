use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lingolens_types::{Language, LanguagePair};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings directory not found")]
    NoDirFound,
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// Process-wide user settings, persisted as a single JSON document.
///
/// Wire keys keep the camelCase names of the persisted settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Target language (the language being learned).
    #[serde(default = "default_language")]
    pub language: Language,
    /// Source language for gloss translations.
    #[serde(default = "default_source_language", rename = "sourceLanguage")]
    pub source_language: Language,
    #[serde(default = "default_theme")]
    pub theme: Theme,
    /// Base URL of the local Ollama server.
    #[serde(default = "default_ollama_url", rename = "ollamaUrl")]
    pub ollama_url: String,
}

fn default_language() -> Language {
    Language::Spanish
}

fn default_source_language() -> Language {
    Language::English
}

fn default_theme() -> Theme {
    Theme::Dark
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
            source_language: default_source_language(),
            theme: default_theme(),
            ollama_url: default_ollama_url(),
        }
    }
}

impl Settings {
    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair {
            source: self.source_language,
            target: self.language,
        }
    }
}

/// Resolve the lingolens settings directory (~/.lingolens/).
pub fn settings_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".lingolens"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the settings file path (~/.lingolens/settings.json).
pub fn settings_file_path() -> Result<PathBuf, ConfigError> {
    Ok(settings_dir()?.join("settings.json"))
}

/// Load settings from the default path, falling back to defaults.
pub fn load_settings() -> Result<Settings, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = settings_file_path()?;
    load_settings_from(&path)
}

/// Load settings from a specific path.
///
/// A missing or unreadable file yields defaults rather than an error; settings
/// corruption must never block the application from starting.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        tracing::debug!(
            "Settings file not found at {}, using defaults",
            path.display()
        );
        return Ok(Settings::default());
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Settings file unreadable, using defaults: {e}"
            );
            return Ok(Settings::default());
        }
    };
    match json5::from_str(&content) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Settings file unparsable, using defaults: {e}"
            );
            Ok(Settings::default())
        }
    }
}

/// Ensure the settings directory exists.
pub fn ensure_settings_dir() -> Result<PathBuf, ConfigError> {
    let dir = settings_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Save settings to the default path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    let dir = ensure_settings_dir()?;
    save_settings_to(&dir.join("settings.json"), settings)
}

/// Save settings to a specific path.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let content =
        serde_json::to_string_pretty(settings).map_err(|e| ConfigError::Io(std::io::Error::other(e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::Spanish);
        assert_eq!(settings.source_language, Language::English);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn test_language_pair_from_settings() {
        let settings = Settings {
            language: Language::Japanese,
            source_language: Language::French,
            ..Settings::default()
        };
        let pair = settings.language_pair();
        assert_eq!(pair.target, Language::Japanese);
        assert_eq!(pair.source, Language::French);
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"sourceLanguage\""));
        assert!(json.contains("\"ollamaUrl\""));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: Settings = json5::from_str(r#"{ "language": "german" }"#).unwrap();
        assert_eq!(settings.language, Language::German);
        assert_eq!(settings.source_language, Language::English);
        assert_eq!(settings.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.language, Language::Spanish);
    }

    #[test]
    fn test_unreadable_file_yields_defaults() {
        // a directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();
        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.language, Language::Spanish);
        assert_eq!(settings.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{{{not json").unwrap();
        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.language, Language::Spanish);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            language: Language::Korean,
            source_language: Language::Portuguese,
            theme: Theme::Light,
            ollama_url: "http://192.168.1.10:11434".to_string(),
        };
        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.language, Language::Korean);
        assert_eq!(loaded.source_language, Language::Portuguese);
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.ollama_url, "http://192.168.1.10:11434");
    }
}
