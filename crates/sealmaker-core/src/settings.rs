//! Application settings loaded from a JSON file.

use crate::i18n::Language;
use crate::seal::FontFamily;
use crate::suggest::GeminiSuggester;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Text suggestion service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub model: String,
    /// Base URL of the generative language API.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SuggestionSettings {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            api_key_env: "API_KEY".to_string(),
            model: GeminiSuggester::DEFAULT_MODEL.to_string(),
            endpoint: GeminiSuggester::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Initial UI language.
    pub language: Language,
    /// Pixel multiplier for exported images (1.0 = 400×400).
    pub export_scale: f32,
    /// Directory for exported PNGs (None = current directory).
    pub export_dir: Option<PathBuf>,
    /// Bold font file per family; unlisted families are looked up in system font directories.
    pub fonts: BTreeMap<FontFamily, PathBuf>,
    pub suggestion: SuggestionSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::En,
            export_scale: 1.0,
            export_dir: None,
            fonts: BTreeMap::new(),
            suggestion: SuggestionSettings::default(),
        }
    }
}

impl AppSettings {
    /// Default settings file location.
    ///
    /// On Unix: `~/.config/sealmaker/settings.json`
    /// On Windows: `%APPDATA%\sealmaker\settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join("sealmaker").join("settings.json"))
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            SettingsError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load settings from `path`, or the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    log::debug!("No config directory, using default settings");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            log::debug!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        log::info!("Loading settings from {}", path.display());
        Self::load(&path)
    }

    /// Write settings to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, json)
            .map_err(|e| SettingsError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_for_missing_fields() {
        let settings = AppSettings::from_json(r#"{"language":"zh"}"#).unwrap();
        assert_eq!(settings.language, Language::Zh);
        assert_eq!(settings.export_scale, 1.0);
        assert!(settings.fonts.is_empty());
        assert_eq!(settings.suggestion.api_key_env, "API_KEY");
        assert_eq!(settings.suggestion.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_fonts_keyed_by_family_name() {
        let settings = AppSettings::from_json(
            r#"{"fonts":{"Noto Sans":"/fonts/NotoSans-Bold.ttf"},"suggestion":{"model":"m"}}"#,
        )
        .unwrap();
        assert_eq!(
            settings.fonts.get(&FontFamily::NotoSans),
            Some(&PathBuf::from("/fonts/NotoSans-Bold.ttf"))
        );
        assert_eq!(settings.suggestion.model, "m");
        assert_eq!(settings.suggestion.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.language = Language::Fr;
        settings.export_scale = 2.0;
        settings.save(&path).unwrap();

        let loaded = AppSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let settings = AppSettings::load_or_default(Some(&path)).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppSettings::load(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
