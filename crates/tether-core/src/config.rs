use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Tether application.
///
/// Loaded from `~/.tether/config.toml` by default. Each section corresponds
/// to one subsystem of the conversation core or its collaborator boundaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TetherConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub assist: AssistConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl TetherConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TetherConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Conversation history import/export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// CSV file the history is loaded from and exported to.
    pub csv_path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            csv_path: "./chat_history.csv".to_string(),
        }
    }
}

/// Assistant persona settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Chat-completion model name.
    pub model: String,
    /// Chat mode: "normal" or "experimental".
    pub mode: String,
    /// Maximum message length in characters.
    pub max_message_chars: usize,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            model: "llama-7b-chat".to_string(),
            mode: "normal".to_string(),
            max_message_chars: 2000,
        }
    }
}

/// Speech-to-text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether voice input is offered at all.
    pub enabled: bool,
    /// Maximum accepted audio upload size in bytes.
    pub max_audio_bytes: usize,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_audio_bytes: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TetherConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.history.csv_path, "./chat_history.csv");
        assert_eq!(config.assist.model, "llama-7b-chat");
        assert_eq!(config.assist.mode, "normal");
        assert_eq!(config.assist.max_message_chars, 2000);
        assert!(config.speech.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
            [assist]
            model = "llama-13b-chat"
        "#;
        let config: TetherConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assist.model, "llama-13b-chat");
        // Untouched sections keep their defaults.
        assert_eq!(config.assist.mode, "normal");
        assert_eq!(config.history.csv_path, "./chat_history.csv");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TetherConfig::default();
        config.general.log_level = "debug".to_string();
        config.history.csv_path = "/tmp/history.csv".to_string();
        config.save(&path).unwrap();

        let loaded = TetherConfig::load(&path).unwrap();
        assert_eq!(loaded.general.log_level, "debug");
        assert_eq!(loaded.history.csv_path, "/tmp/history.csv");
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.toml");
        let config = TetherConfig::load_or_default(&path);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "general = [[[").unwrap();
        assert!(TetherConfig::load(&path).is_err());
    }
}
