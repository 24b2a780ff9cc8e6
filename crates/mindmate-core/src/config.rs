use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{MindmateError, Result};

/// Top-level configuration for the MindMate application.
///
/// Loaded from `~/.mindmate/config.toml` by default. Each section covers
/// one subsystem or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindmateConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl MindmateConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MindmateConfig = toml::from_str(&content)?;
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
        let content =
            toml::to_string_pretty(self).map_err(|e| MindmateError::Config(e.to_string()))?;
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

/// Language-model collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible chat completions API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Reply shown when the language model call fails. The turn still
    /// commits with this text.
    pub fallback_reply: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-70b-8192".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
            api_key_env: "GROQ_API_KEY".to_string(),
            fallback_reply:
                "I'm having trouble responding right now. Let's take one slow breath together \
                 and try again in a moment."
                    .to_string(),
        }
    }
}

/// Speech input/output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether to speak replies aloud.
    pub output_enabled: bool,
    /// Utterance text recorded when speech was captured but not understood.
    pub placeholder_unintelligible: String,
    /// Utterance text recorded when the recognition service was unavailable.
    pub placeholder_service_error: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            output_enabled: true,
            placeholder_unintelligible: "Sorry, I couldn't understand.".to_string(),
            placeholder_service_error: "Speech recognition failed.".to_string(),
        }
    }
}

/// Turn-engine table overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Optional path to a TOML file overriding the keyword rule table.
    pub rules_path: Option<String>,
    /// Optional path to a TOML file overriding the suggestion bank.
    pub bank_path: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
