//! Sage Configuration
//!
//! Configuration lives in `<config dir>/sage/config.toml`
//! (`~/.config/sage/config.toml` on Linux). `SAGE_CONFIG` overrides the path.
//! Every field has a default, so a missing or partial file is fine.

use crate::age::{clamp_age, DEFAULT_AGE};
use crate::error::SageError;
use crate::models::ModelId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "sage";
const CONFIG_FILE: &str = "config.toml";
/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SAGE_CONFIG";

/// Generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Ollama base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier (gemma:2b or mistral)
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds (valid: 5-600)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    ModelId::default().as_str().to_string()
}

fn default_timeout() -> u64 {
    120 // small local models can be slow on first load
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl LlmSettings {
    /// Clamp timeout_secs to valid range (5-600)
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.clamp(5, 600)
    }

    pub fn model_id(&self) -> Result<ModelId, SageError> {
        self.model.parse()
    }
}

/// Learner profile settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerSettings {
    /// Age used when --age is not given (valid: 3-80)
    #[serde(default = "default_age")]
    pub default_age: u8,
}

fn default_age() -> u8 {
    DEFAULT_AGE
}

impl Default for LearnerSettings {
    fn default() -> Self {
        Self {
            default_age: default_age(),
        }
    }
}

impl LearnerSettings {
    pub fn effective_age(&self) -> u8 {
        clamp_age(self.default_age as i64)
    }

    pub fn age_was_clamped(&self) -> bool {
        self.default_age != self.effective_age()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SageConfig {
    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub learner: LearnerSettings,
}

impl SageConfig {
    /// Load config from the resolved path, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SageError> {
        let content = fs::read_to_string(path)?;
        let config: SageConfig = toml::from_str(&content)?;
        config.llm.model_id()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, SageError> {
        toml::to_string_pretty(self).map_err(|e| SageError::Config(e.to_string()))
    }
}

/// Get the config file path: $SAGE_CONFIG, else the per-user config dir
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SageConfig::default();
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
        assert_eq!(config.llm.model, "gemma:2b");
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.learner.default_age, 12);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nmodel = \"mistral\"").unwrap();

        let config = SageConfig::load_from(file.path()).unwrap();
        assert_eq!(config.llm.model_id().unwrap(), ModelId::Mistral);
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
        assert_eq!(config.learner.default_age, 12);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nmodel = \"llama3\"").unwrap();
        assert!(matches!(
            SageConfig::load_from(file.path()),
            Err(SageError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm\nmodel = ").unwrap();
        assert!(matches!(SageConfig::load_from(file.path()), Err(SageError::Toml(_))));
    }

    #[test]
    fn test_clamping() {
        let mut llm = LlmSettings {
            timeout_secs: 1,
            ..Default::default()
        };
        assert_eq!(llm.effective_timeout_secs(), 5);
        llm.timeout_secs = 10_000;
        assert_eq!(llm.effective_timeout_secs(), 600);

        let mut learner = LearnerSettings { default_age: 1 };
        assert_eq!(learner.effective_age(), 3);
        assert!(learner.age_was_clamped());
        learner.default_age = 95;
        assert_eq!(learner.effective_age(), 80);
        learner.default_age = 30;
        assert!(!learner.age_was_clamped());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = SageConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[llm]"));
        assert!(toml_str.contains("[learner]"));
        assert!(toml_str.contains("gemma:2b"));
    }
}
