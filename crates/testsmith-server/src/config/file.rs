// crates/testsmith-server/src/config/file.rs
// File-based configuration from ~/.testsmith/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use testsmith_types::{Framework, Language, PromptTemplate};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct TestsmithConfig {
    #[serde(default)]
    pub ollama: OllamaSection,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
}

/// Ollama section; each value applies only when its env var is unset
#[derive(Debug, Deserialize, Default)]
pub struct OllamaSection {
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Custom template registered at startup
#[derive(Debug, Deserialize)]
pub struct TemplateEntry {
    pub language: Language,
    pub framework: Framework,
    pub instruction: String,
    #[serde(default)]
    pub examples: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl TemplateEntry {
    pub fn to_template(&self) -> PromptTemplate {
        PromptTemplate {
            instruction: self.instruction.clone(),
            examples: self.examples.clone(),
            requirements: self.requirements.clone(),
        }
    }
}

impl TestsmithConfig {
    /// Load config from ~/.testsmith/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Directory holding config.toml and .env
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".testsmith")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}
