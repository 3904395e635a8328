// crates/testsmith-server/src/config/mod.rs
// Configuration: environment, config file, and the merged settings

pub mod env;
pub mod file;

pub use env::{ConfigValidation, EnvConfig};
pub use file::{TemplateEntry, TestsmithConfig};

use std::time::Duration;
use testsmith_types::DEFAULT_MODEL;

use env::{DEFAULT_HOST, DEFAULT_OLLAMA_BASE_URL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};

/// Effective settings after merging env > file > built-in defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub ollama_base_url: String,
    pub default_model: String,
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn resolve(env: &EnvConfig, file: &TestsmithConfig) -> Self {
        let ollama = &file.ollama;
        Self {
            ollama_base_url: env
                .ollama_base_url
                .clone()
                .or_else(|| ollama.base_url.clone())
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            default_model: env
                .default_model
                .clone()
                .or_else(|| ollama.default_model.clone().filter(|m| !m.trim().is_empty()))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                env.timeout_secs
                    .or(ollama.timeout_secs)
                    .filter(|&s| s > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            host: env.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.port.unwrap_or(DEFAULT_PORT),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&EnvConfig::default(), &TestsmithConfig::default())
    }
}

/// Load `.env` files: ~/.testsmith/.env first, then ./.env for overrides
pub fn load_dotenv() {
    let global_env = TestsmithConfig::config_dir().join(".env");
    let _ = dotenvy::from_path(&global_env);
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use file::OllamaSection;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ollama_base_url, "http://localhost:11434");
        assert_eq!(settings.default_model, "codellama");
        assert_eq!(settings.timeout, Duration::from_secs(120));
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 3001);
    }

    #[test]
    fn test_file_fills_unset_env() {
        let file = TestsmithConfig {
            ollama: OllamaSection {
                base_url: Some("http://127.0.0.1:9999".to_string()),
                default_model: Some("llama3".to_string()),
                timeout_secs: Some(30),
            },
            templates: Vec::new(),
        };
        let settings = Settings::resolve(&EnvConfig::default(), &file);
        assert_eq!(settings.ollama_base_url, "http://127.0.0.1:9999");
        assert_eq!(settings.default_model, "llama3");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_beats_file() {
        let env = EnvConfig {
            default_model: Some("deepseek-coder".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let file = TestsmithConfig {
            ollama: OllamaSection {
                base_url: None,
                default_model: Some("llama3".to_string()),
                timeout_secs: Some(30),
            },
            templates: Vec::new(),
        };
        let settings = Settings::resolve(&env, &file);
        assert_eq!(settings.default_model, "deepseek-coder");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.ollama_base_url, "http://localhost:11434");
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let env = EnvConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let settings = Settings::resolve(&env, &TestsmithConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs(120));
    }
}
