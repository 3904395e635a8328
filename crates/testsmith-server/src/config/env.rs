// crates/testsmith-server/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::fmt;
use tracing::{debug, info};

use crate::llm::is_local_url;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Problems found in the environment. Errors abort startup, warnings are logged.
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ConfigValidation {
    /// One error per line; warnings are reported separately
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "environment OK"),
            errors => {
                write!(f, "{} environment problem(s):", errors.len())?;
                for err in errors {
                    write!(f, "\n  {}", err)?;
                }
                Ok(())
            }
        }
    }
}

/// Environment configuration - all env vars in one place.
///
/// Every field is `None` when the variable is unset (or blank) so the config
/// file can fill the gap; built-in defaults are applied in `Settings`.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Ollama host (OLLAMA_BASE_URL)
    pub ollama_base_url: Option<String>,
    /// Model used when a request names none (OLLAMA_DEFAULT_MODEL)
    pub default_model: Option<String>,
    /// Per-request timeout in seconds (OLLAMA_TIMEOUT_SECS)
    pub timeout_secs: Option<u64>,
    /// Bind address for `serve` (TESTSMITH_HOST)
    pub host: Option<String>,
    /// Bind port for `serve` (TESTSMITH_PORT)
    pub port: Option<u16>,
    /// Variables that were set but did not parse
    pub unparsable: Vec<String>,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut unparsable = Vec::new();

        let timeout_secs = parse_number::<u64>("OLLAMA_TIMEOUT_SECS", read("OLLAMA_TIMEOUT_SECS"), &mut unparsable);
        let port = parse_number::<u16>("TESTSMITH_PORT", read("TESTSMITH_PORT"), &mut unparsable);

        let config = Self {
            ollama_base_url: read("OLLAMA_BASE_URL"),
            default_model: read("OLLAMA_DEFAULT_MODEL"),
            timeout_secs,
            host: read("TESTSMITH_HOST"),
            port,
            unparsable,
        };
        debug!(
            base_url = ?config.ollama_base_url,
            default_model = ?config.default_model,
            "Environment configuration read"
        );
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::default();

        for name in &self.unparsable {
            validation.errors.push(format!("{} is not a valid number", name));
        }

        if self.timeout_secs == Some(0) {
            validation.errors.push("OLLAMA_TIMEOUT_SECS must be greater than zero".to_string());
        }

        if let Some(ref url) = self.ollama_base_url {
            if url::Url::parse(url).is_err() {
                validation.errors.push(format!("OLLAMA_BASE_URL '{}' is not a valid URL", url));
            } else if !is_local_url(url) {
                validation.warnings.push(format!(
                    "OLLAMA_BASE_URL '{}' is not a local address. Submitted code will leave this machine.",
                    url
                ));
            }
        }

        validation
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
    unparsable: &mut Vec<String>,
) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            unparsable.push(name.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_empty_environment() {
        let config = env(&[]);
        assert!(config.ollama_base_url.is_none());
        assert!(config.default_model.is_none());
        assert!(config.timeout_secs.is_none());
        assert!(config.port.is_none());

        let validation = config.validate();
        assert!(validation.is_valid());
        assert!(validation.warnings.is_empty());
        assert_eq!(validation.to_string(), "environment OK");
    }

    #[test]
    fn test_reads_and_trims_values() {
        let config = env(&[
            ("OLLAMA_BASE_URL", " http://127.0.0.1:11434 "),
            ("OLLAMA_DEFAULT_MODEL", "deepseek-coder"),
            ("OLLAMA_TIMEOUT_SECS", "30"),
            ("TESTSMITH_HOST", "127.0.0.1"),
            ("TESTSMITH_PORT", "8080"),
        ]);
        assert_eq!(config.ollama_base_url.as_deref(), Some("http://127.0.0.1:11434"));
        assert_eq!(config.default_model.as_deref(), Some("deepseek-coder"));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.port, Some(8080));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = env(&[("OLLAMA_DEFAULT_MODEL", "   ")]);
        assert!(config.default_model.is_none());
    }

    #[test]
    fn test_unparsable_numbers_are_errors() {
        let config = env(&[("OLLAMA_TIMEOUT_SECS", "soon"), ("TESTSMITH_PORT", "99999")]);
        assert!(config.timeout_secs.is_none());
        assert!(config.port.is_none());

        let validation = config.validate();
        assert!(!validation.is_valid());
        assert_eq!(validation.errors.len(), 2);
        assert_eq!(
            validation.to_string(),
            "2 environment problem(s):\n  OLLAMA_TIMEOUT_SECS is not a valid number\n  TESTSMITH_PORT is not a valid number"
        );
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let validation = env(&[("OLLAMA_TIMEOUT_SECS", "0")]).validate();
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_remote_host_is_warning() {
        let validation = env(&[("OLLAMA_BASE_URL", "http://10.0.0.5:11434")]).validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
        assert_eq!(validation.to_string(), "environment OK");
    }
}
