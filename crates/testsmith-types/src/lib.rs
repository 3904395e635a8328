// crates/testsmith-types/src/lib.rs
// Shared types for testsmith (wire shapes used by the server, CLI and UI)
// No native-only dependencies allowed here

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Default model when the request does not name one
pub const DEFAULT_MODEL: &str = "codellama";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TOP_P: f64 = 0.9;

/// Upper bound on submitted source length, in characters
pub const MAX_CODE_CHARS: usize = 10_000;

// ═══════════════════════════════════════
// LANGUAGES & FRAMEWORKS
// ═══════════════════════════════════════

/// Source language of the code under test
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Go,
    Rust,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Comma-separated list of every wire name, in declaration order
    pub fn supported() -> String {
        Self::iter().map(|l| l.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Test framework the generated tests should target
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Framework {
    Jest,
    Mocha,
    Vitest,
    Pytest,
    Junit,
    Nunit,
    Gtest,
    GoTest,
    RustTest,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Comma-separated list of every wire name, in declaration order
    pub fn supported() -> String {
        Self::iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
    }
}

// ═══════════════════════════════════════
// MODEL CONFIGURATION
// ═══════════════════════════════════════

/// Fully resolved sampling configuration for one completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub stream: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
            stream: false,
        }
    }
}

/// Partial configuration as supplied by a caller; absent fields take defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ModelConfig {
    /// Apply caller overrides on top of the defaults.
    ///
    /// `default_model` is used when the caller names no model, so deployments
    /// can swap the stock model without every client sending one.
    pub fn resolve(overrides: Option<&ModelConfigOverrides>, default_model: &str) -> Self {
        let overrides = overrides.cloned().unwrap_or_default();
        Self {
            model: overrides
                .model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| default_model.to_string()),
            temperature: overrides.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: overrides.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            top_p: overrides.top_p.unwrap_or(DEFAULT_TOP_P),
            stream: overrides.stream.unwrap_or(false),
        }
    }
}

// ═══════════════════════════════════════
// PROMPT TEMPLATES
// ═══════════════════════════════════════

/// Recipe for phrasing a prompt for one (language, framework) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub instruction: String,
    /// Worked input/output example demonstrating the expected style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Registry key for a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateKey {
    pub language: Language,
    pub framework: Framework,
}

impl std::fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.language, self.framework)
    }
}

// ═══════════════════════════════════════
// GENERATION
// ═══════════════════════════════════════

/// A validated test generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub code: String,
    pub language: Language,
    pub framework: Framework,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_config: Option<ModelConfigOverrides>,
}

/// Result of one successful generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTests {
    #[serde(rename = "tests")]
    pub test_code: String,
    pub language: Language,
    pub framework: Framework,
    #[serde(rename = "model")]
    pub model_name: String,
    pub generated_at: DateTime<Utc>,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub test_count: usize,
    /// Wall-clock milliseconds from request start to result
    #[serde(rename = "executionTime")]
    pub execution_time_ms: u64,
}

// ═══════════════════════════════════════
// MODEL HOST
// ═══════════════════════════════════════

/// Model advertised by the Ollama host (`/api/tags`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaModel {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub modified_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

/// Health check payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub server: ComponentStatus,
    pub ollama: ComponentStatus,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime: f64,
}

// ═══════════════════════════════════════
// API ENVELOPE
// ═══════════════════════════════════════

/// Generic success/data/message envelope for every HTTP response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }
}
