// crates/testsmith-server/src/error.rs
// Standardized error types for testsmith

use thiserror::Error;

/// Main error type for the testsmith library
#[derive(Error, Debug)]
pub enum TestsmithError {
    /// Template registration rejected (empty instruction)
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// Model host could not be reached at all
    #[error("Unable to connect to Ollama at {base_url}. Please ensure Ollama is running.")]
    UpstreamUnavailable { base_url: String },

    /// Model host is up but does not have the requested model
    #[error("Model \"{model}\" not found. Please pull the model first.")]
    ModelNotFound { model: String },

    /// Any other failure reported by the model host, message passed through
    #[error("{0}")]
    Upstream(String),

    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using TestsmithError
pub type Result<T> = std::result::Result<T, TestsmithError>;

impl TestsmithError {
    /// True for failures that originate at the model host
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::ModelNotFound { .. } | Self::Upstream(_)
        )
    }

    /// Short label used as the `error` field of the API envelope
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation failed",
            Self::InvalidTemplate(_) => "Invalid template",
            Self::UpstreamUnavailable { .. } | Self::ModelNotFound { .. } | Self::Upstream(_) => {
                "Generation failed"
            }
            Self::Io(_) | Self::Json(_) | Self::Config(_) => "Internal error",
        }
    }
}
