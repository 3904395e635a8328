// crates/testsmith-server/src/llm/client.rs
// Model host abstraction: the one seam between the pipeline and the network

use async_trait::async_trait;
use testsmith_types::{ModelConfig, OllamaModel};

use crate::error::Result;

/// Completion backend used by the generation pipeline.
///
/// `complete` is the only call on the generation path. It must surface
/// `UpstreamUnavailable`, `ModelNotFound` and `Upstream` distinctly and must
/// not retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the raw text
    async fn complete(&self, prompt: &str, config: &ModelConfig) -> Result<String>;

    /// Models available on the host
    async fn list_models(&self) -> Result<Vec<OllamaModel>>;

    /// Whether the host answers at all
    async fn is_healthy(&self) -> bool;

    /// Download a model onto the host
    async fn pull_model(&self, name: &str) -> Result<()>;

    /// Base URL of the host, for logs and messages
    fn base_url(&self) -> &str;
}
