// crates/testsmith-server/src/llm/logging.rs
// Shared logging helpers for model host calls

use testsmith_types::ModelConfig;
use tracing::info;

/// Log an outgoing completion request (sizes only, never prompt text)
pub fn log_request(provider: &str, config: &ModelConfig, prompt_len: usize) {
    info!(
        model = %config.model,
        prompt_len,
        temperature = config.temperature,
        top_p = config.top_p,
        num_predict = config.max_tokens,
        "Sending request to {}", provider
    );
}

/// Log completion summary for a model call
pub fn log_completion(provider: &str, model: &str, duration_ms: u64, content_len: usize) {
    info!(
        model = %model,
        duration_ms,
        content_len,
        "{} completion finished", provider
    );
}
