// crates/testsmith-server/src/llm/mod.rs
// Model host clients

mod client;
mod logging;
mod ollama;

pub use client::CompletionClient;
pub use ollama::OllamaClient;
pub(crate) use ollama::is_local_url;
