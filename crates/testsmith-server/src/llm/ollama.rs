// crates/testsmith-server/src/llm/ollama.rs
// Ollama native API client (/api/generate, /api/tags, /api/pull)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use testsmith_types::{ModelConfig, OllamaModel};
use tracing::{debug, instrument, warn};

use super::client::CompletionClient;
use super::logging::{log_completion, log_request};
use crate::error::{Result, TestsmithError};
use crate::http::{DEFAULT_TIMEOUT, create_client};

const PROVIDER: &str = "Ollama";

/// Fallback message when the host fails without saying why
const GENERIC_FAILURE: &str = "Ollama request failed";

/// Normalize Ollama base URL by stripping trailing slashes and /v1 suffix
fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().trim_end_matches('/').to_string();
    if url.ends_with("/v1") {
        url.truncate(url.len() - 3);
    }
    url
}

/// Check if a URL points to a local address (localhost, 127.0.0.1, [::1])
pub(crate) fn is_local_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.host() {
            Some(url::Host::Domain(d)) => d == "localhost",
            Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
            Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
            None => true,
        },
        Err(_) => true,
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extract completion text from a /api/generate body.
///
/// Non-streamed replies are one JSON object; streamed replies are NDJSON whose
/// `response` fragments are concatenated. An `error` field anywhere wins.
fn parse_generate_body(body: &str) -> Result<String> {
    if let Ok(single) = serde_json::from_str::<GenerateResponse>(body) {
        if let Some(error) = single.error {
            return Err(TestsmithError::Upstream(error));
        }
        return Ok(single.response.unwrap_or_default());
    }

    let mut text = String::new();
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let chunk: GenerateResponse = serde_json::from_str(line).map_err(|e| {
            TestsmithError::Upstream(format!("Unexpected response from Ollama: {}", e))
        })?;
        if let Some(error) = chunk.error {
            return Err(TestsmithError::Upstream(error));
        }
        if let Some(fragment) = chunk.response {
            text.push_str(&fragment);
        }
    }
    Ok(text)
}

/// Pull the `error` message out of a failure body, if it has one
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

/// Ollama API client (no auth required)
pub struct OllamaClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl OllamaClient {
    /// Create a client with the default request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_http_client(base_url, timeout, create_client(timeout))
    }

    /// Create a client around an existing reqwest::Client
    pub fn with_http_client(
        base_url: impl Into<String>,
        timeout: Duration,
        http: reqwest::Client,
    ) -> Self {
        let base_url = normalize_base_url(&base_url.into());

        if !is_local_url(&base_url) {
            warn!(
                "OLLAMA_BASE_URL points to non-local address '{}'. Code snippets will leave this machine.",
                base_url
            );
        }

        Self {
            base_url,
            timeout,
            http,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Map a transport-level failure onto the error taxonomy
    fn send_error(&self, err: reqwest::Error) -> TestsmithError {
        if err.is_connect() {
            TestsmithError::UpstreamUnavailable {
                base_url: self.base_url.clone(),
            }
        } else if err.is_timeout() {
            TestsmithError::Upstream(format!(
                "Ollama request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            TestsmithError::Upstream(format!("{}: {}", GENERIC_FAILURE, err))
        }
    }

    /// Single non-retried completion call
    #[instrument(skip(self, prompt, config), fields(model = %config.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str, config: &ModelConfig) -> Result<String> {
        let start = Instant::now();
        let body = GenerateRequest {
            model: &config.model,
            prompt,
            stream: config.stream,
            options: GenerateOptions {
                temperature: config.temperature,
                top_p: config.top_p,
                num_predict: config.max_tokens,
            },
        };

        log_request(PROVIDER, config, prompt.len());

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.send_error(e))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(body = %text, "Ollama reported missing model");
            return Err(TestsmithError::ModelNotFound {
                model: config.model.clone(),
            });
        }

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(status = %status, error = %message, "Ollama generation failed");
            return Err(TestsmithError::Upstream(message));
        }

        let completion = parse_generate_body(&text)?;
        log_completion(
            PROVIDER,
            &config.model,
            start.elapsed().as_millis() as u64,
            completion.len(),
        );
        Ok(completion)
    }

    /// Models installed on the host
    pub async fn tags(&self) -> Result<Vec<OllamaModel>> {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Failed to fetch Ollama models");
            return Err(TestsmithError::Upstream(
                "Unable to fetch available models from Ollama".to_string(),
            ));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| TestsmithError::Upstream(format!("Unexpected response from Ollama: {}", e)))?;
        Ok(tags.models)
    }

    /// Ask the host to download a model (blocks until the pull finishes)
    pub async fn pull(&self, name: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/api/pull", self.base_url))
            .json(&serde_json::json!({ "name": name, "stream": false }))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(model = name, status = %status, "Failed to pull model");
            let detail = error_message(&text).map(|e| format!(" ({})", e)).unwrap_or_default();
            return Err(TestsmithError::Upstream(format!(
                "Failed to pull model: {}{}",
                name, detail
            )));
        }
        if let Some(error) = error_message(&text) {
            return Err(TestsmithError::Upstream(format!("Failed to pull model: {} ({})", name, error)));
        }

        debug!(model = name, "Pulled model");
        Ok(())
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str, config: &ModelConfig) -> Result<String> {
        self.generate(prompt, config).await
    }

    async fn list_models(&self) -> Result<Vec<OllamaModel>> {
        self.tags().await
    }

    async fn is_healthy(&self) -> bool {
        match self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Ollama health check failed");
                false
            }
        }
    }

    async fn pull_model(&self, name: &str) -> Result<()> {
        self.pull(name).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::{get, post}};
    use serde_json::{Value, json};

    /// Serve a stub Ollama on an ephemeral local port
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_url_normalization() {
        assert_eq!(OllamaClient::new("http://localhost:11434/v1").base_url, "http://localhost:11434");
        assert_eq!(OllamaClient::new("http://localhost:11434/v1/").base_url, "http://localhost:11434");
        assert_eq!(OllamaClient::new("http://localhost:11434/").base_url, "http://localhost:11434");
        assert_eq!(OllamaClient::new(" http://localhost:11434 ").base_url, "http://localhost:11434");
    }

    #[test]
    fn test_is_local_url() {
        assert!(is_local_url("http://localhost:11434"));
        assert!(is_local_url("http://127.0.0.1:11434"));
        assert!(is_local_url("http://[::1]:11434"));
        assert!(!is_local_url("http://192.168.1.100:11434"));
        assert!(!is_local_url("https://ollama.example.com"));
    }

    #[test]
    fn test_default_timeout() {
        let client = OllamaClient::new("http://localhost:11434");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        let client = OllamaClient::with_timeout("http://localhost:11434", Duration::from_secs(5));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    // ========================================================================
    // Body parsing
    // ========================================================================

    #[test]
    fn test_parse_single_body() {
        let text = parse_generate_body(r#"{"model":"m","response":"abc","done":true}"#).unwrap();
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_parse_missing_response_is_empty() {
        assert_eq!(parse_generate_body(r#"{"done":true}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_error_field() {
        let err = parse_generate_body(r#"{"error":"model is loading"}"#).unwrap_err();
        assert!(matches!(err, TestsmithError::Upstream(ref m) if m == "model is loading"));
    }

    #[test]
    fn test_parse_ndjson_stream() {
        let body = "{\"response\":\"def \",\"done\":false}\n{\"response\":\"test_a()\",\"done\":false}\n{\"response\":\"\",\"done\":true}\n";
        assert_eq!(parse_generate_body(body).unwrap(), "def test_a()");
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_generate_body("<html>nope</html>").unwrap_err();
        assert!(err.to_string().contains("Unexpected response"));
    }

    // ========================================================================
    // Error taxonomy against a live stub
    // ========================================================================

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let client = OllamaClient::with_timeout("http://127.0.0.1:1", Duration::from_secs(2));
        let err = client
            .complete("prompt", &ModelConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TestsmithError::UpstreamUnavailable { .. }), "got {:?}", err);
        assert!(err.to_string().contains("Unable to connect to Ollama"));
    }

    #[tokio::test]
    async fn test_generate_sends_expected_body() {
        let router = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                let echo = format!(
                    "{}|{}|{}|{}|{}",
                    body["model"].as_str().unwrap_or_default(),
                    body["stream"],
                    body["options"]["temperature"],
                    body["options"]["top_p"],
                    body["options"]["num_predict"],
                );
                Json(json!({ "model": body["model"], "response": echo, "done": true }))
            }),
        );
        let base = spawn_stub(router).await;
        let client = OllamaClient::new(base);

        let text = client
            .complete("write tests", &ModelConfig::default())
            .await
            .unwrap();
        assert_eq!(text, "codellama|false|0.7|0.9|2048");
    }

    #[tokio::test]
    async fn test_404_is_model_not_found() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "model 'ghost' not found" })))
            }),
        );
        let client = OllamaClient::new(spawn_stub(router).await);
        let config = ModelConfig {
            model: "ghost".to_string(),
            ..Default::default()
        };

        let err = client.complete("p", &config).await.unwrap_err();
        assert!(matches!(err, TestsmithError::ModelNotFound { ref model } if model == "ghost"));
        assert!(err.to_string().contains("\"ghost\""));
    }

    #[tokio::test]
    async fn test_server_error_passes_message_through() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "CUDA out of memory" })))
            }),
        );
        let client = OllamaClient::new(spawn_stub(router).await);
        let err = client.complete("p", &ModelConfig::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "CUDA out of memory");
    }

    #[tokio::test]
    async fn test_server_error_without_body_uses_generic_message() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { StatusCode::BAD_GATEWAY }),
        );
        let client = OllamaClient::new(spawn_stub(router).await);
        let err = client.complete("p", &ModelConfig::default()).await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_ok_status_with_error_field() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({ "error": "context window exceeded" })) }),
        );
        let client = OllamaClient::new(spawn_stub(router).await);
        let err = client.complete("p", &ModelConfig::default()).await.unwrap_err();
        assert!(matches!(err, TestsmithError::Upstream(_)));
        assert_eq!(err.to_string(), "context window exceeded");
    }

    // ========================================================================
    // Tags / health / pull
    // ========================================================================

    #[tokio::test]
    async fn test_list_models_and_health() {
        let router = Router::new().route(
            "/api/tags",
            get(|| async {
                Json(json!({
                    "models": [
                        { "name": "codellama:latest", "size": 3825819519u64, "digest": "abc", "modified_at": "2024-01-01T00:00:00Z" },
                        { "name": "llama3" }
                    ]
                }))
            }),
        );
        let client = OllamaClient::new(spawn_stub(router).await);

        let models = client.list_models().await.unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "codellama:latest");
        assert_eq!(models[1].size, 0);
        assert!(client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_unhealthy_when_unreachable() {
        let client = OllamaClient::with_timeout("http://127.0.0.1:1", Duration::from_secs(2));
        assert!(!client.is_healthy().await);
        let err = client.list_models().await.unwrap_err();
        assert!(matches!(err, TestsmithError::UpstreamUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_pull_model() {
        let router = Router::new().route(
            "/api/pull",
            post(|Json(body): Json<Value>| async move {
                if body["name"] == "codellama" {
                    (StatusCode::OK, Json(json!({ "status": "success" })))
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "pull model manifest: file does not exist" })))
                }
            }),
        );
        let client = OllamaClient::new(spawn_stub(router).await);

        client.pull_model("codellama").await.unwrap();
        let err = client.pull_model("nope").await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to pull model: nope"));
    }
}
