// crates/testsmith-server/src/generator.rs
// Generation pipeline: template -> prompt -> model -> normalize -> count

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use testsmith_types::{
    Framework, GeneratedTests, GenerationMetadata, GenerationRequest, Language, ModelConfig,
    OllamaModel, PromptTemplate, TemplateKey,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::llm::CompletionClient;
use crate::postprocess::{count_tests, normalize};
use crate::prompt::compile_for;
use crate::templates::TemplateRegistry;
use crate::validation::validate_request;

/// Test generation service.
///
/// Stateless per request; the only shared state is the template registry.
#[derive(Clone)]
pub struct TestGenerator {
    client: Arc<dyn CompletionClient>,
    templates: Arc<TemplateRegistry>,
    default_model: String,
}

impl TestGenerator {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        templates: Arc<TemplateRegistry>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            templates,
            default_model: default_model.into(),
        }
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Effective model settings for a request (always non-streaming)
    pub fn resolve_config(&self, request: &GenerationRequest) -> ModelConfig {
        let mut config = ModelConfig::resolve(request.model_config.as_ref(), &self.default_model);
        config.stream = false;
        config
    }

    /// Run one generation end to end. Model failures propagate unchanged.
    #[instrument(
        skip_all,
        fields(
            request_id = %Uuid::new_v4(),
            language = %request.language,
            framework = %request.framework
        )
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedTests> {
        validate_request(request)?;

        let start = Instant::now();
        let config = self.resolve_config(request);
        let prompt = compile_for(&self.templates, &request.code, request.language, request.framework);

        let raw = self.client.complete(&prompt, &config).await.map_err(|e| {
            warn!(model = %config.model, error = %e, "Test generation failed");
            e
        })?;

        let test_code = normalize(&raw, request.framework);
        let test_count = count_tests(&test_code, request.framework);
        let execution_time_ms = start.elapsed().as_millis() as u64;

        if test_code.is_empty() {
            warn!(raw_len = raw.len(), "Model reply contained no usable code");
        }

        info!(
            model = %config.model,
            test_count,
            execution_time_ms,
            "Tests generated"
        );

        Ok(GeneratedTests {
            test_code,
            language: request.language,
            framework: request.framework,
            model_name: config.model,
            generated_at: Utc::now(),
            metadata: GenerationMetadata {
                test_count,
                execution_time_ms,
            },
        })
    }

    /// Compile the prompt for a request without calling the model
    pub fn preview_prompt(&self, code: &str, language: Language, framework: Framework) -> String {
        compile_for(&self.templates, code, language, framework)
    }

    pub async fn available_models(&self) -> Result<Vec<OllamaModel>> {
        self.client.list_models().await
    }

    pub async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }

    pub async fn pull_model(&self, name: &str) -> Result<()> {
        info!(model = name, "Pulling model");
        self.client.pull_model(name).await
    }

    pub fn register_template(
        &self,
        language: Language,
        framework: Framework,
        template: PromptTemplate,
    ) -> Result<()> {
        self.templates.register(language, framework, template)
    }

    pub fn resolve_template(&self, language: Language, framework: Framework) -> Arc<PromptTemplate> {
        self.templates.resolve(language, framework)
    }

    /// Keys with an exact registry entry, sorted
    pub fn template_keys(&self) -> Vec<TemplateKey> {
        self.templates.keys()
    }

    /// Base URL of the model host
    pub fn model_host(&self) -> &str {
        self.client.base_url()
    }
}
