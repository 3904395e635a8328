// crates/testsmith-server/src/cli/context.rs
// Build the generation pipeline from env + config file

use anyhow::{Result, bail};
use std::sync::Arc;
use testsmith::config::{EnvConfig, Settings, TestsmithConfig};
use testsmith::generator::TestGenerator;
use testsmith::llm::OllamaClient;
use testsmith::templates::TemplateRegistry;
use tracing::{info, warn};

/// Load configuration once and wire the generator
pub fn setup_generator() -> Result<(TestGenerator, Settings)> {
    let env_config = EnvConfig::load();

    let validation = env_config.validate();
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        bail!("Invalid configuration: {}", validation);
    }

    let file_config = TestsmithConfig::load();
    let settings = Settings::resolve(&env_config, &file_config);

    let templates = Arc::new(TemplateRegistry::with_builtins());
    for entry in &file_config.templates {
        if let Err(e) = templates.register(entry.language, entry.framework, entry.to_template()) {
            warn!(error = %e, "Skipping custom template from config file");
        }
    }

    let client = Arc::new(OllamaClient::with_timeout(
        settings.ollama_base_url.clone(),
        settings.timeout,
    ));

    info!(
        ollama = %settings.ollama_base_url,
        default_model = %settings.default_model,
        templates = templates.len(),
        "Generator ready"
    );

    let generator = TestGenerator::new(client, templates, settings.default_model.clone());
    Ok((generator, settings))
}
