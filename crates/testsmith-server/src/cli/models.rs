// crates/testsmith-server/src/cli/models.rs
// Model host and template inspection commands

use anyhow::{Result, bail};

use super::context::setup_generator;

pub async fn run_models() -> Result<()> {
    let (generator, _) = setup_generator()?;
    let models = generator.available_models().await?;

    if models.is_empty() {
        println!("No models installed on {}", generator.model_host());
        return Ok(());
    }

    for model in &models {
        println!("{:<40} {:>10}", model.name, format_size(model.size));
    }
    Ok(())
}

pub async fn run_pull(name: &str) -> Result<()> {
    let (generator, _) = setup_generator()?;
    println!("Pulling {} (this can take a while)...", name);
    generator.pull_model(name).await?;
    println!("Pulled {}", name);
    Ok(())
}

pub async fn run_health() -> Result<()> {
    let (generator, _) = setup_generator()?;
    if generator.is_healthy().await {
        println!("Ollama at {} is healthy", generator.model_host());
        Ok(())
    } else {
        bail!(
            "Unable to connect to Ollama at {}. Please ensure Ollama is running.",
            generator.model_host()
        )
    }
}

pub async fn run_templates() -> Result<()> {
    let (generator, _) = setup_generator()?;
    for key in generator.template_keys() {
        println!("{:<12} {}", key.language, key.framework);
    }
    Ok(())
}

/// Human-readable byte count
fn format_size(bytes: u64) -> String {
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= GB {
        format!("{:.1} GB", b / GB)
    } else if b >= MB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{} B", bytes)
    }
}
