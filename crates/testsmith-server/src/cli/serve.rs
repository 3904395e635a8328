// crates/testsmith-server/src/cli/serve.rs
// HTTP API server startup

use anyhow::Result;
use testsmith::web::{self, state::AppState};
use tracing::{info, warn};

use super::context::setup_generator;

pub async fn run_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let (generator, settings) = setup_generator()?;

    if !generator.is_healthy().await {
        warn!(
            ollama = generator.model_host(),
            "Ollama is not reachable yet; generation requests will fail until it is"
        );
    }

    let host = host.unwrap_or(settings.host);
    let port = port.unwrap_or(settings.port);

    info!("testsmith API running on http://{}:{}", host, port);
    web::serve(AppState::new(generator), &host, port).await?;

    Ok(())
}
