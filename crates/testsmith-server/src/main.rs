// crates/testsmith-server/src/main.rs
// testsmith - unit test generation with a local Ollama model

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    testsmith::config::load_dotenv();

    let cli = Cli::parse();

    // Server logs at INFO; one-shot commands stay quiet unless asked
    let log_level = match (&cli.command, cli.verbose) {
        (_, true) => Level::DEBUG,
        (Some(Commands::Serve { .. }) | None, false) => Level::INFO,
        (_, false) => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None => cli::run_serve(None, None).await?,
        Some(Commands::Serve { host, port }) => cli::run_serve(host, port).await?,
        Some(Commands::Generate(args)) => cli::run_generate(args).await?,
        Some(Commands::Prompt(args)) => cli::run_prompt(args).await?,
        Some(Commands::Models) => cli::run_models().await?,
        Some(Commands::Pull { name }) => cli::run_pull(&name).await?,
        Some(Commands::Health) => cli::run_health().await?,
        Some(Commands::Templates) => cli::run_templates().await?,
    }

    Ok(())
}
