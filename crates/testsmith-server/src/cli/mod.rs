// crates/testsmith-server/src/cli/mod.rs
// CLI module for testsmith commands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use testsmith_types::{Framework, Language};

pub mod context;
pub mod generate;
pub mod models;
pub mod serve;

pub use generate::{run_generate, run_prompt};
pub use models::{run_health, run_models, run_pull, run_templates};
pub use serve::run_serve;

#[derive(Parser)]
#[command(name = "testsmith")]
#[command(about = "Generate unit tests for a code snippet with a local Ollama model")]
#[command(version)]
pub struct Cli {
    /// Verbose logging for one-shot commands
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Address to bind (overrides TESTSMITH_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides TESTSMITH_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate tests for a source file (or stdin)
    Generate(GenerateArgs),

    /// Print the compiled prompt without calling the model
    Prompt(TargetArgs),

    /// List models installed on the Ollama host
    Models,

    /// Download a model onto the Ollama host
    Pull {
        /// Model name (e.g. codellama:7b)
        #[arg(index = 1)]
        name: String,
    },

    /// Check that the Ollama host is reachable
    Health,

    /// List registered prompt templates
    Templates,
}

/// What to generate tests for
#[derive(Args)]
pub struct TargetArgs {
    /// Source language (javascript, typescript, python, java, csharp, cpp, go, rust)
    #[arg(short, long)]
    pub language: Language,

    /// Test framework (jest, mocha, vitest, pytest, junit, nunit, gtest, go-test, rust-test)
    #[arg(short, long)]
    pub framework: Framework,

    /// Source file (default: read stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Model name (default: OLLAMA_DEFAULT_MODEL or codellama)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature, 0-2
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate, 1-4096
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Nucleus sampling, 0-1
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Print the full result as JSON instead of bare test code
    #[arg(long)]
    pub json: bool,
}
