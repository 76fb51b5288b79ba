use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod agents;
mod configuration;
mod context;
mod prompt;
mod session;

use configuration::{default_config_file, Overrides, Settings};
use context::AppContext;
use prompt::rustyline::RustylinePrompt;
use session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provider to use (groq or openai)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model to use, defaults to the provider's default model
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f32>,

    /// Base URL of an OpenAI-compatible endpoint
    #[arg(long)]
    host: Option<String>,

    /// API key (can also be set via GROQ_API_KEY or OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Maximum rounds of tool calls per request
    #[arg(long)]
    max_turns: Option<usize>,

    /// Path to a config file, defaults to ~/.config/fileagent/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show tool calls and their results, and log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider.clone(),
            host: self.host.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            api_key: self.api_key.clone(),
            max_turns: self.max_turns,
            verbose: self.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "warn,fileagent=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_file = cli.config.clone().or_else(default_config_file);
    let settings = Settings::load(config_file.as_deref(), &cli.overrides())
        .context("Failed to load settings")?;
    let context = AppContext::from_settings(&settings)?;

    println!(
        "fileagent {}",
        style("- type \"exit\" to end the session").dim()
    );

    let prompt = RustylinePrompt::new().context("Failed to open the terminal for input")?;
    let mut session = Session::new(context, Box::new(prompt));
    session.start().await
}
