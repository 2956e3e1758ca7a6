use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use energytriage_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod driver;
mod render;

#[derive(Parser)]
#[command(name = "energytriage", version, about = "Energy Triage CLI")]
struct Cli {
    /// Log level filter (e.g. warn, info, debug). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Path to config.toml (default: ~/.config/energytriage/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the demo tasks split into buckets for an energy level
    Buckets(commands::buckets::BucketsArgs),
    /// Simulate a swipe on one demo task
    Swipe(commands::swipe::SwipeArgs),
    /// Run line commands against one in-memory session
    Script(commands::script::ScriptArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::load_from(path)?)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config_path = cli.config.unwrap_or_else(Config::path);
    tracing::debug!(path = %config_path.display(), "using config");
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(action, &config_path),
        Commands::Buckets(args) => load(&config_path).and_then(|c| commands::buckets::run(args, &c)),
        Commands::Swipe(args) => load(&config_path).and_then(|c| commands::swipe::run(args, &c)),
        Commands::Script(args) => load(&config_path).and_then(|c| commands::script::run(args, &c)),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
