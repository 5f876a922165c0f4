//! ptero CLI - command-line access to a Pterodactyl panel.
//!
//! Classifies the configured API key, then lists, counts or shows servers
//! from whichever API surface the key unlocks.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ptero_core::config::AppConfig;
use ptero_core::constants;
use ptero_core::error::PteroResult;
use ptero_core::logging;
use ptero_core::platform::Platform;

/// ptero - Pterodactyl panel client.
#[derive(Parser)]
#[command(
    name = "ptero",
    version,
    about = "Pterodactyl panel client CLI",
    long_about = "A command-line client for the Pterodactyl panel.\n\
                  Works with both application (admin) and client API keys."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level, probe timings, page progress).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Panel URL (overrides config).
    #[arg(long, global = true)]
    panel_url: Option<String>,

    /// API key (overrides config).
    #[arg(long, global = true, env = constants::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the API key (admin, client or unknown).
    Detect,
    /// List, count and inspect servers.
    Servers {
        #[command(subcommand)]
        action: commands::servers::ServersAction,
    },
    /// Inspect the configuration.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() -> PteroResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_default()?,
    };
    if let Some(url) = cli.panel_url {
        config.panel.url = url;
    }
    if let Some(key) = cli.api_key {
        config.panel.api_key = key;
    }
    if cli.verbose {
        config.panel.debug = true;
    }

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| PathBuf::from("logs"));
    // Fall back to stderr only when the log directory is unusable
    let _guard = match logging::init_logging(&log_level, &log_dir, config.logging.json_output) {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init_console_logging(&log_level);
            warn!("file logging disabled: {e}");
            None
        }
    };

    info!(
        "{} v{} on {}",
        constants::APP_NAME,
        constants::APP_VERSION,
        Platform::current()
    );

    match cli.command {
        Commands::Detect => commands::detect::run(&config, cli.format),
        Commands::Servers { action } => commands::servers::run(&config, action, cli.format),
        Commands::Config { action } => {
            commands::config::run(&config, cli.config.as_deref(), action, cli.format)
        }
    }
}
