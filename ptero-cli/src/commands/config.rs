//! Configuration commands.

use std::path::Path;

use clap::Subcommand;
use console::style;

use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (API key masked).
    Show,
    /// Print the configuration file path.
    Path,
}

pub fn run(
    config: &AppConfig,
    explicit_path: Option<&Path>,
    action: ConfigAction,
    format: OutputFormat,
) -> PteroResult<()> {
    match action {
        ConfigAction::Show => {
            let mut shown = config.clone();
            shown.panel.api_key = super::mask(&shown.panel.api_key);

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                }
                OutputFormat::Text => {
                    println!("{}", style("Panel").bold().underlined());
                    println!("  URL:              {}", shown.panel.url);
                    println!("  API key:          {}", shown.panel.api_key);
                    println!("  Probe timeout:    {}s", shown.panel.probe_timeout_secs);
                    println!("  Request timeout:  {}s", shown.panel.request_timeout_secs);
                    println!("  Invalid certs:    {}", shown.panel.accept_invalid_certs);
                    let mut headers: Vec<_> = shown.panel.custom_headers.keys().collect();
                    headers.sort();
                    for name in headers {
                        println!("  Header:           {name}");
                    }
                    println!("{}", style("Logging").bold().underlined());
                    println!("  Level:            {}", shown.logging.level);
                    println!("  Directory:        {}", shown.effective_log_dir()?.display());
                    println!("  JSON output:      {}", shown.logging.json_output);
                }
            }
        }
        ConfigAction::Path => {
            let path = match explicit_path {
                Some(p) => p.to_path_buf(),
                None => AppConfig::default_config_path()?,
            };
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "path": path, "exists": path.exists() }));
                }
                OutputFormat::Text => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}
