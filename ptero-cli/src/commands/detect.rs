//! Key classification command.

use console::style;

use ptero_api::{ApiMode, Connection};
use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;
use crate::OutputFormat;

pub fn run(config: &AppConfig, format: OutputFormat) -> PteroResult<()> {
    let conn = Connection::from_config(&config.panel)?;
    let mode = conn.mode();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "panel_url": conn.panel_url(),
                    "mode": mode,
                })
            );
        }
        OutputFormat::Text => {
            let label = match mode {
                ApiMode::Admin => style("admin (application API)").green().bold(),
                ApiMode::Client => style("client (account API)").cyan().bold(),
                ApiMode::Unknown => style("unknown").red().bold(),
            };
            println!("  Panel:  {}", conn.panel_url());
            println!("  Key:    {label}");
        }
    }

    Ok(())
}
