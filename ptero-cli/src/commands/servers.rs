//! Server commands.

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use ptero_api::{ServerDetails, ServerRecord};
use ptero_core::config::AppConfig;
use ptero_core::error::PteroResult;
use crate::OutputFormat;
use super::{or_dash, truncate};

#[derive(Subcommand)]
pub enum ServersAction {
    /// List all servers visible to the key.
    List {
        /// Filter by name (application keys only).
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Count servers visible to the key.
    Count {
        /// Filter by name (application keys only).
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one server.
    Show {
        /// Numeric id for application keys, identifier or uuid for client keys.
        server: String,
    },
}

pub fn run(config: &AppConfig, action: ServersAction, format: OutputFormat) -> PteroResult<()> {
    let conn = super::connect(config)?;

    match action {
        ServersAction::List { search } => {
            let servers = conn.list_servers(search.as_deref());
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&servers)?);
                }
                OutputFormat::Text => {
                    if servers.is_empty() {
                        println!("  No servers found.");
                    } else {
                        println!("{}", server_table(&servers));
                    }
                }
            }
        }
        ServersAction::Count { search } => {
            let total = conn.total_servers(search.as_deref());
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "total": total, "mode": conn.mode() }));
                }
                OutputFormat::Text => {
                    println!("  {} servers", style(total).bold());
                }
            }
        }
        ServersAction::Show { server } => match conn.server_details(&server) {
            Some(record) => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                OutputFormat::Text => print_record(&record),
            },
            None => match format {
                OutputFormat::Json => println!("null"),
                OutputFormat::Text => {
                    println!("  {} Server {server} not found.", style("FAIL").red().bold());
                }
            },
        },
    }

    Ok(())
}

fn server_table(servers: &[ServerRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Identifier", "Name", "Node", "Address", "State"]);
    for server in servers {
        let (node, address) = match &server.details {
            ServerDetails::Admin(d) => (or_dash(d.node_id), or_dash(d.allocation_id.map(|a| format!("#{a}")))),
            ServerDetails::Client(d) => (
                or_dash(d.node.as_deref()),
                or_dash(server.default_allocation().and_then(|a| a.address())),
            ),
        };
        table.add_row(vec![
            or_dash(server.id),
            or_dash(server.identifier.as_deref()),
            truncate(server.name.as_deref().unwrap_or("-"), 32),
            node,
            address,
            state(server),
        ]);
    }
    table
}

fn state(server: &ServerRecord) -> String {
    if server.is_suspended() == Some(true) {
        return "suspended".to_string();
    }
    match &server.details {
        ServerDetails::Client(d) if d.is_installing == Some(true) => "installing".to_string(),
        ServerDetails::Client(d) if d.is_transferring == Some(true) => "transferring".to_string(),
        ServerDetails::Client(d) => d.status.clone().unwrap_or_else(|| "ok".to_string()),
        ServerDetails::Admin(_) => "ok".to_string(),
    }
}

fn print_record(record: &ServerRecord) {
    println!(
        "{}",
        style(record.name.as_deref().unwrap_or("(unnamed)")).bold().underlined()
    );
    println!("  Mode:         {}", record.mode());
    println!("  ID:           {}", or_dash(record.id));
    println!("  UUID:         {}", or_dash(record.uuid.as_deref()));
    println!("  Identifier:   {}", or_dash(record.identifier.as_deref()));
    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description:  {description}");
    }
    println!("  State:        {}", state(record));
    if let Some(limits) = &record.limits {
        println!("  Limits:       {limits}");
    }
    if let Some(created) = record.created() {
        println!("  Created:      {}", created.format("%Y-%m-%d %H:%M"));
    }

    match &record.details {
        ServerDetails::Admin(d) => {
            println!("  Owner:        user #{}", or_dash(d.user_id));
            println!("  Node:         #{}", or_dash(d.node_id));
            println!("  Nest/Egg:     {}/{}", or_dash(d.nest_id), or_dash(d.egg_id));
        }
        ServerDetails::Client(d) => {
            println!("  Node:         {}", or_dash(d.node.as_deref()));
            println!("  Image:        {}", or_dash(d.docker_image.as_deref()));
            if let Some(invocation) = &d.invocation {
                println!("  Startup:      {}", truncate(invocation, 72));
            }
            for allocation in &d.allocations {
                let marker = if allocation.is_default == Some(true) { " (default)" } else { "" };
                println!("  Allocation:   {}{marker}", or_dash(allocation.address()));
            }
            for variable in &d.variables {
                println!(
                    "  Variable:     {}={}",
                    or_dash(variable.env_variable.as_deref()),
                    or_dash(variable.server_value.as_deref())
                );
            }
        }
    }
}
