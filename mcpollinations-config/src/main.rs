//! MCPollinations configuration generator
//!
//! Writes an MCP client configuration entry for the mcpollinations server.

mod model;
mod prompts;
mod selection;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use model::{DEFAULT_CONFIG_PATH, McpConfigFile, ServerEntry};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mcpollinations-config", version)]
#[command(about = "Generate an MCP configuration file for the mcpollinations server")]
struct Args {
    /// Use the default configuration without asking
    #[arg(long)]
    defaults: bool,

    /// Output file path (default: ./mcp.json)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Tools to allow: "all" or comma separated numbers, e.g. "1,2,3"
    #[arg(long)]
    tools: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = ColorfulTheme::default();

    println!("MCPollinations MCP Configuration Generator");
    println!("=========================================");
    println!("Creates an MCP configuration file for the mcpollinations server.\n");

    let use_defaults =
        args.defaults || prompts::confirm(&theme, "Use default configuration?", true)?;

    let mut entry = ServerEntry::default();
    if !use_defaults {
        entry = prompts::customize(&theme, entry)?;
    }

    if let Some(tools) = args.tools.as_deref() {
        entry.always_allow = selection::parse_tool_selection(tools);
    }

    let path = match args.output {
        Some(path) => path,
        None if args.defaults => PathBuf::from(DEFAULT_CONFIG_PATH),
        None => PathBuf::from(prompts::output_path(&theme, DEFAULT_CONFIG_PATH)?),
    };

    let config = McpConfigFile {
        mcpollinations: entry,
    };
    config
        .write_to(&path)
        .with_context(|| format!("Error saving configuration to {}", path.display()))?;

    println!("\nMCP configuration saved to: {}", path.display());
    println!("Add this entry to your MCP client's server configuration.");
    println!("\nGenerated configuration:");
    println!("{}", config.to_pretty_json()?);

    Ok(())
}
