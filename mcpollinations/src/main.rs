//! MCPollinations server
//!
//! MCP server for image, text and audio generation using the Pollinations API.

use anyhow::Result;
use clap::Parser;
use mcpollinations::PollinationsServer;
use mcpollinations_common::tracing::init_tracing;
use mcpollinations_common::{Config, McpServerBuilder, TransportArgs};

#[derive(Parser, Debug)]
#[command(name = "mcpollinations", version)]
#[command(about = "MCP server for image, text and audio generation using the Pollinations API")]
struct Args {
    #[command(flatten)]
    transport: TransportArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is the stdio transport
    init_tracing();

    tracing::info!("mcpollinations server starting...");

    let args = Args::parse();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;
    tracing::debug!(?config, "Loaded configuration");

    let server = PollinationsServer::new(config);
    let transport = args.transport.into_transport();

    McpServerBuilder::new(server)
        .with_transport(transport)
        .run()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server failed"))?;

    Ok(())
}
