//! Liuren MCP Server - Entry Point
//!
//! This binary provides an MCP server via STDIO transport for xiao liu ren readings.

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use liuren::{LiurenServer, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize logging to stderr (stdout is used for MCP communication)
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(settings.log_directive())?,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(server = %settings.server_name, version = %settings.server_version, "Starting Liuren MCP Server");

    // Create and run the MCP server
    let server_name = settings.server_name.clone();
    let server = LiurenServer::new(settings);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server initialized, waiting for requests...");

    // Wait for shutdown
    service.waiting().await?;

    tracing::info!(server = %server_name, "Server shutting down");

    Ok(())
}
