//! HubSpot MCP Server
//!
//! Standalone MCP server exposing HubSpot CRM tools over stdio.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use hubspot_client::HubSpotConfig;
use hubspot_mcp::{Dispatcher, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hubspot=debug".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = HubSpotConfig::load(None).context("Failed to load HubSpot configuration")?;
    if !config.has_credentials() {
        tracing::warn!("No HubSpot credentials configured; requests will be unauthenticated");
    }

    let dispatcher = Dispatcher::from_config(&config).context("Failed to build dispatcher")?;
    McpServer::new(dispatcher).serve_stdio().await?;

    Ok(())
}
