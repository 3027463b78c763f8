//! HubSpot CLI
//!
//! Command-line interface for inspecting, invoking, and serving the HubSpot
//! CRM tools.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hubspot_cli::commands::{cmd_call, cmd_serve, cmd_tools, load_dispatcher};
use hubspot_cli::config_handlers::handle_config_command;
use hubspot_cli::{Cli, Command};
use hubspot_mcp::ToolRegistry;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,hubspot=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config.as_deref();
    match args.command {
        Command::Tools { json } => {
            print!("{}", cmd_tools(&ToolRegistry::hubspot()?, json)?);
        }
        Command::Call { tool, args } => {
            let dispatcher = load_dispatcher(config_path)?;
            let result = cmd_call(&dispatcher, &tool, args.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Serve => {
            cmd_serve(load_dispatcher(config_path)?).await?;
        }
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
