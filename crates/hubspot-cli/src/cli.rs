//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// HubSpot CRM tools: inspect, invoke, and serve over MCP
#[derive(Parser, Debug)]
#[command(name = "hubspot", version)]
#[command(about = "HubSpot CRM tools: inspect, invoke, and serve over MCP", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "HUBSPOT_MCP_CONFIG")]
    pub config: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the registered tools
    Tools {
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Invoke one tool and print its result envelope
    Call {
        /// Tool name
        tool: String,
        /// Arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,
    },
    /// Serve the tools over MCP on stdin/stdout
    Serve,
    /// Configuration commands
    Config {
        /// Config subcommand
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Show the effective configuration with secrets masked
    Show,
    /// Get a configuration value by key
    Get {
        /// Key, e.g. `api_base_url`
        key: String,
    },
    /// Set a configuration value in the config file
    Set {
        /// Key, e.g. `api_base_url`
        key: String,
        /// New value
        value: String,
    },
    /// Create a default configuration file
    Init {
        /// Write to this path instead of the default location
        #[arg(short, long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
