//! # hubspot-cli
//!
//! Admin CLI for the HubSpot MCP tools.
//!
//! This crate provides the `hubspot` command:
//! - `tools` lists the registered tools and their required arguments
//! - `call` invokes one tool and prints its result envelope
//! - `serve` runs the MCP server on stdin/stdout
//! - `config` inspects and edits the configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command, ConfigAction};
pub use error::{Error, Result};
