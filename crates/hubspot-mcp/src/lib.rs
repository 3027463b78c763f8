//! HubSpot CRM tools for the Model Context Protocol.
//!
//! This crate declares the HubSpot tool catalog, validates arguments against
//! each tool's schema, dispatches calls to `hubspot-client`, and wraps every
//! outcome in a `{success, result | error}` envelope.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      hubspot-mcp                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpServer: rmcp ServerHandler, served over stdio           │
//! │  mcp: ToolDescriptor / InvocationResult → rmcp model types  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Dispatcher: lookup, bind, invoke, envelope                 │
//! │  InvocationResult: Success(value) | Failure(message)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry: descriptors + handlers, checked at startup   │
//! │  Arguments: required-argument guard and typed accessors     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  tools:                                                     │
//! │  ├── contacts : list/get/create/update/delete               │
//! │  ├── companies: list/get/create/update                      │
//! │  ├── deals    : list/get/create                             │
//! │  └── search   : single-filter search                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use hubspot_client::HubSpotConfig;
//! use hubspot_mcp::{Dispatcher, McpServer};
//!
//! let config = HubSpotConfig::load(None)?;
//! let dispatcher = Dispatcher::from_config(&config)?;
//!
//! let result = dispatcher
//!     .invoke("get_contact", serde_json::json!({"contact_id": "101"}))
//!     .await?;
//! println!("{}", result.to_json());
//!
//! McpServer::new(dispatcher).serve_stdio().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod arguments;
pub mod dispatcher;
pub mod error;
pub mod mcp;
pub mod registry;
pub mod schema;
pub mod server;
pub mod tools;

// Re-exports: dispatch
pub use dispatcher::{Dispatcher, Envelope, InvocationResult};

// Re-exports: catalog
pub use arguments::Arguments;
pub use registry::{Handler, HandlerFuture, ToolEntry, ToolRegistry};
pub use schema::{ParameterSchema, Property, PropertyType, ToolDescriptor};

// Re-exports: server
pub use server::{McpServer, ServerConfig};

// Re-exports: error
pub use error::{Error, Result};
