//! # hubspot-client
//!
//! Async client for the HubSpot CRM object API.
//!
//! This crate provides the pieces a tool dispatcher needs to talk to HubSpot:
//! - [`Credential`] selection and the [`resolve_auth`] policy
//! - The [`Transport`] seam and its reqwest implementation, [`HttpTransport`]
//! - CRM object operations on [`HubSpotClient`] (list, get, create, update,
//!   delete, search)
//! - [`HubSpotConfig`] loading from TOML and `HUBSPOT_*` environment variables

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use auth::{resolve_auth, AuthParts, Credential};
pub use client::{Filter, HubSpotClient, Operator, ResourceType, DEFAULT_LIMIT};
pub use config::HubSpotConfig;
pub use error::{Error, Result};
pub use transport::{HttpTransport, RequestSpec, Transport};
