//! The HubSpot tool catalog.
//!
//! Each submodule contributes descriptors and handlers for one resource
//! type. [`catalog`] fixes the registration order used by discovery.

pub mod companies;
pub mod contacts;
pub mod deals;
pub mod search;

use hubspot_client::{HubSpotClient, ResourceType, DEFAULT_LIMIT};
use serde_json::Value;

use crate::arguments::Arguments;
use crate::error::Result;
use crate::registry::ToolEntry;
use crate::schema::Property;

/// All built-in tools, in registration order.
pub fn catalog() -> Vec<ToolEntry> {
    let mut entries = Vec::new();
    entries.extend(contacts::entries());
    entries.extend(companies::entries());
    entries.extend(deals::entries());
    entries.extend(search::entries());
    entries
}

/// `limit` parameter shared by list and search tools.
pub(crate) fn limit_property(noun: &str) -> Property {
    Property::integer(
        "limit",
        &format!("Maximum number of {noun} to retrieve"),
    )
    .with_default(DEFAULT_LIMIT)
}

/// `properties` parameter shared by list tools.
pub(crate) fn list_properties_property(singular: &str) -> Property {
    Property::string_array(
        "properties",
        &format!("List of properties to retrieve for each {singular}"),
    )
}

pub(crate) fn limit_arg(args: &Arguments) -> Result<u64> {
    Ok(args.optional_u64("limit")?.unwrap_or(DEFAULT_LIMIT))
}

pub(crate) async fn list_resource(
    resource: ResourceType,
    args: Arguments,
    client: HubSpotClient,
) -> Result<Value> {
    let limit = limit_arg(&args)?;
    let properties = args.optional_string_list("properties")?;
    Ok(client.list(resource, limit, properties.as_deref()).await?)
}
