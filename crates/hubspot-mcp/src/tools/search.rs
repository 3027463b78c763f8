//! Cross-object search tool.

use hubspot_client::{Filter, HubSpotClient, Operator, ResourceType};

use crate::arguments::Arguments;
use crate::error::Error;
use crate::registry::{HandlerFuture, ToolEntry};
use crate::schema::{ParameterSchema, Property, ToolDescriptor};
use crate::tools::{limit_arg, limit_property};

pub(crate) fn entries() -> Vec<ToolEntry> {
    let object_types: Vec<&str> = ResourceType::ALL.iter().map(ResourceType::as_str).collect();

    vec![ToolEntry::new(
        ToolDescriptor::new(
            "search",
            "Search for objects in HubSpot CRM",
            ParameterSchema::new()
                .property(
                    Property::string(
                        "object_type",
                        "Type of object to search (contacts, companies, deals)",
                    )
                    .required()
                    .one_of(&object_types),
                )
                .property(Property::string("property", "Property to search on").required())
                .property(Property::string("value", "Value to search for").required())
                .property(
                    Property::string("operator", "Search operator")
                        .with_default("EQ")
                        .one_of(&Operator::NAMES),
                )
                .property(limit_property("results")),
        ),
        search,
        &["object_type", "property", "value"],
    )]
}

fn search(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let object_type: ResourceType = args
            .require_str("object_type")?
            .parse()
            .map_err(|e: hubspot_client::Error| Error::validation_field("object_type", e.to_string()))?;
        let operator = match args.optional_str("operator")? {
            Some(op) => op
                .parse::<Operator>()
                .map_err(|e| Error::validation_field("operator", e.to_string()))?,
            None => Operator::default(),
        };
        let filter = Filter::new(args.require_str("property")?, operator, args.require_value("value")?);
        let limit = limit_arg(&args)?;

        Ok(client.search(object_type, vec![filter], limit).await?)
    })
}
