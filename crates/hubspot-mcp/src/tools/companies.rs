//! Company tools.

use hubspot_client::{HubSpotClient, ResourceType};

use crate::arguments::Arguments;
use crate::registry::{HandlerFuture, ToolEntry};
use crate::schema::{ParameterSchema, Property, ToolDescriptor};
use crate::tools::{limit_property, list_properties_property, list_resource};

pub(crate) fn entries() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new(
                "list_companies",
                "List companies from HubSpot CRM",
                ParameterSchema::new()
                    .property(limit_property("companies"))
                    .property(list_properties_property("company")),
            ),
            list_companies,
            &[],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "get_company",
                "Get a specific company by ID",
                ParameterSchema::new().property(
                    Property::string("company_id", "The ID of the company to retrieve").required(),
                ),
            ),
            get_company,
            &["company_id"],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "create_company",
                "Create a new company in HubSpot",
                ParameterSchema::new()
                    .property(Property::string("name", "Name of the company").required())
                    .property(Property::object(
                        "properties",
                        "Additional properties for the company",
                    )),
            ),
            create_company,
            &["name"],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "update_company",
                "Update an existing company",
                ParameterSchema::new()
                    .property(
                        Property::string("company_id", "The ID of the company to update").required(),
                    )
                    .property(Property::object("properties", "Properties to update").required()),
            ),
            update_company,
            &["company_id", "properties"],
        ),
    ]
}

fn list_companies(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(list_resource(ResourceType::Companies, args, client))
}

fn get_company(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let id = args.require_str("company_id")?;
        Ok(client.get(ResourceType::Companies, &id).await?)
    })
}

fn create_company(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        args.require_str("name")?;
        let properties = args.fold_shorthand(&["name"])?;
        Ok(client.create(ResourceType::Companies, properties).await?)
    })
}

fn update_company(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let id = args.require_str("company_id")?;
        let properties = args.require_object("properties")?;
        Ok(client.update(ResourceType::Companies, &id, properties).await?)
    })
}
