//! Deal tools.

use hubspot_client::{HubSpotClient, ResourceType};

use crate::arguments::Arguments;
use crate::registry::{HandlerFuture, ToolEntry};
use crate::schema::{ParameterSchema, Property, ToolDescriptor};
use crate::tools::{limit_property, list_properties_property, list_resource};

/// Top-level fields folded into `properties` by `create_deal`.
pub const DEAL_SHORTHAND: [&str; 4] = ["dealname", "amount", "dealstage", "pipeline"];

pub(crate) fn entries() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new(
                "list_deals",
                "List deals from HubSpot CRM",
                ParameterSchema::new()
                    .property(limit_property("deals"))
                    .property(list_properties_property("deal")),
            ),
            list_deals,
            &[],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "get_deal",
                "Get a specific deal by ID",
                ParameterSchema::new()
                    .property(Property::string("deal_id", "The ID of the deal to retrieve").required()),
            ),
            get_deal,
            &["deal_id"],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "create_deal",
                "Create a new deal in HubSpot",
                ParameterSchema::new()
                    .property(Property::string("dealname", "Name of the deal").required())
                    .property(Property::string("amount", "Deal amount"))
                    .property(Property::string("dealstage", "Pipeline stage of the deal"))
                    .property(Property::string("pipeline", "Pipeline the deal belongs to"))
                    .property(Property::object(
                        "properties",
                        "Additional properties for the deal",
                    )),
            ),
            create_deal,
            &["dealname"],
        ),
    ]
}

fn list_deals(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(list_resource(ResourceType::Deals, args, client))
}

fn get_deal(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let id = args.require_str("deal_id")?;
        Ok(client.get(ResourceType::Deals, &id).await?)
    })
}

fn create_deal(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        args.require_str("dealname")?;
        let properties = args.fold_shorthand(&DEAL_SHORTHAND)?;
        Ok(client.create(ResourceType::Deals, properties).await?)
    })
}
