//! Contact tools.

use hubspot_client::{HubSpotClient, ResourceType};

use crate::arguments::Arguments;
use crate::registry::{HandlerFuture, ToolEntry};
use crate::schema::{ParameterSchema, Property, ToolDescriptor};
use crate::tools::{limit_property, list_properties_property, list_resource};

/// Top-level fields folded into `properties` by `create_contact`.
pub const CONTACT_SHORTHAND: [&str; 3] = ["email", "firstname", "lastname"];

pub(crate) fn entries() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new(
                "list_contacts",
                "List contacts from HubSpot CRM",
                ParameterSchema::new()
                    .property(limit_property("contacts"))
                    .property(list_properties_property("contact")),
            ),
            list_contacts,
            &[],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "get_contact",
                "Get a specific contact by ID",
                ParameterSchema::new().property(
                    Property::string("contact_id", "The ID of the contact to retrieve").required(),
                ),
            ),
            get_contact,
            &["contact_id"],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "create_contact",
                "Create a new contact in HubSpot",
                ParameterSchema::new()
                    .property(Property::string("email", "Email address of the contact").required())
                    .property(Property::string("firstname", "First name of the contact"))
                    .property(Property::string("lastname", "Last name of the contact"))
                    .property(Property::object(
                        "properties",
                        "Additional properties for the contact",
                    )),
            ),
            create_contact,
            &["email"],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "update_contact",
                "Update an existing contact",
                ParameterSchema::new()
                    .property(
                        Property::string("contact_id", "The ID of the contact to update").required(),
                    )
                    .property(Property::object("properties", "Properties to update").required()),
            ),
            update_contact,
            &["contact_id", "properties"],
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "delete_contact",
                "Delete a contact by ID",
                ParameterSchema::new().property(
                    Property::string("contact_id", "The ID of the contact to delete").required(),
                ),
            ),
            delete_contact,
            &["contact_id"],
        ),
    ]
}

fn list_contacts(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(list_resource(ResourceType::Contacts, args, client))
}

fn get_contact(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let id = args.require_str("contact_id")?;
        Ok(client.get(ResourceType::Contacts, &id).await?)
    })
}

fn create_contact(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        args.require_str("email")?;
        let properties = args.fold_shorthand(&CONTACT_SHORTHAND)?;
        Ok(client.create(ResourceType::Contacts, properties).await?)
    })
}

fn update_contact(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let id = args.require_str("contact_id")?;
        let properties = args.require_object("properties")?;
        Ok(client.update(ResourceType::Contacts, &id, properties).await?)
    })
}

fn delete_contact(args: Arguments, client: HubSpotClient) -> HandlerFuture {
    Box::pin(async move {
        let id = args.require_str("contact_id")?;
        Ok(client.delete(ResourceType::Contacts, &id).await?)
    })
}
