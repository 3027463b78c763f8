//! HubSpot CRM object operations.
//!
//! Each method builds exactly one [`RequestSpec`] and hands it to the
//! transport; the response is returned unmodified.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::transport::{RequestSpec, Transport};

/// Default page size for list and search calls.
pub const DEFAULT_LIMIT: u64 = 100;

const OBJECTS_ROOT: &str = "/crm/v3/objects";

/// Characters escaped in an object id so it stays one path segment.
const ID_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ============================================================================
// Resource types and filters
// ============================================================================

/// CRM object types addressable under `/crm/v3/objects`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// `contacts`
    Contacts,
    /// `companies`
    Companies,
    /// `deals`
    Deals,
}

impl ResourceType {
    /// All supported resource types.
    pub const ALL: [ResourceType; 3] = [Self::Contacts, Self::Companies, Self::Deals];

    /// Path segment for this resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Companies => "companies",
            Self::Deals => "deals",
        }
    }

    fn collection_path(&self) -> String {
        format!("{OBJECTS_ROOT}/{}", self.as_str())
    }

    fn object_path(&self, id: &str) -> Result<String> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(Error::invalid(format!("invalid {} id '{id}'", self.as_str())));
        }
        let id = utf8_percent_encode(id, ID_SEGMENT);
        Ok(format!("{OBJECTS_ROOT}/{}/{id}", self.as_str()))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| Error::invalid(format!("unknown object type '{s}'")))
    }
}

/// Comparison operator for a search filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Equal
    #[default]
    Eq,
    /// Not equal
    Neq,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Substring match
    Contains,
}

impl Operator {
    /// Wire names of all operators, in declaration order.
    pub const NAMES: [&'static str; 7] = ["EQ", "NEQ", "LT", "LTE", "GT", "GTE", "CONTAINS"];
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_value(Value::String(s.to_string()))
            .map_err(|_| Error::invalid(format!("unknown search operator '{s}'")))
    }
}

/// A single search predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Property to compare.
    pub property_name: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Value to compare against.
    pub value: Value,
}

impl Filter {
    /// Create a filter.
    pub fn new(property_name: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            property_name: property_name.into(),
            operator,
            value: value.into(),
        }
    }
}

// ============================================================================
// HubSpotClient
// ============================================================================

/// Resource operations over a shared [`Transport`].
///
/// Cheap to clone; every clone issues requests through the same transport.
#[derive(Clone)]
pub struct HubSpotClient {
    transport: Arc<dyn Transport>,
}

impl HubSpotClient {
    /// Create a client over an existing transport.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client sharing a transport reference.
    pub fn with_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List objects of `resource`, up to `limit`.
    ///
    /// `properties` is sent comma-joined; an empty slice sends nothing.
    pub async fn list(
        &self,
        resource: ResourceType,
        limit: u64,
        properties: Option<&[String]>,
    ) -> Result<Value> {
        let mut request =
            RequestSpec::get(resource.collection_path()).with_query("limit", limit.to_string());
        if let Some(props) = properties.filter(|p| !p.is_empty()) {
            request = request.with_query("properties", props.join(","));
        }
        self.transport.send(request).await
    }

    /// Fetch one object by id.
    pub async fn get(&self, resource: ResourceType, id: &str) -> Result<Value> {
        self.transport
            .send(RequestSpec::get(resource.object_path(id)?))
            .await
    }

    /// Create an object with the given properties.
    pub async fn create(&self, resource: ResourceType, properties: Map<String, Value>) -> Result<Value> {
        let request =
            RequestSpec::post(resource.collection_path()).with_body(json!({ "properties": properties }));
        self.transport.send(request).await
    }

    /// Patch an object's properties.
    pub async fn update(
        &self,
        resource: ResourceType,
        id: &str,
        properties: Map<String, Value>,
    ) -> Result<Value> {
        let request =
            RequestSpec::patch(resource.object_path(id)?).with_body(json!({ "properties": properties }));
        self.transport.send(request).await
    }

    /// Delete an object. HubSpot answers `204`, which the transport normalises.
    pub async fn delete(&self, resource: ResourceType, id: &str) -> Result<Value> {
        self.transport
            .send(RequestSpec::delete(resource.object_path(id)?))
            .await
    }

    /// Search objects. All filters go into a single AND group.
    pub async fn search(&self, resource: ResourceType, filters: Vec<Filter>, limit: u64) -> Result<Value> {
        let body = json!({
            "filterGroups": [{ "filters": filters }],
            "limit": limit,
        });
        let request = RequestSpec::post(format!("{}/search", resource.collection_path())).with_body(body);
        self.transport.send(request).await
    }

    /// Close the underlying transport.
    pub async fn close(&self) -> Result<()> {
        self.transport.close().await
    }
}

// ============================================================================
// Tests
// ============================================================================
