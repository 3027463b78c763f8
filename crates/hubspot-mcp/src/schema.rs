//! Tool descriptors and their JSON-Schema-like parameter schemas.
//!
//! Schemas are built with a small builder and serialised in declaration
//! order, so discovery listings are stable.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// JSON type of a tool parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyType {
    /// `"string"`
    String,
    /// `"integer"`
    Integer,
    /// `"object"`
    Object,
    /// `"array"` of strings
    StringArray,
}

impl PropertyType {
    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Object => "object",
            Self::StringArray => "array",
        }
    }

    /// Whether `value` has this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_u64() || value.is_i64(),
            Self::Object => value.is_object(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// One named parameter of a tool.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: String,
    kind: PropertyType,
    description: String,
    default: Option<Value>,
    allowed: Option<Vec<String>>,
    required: bool,
}

impl Property {
    fn new(name: &str, kind: PropertyType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            default: None,
            allowed: None,
            required: false,
        }
    }

    /// A string parameter.
    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, PropertyType::String, description)
    }

    /// An integer parameter.
    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(name, PropertyType::Integer, description)
    }

    /// A free-form object parameter.
    pub fn object(name: &str, description: &str) -> Self {
        Self::new(name, PropertyType::Object, description)
    }

    /// An array-of-strings parameter.
    pub fn string_array(name: &str, description: &str) -> Self {
        Self::new(name, PropertyType::StringArray, description)
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Document the value used when the caller omits the parameter.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict the parameter to a fixed set of string values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type.
    pub fn kind(&self) -> PropertyType {
        self.kind
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Allowed values, if restricted.
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed.as_deref()
    }

    /// Whether callers must supply this parameter.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind.as_str())?;
        if self.kind == PropertyType::StringArray {
            map.serialize_entry("items", &serde_json::json!({"type": "string"}))?;
        }
        map.serialize_entry("description", &self.description)?;
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(allowed) = &self.allowed {
            map.serialize_entry("enum", allowed)?;
        }
        map.end()
    }
}

/// Object schema describing a tool's arguments.
///
/// Serialises as `{"type": "object", "properties": {...}, "required": [...]}`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSchema {
    properties: Vec<Property>,
}

impl ParameterSchema {
    /// An object schema with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property.
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Names of required properties, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// The schema as a JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

struct PropertyMap<'a>(&'a [Property]);

impl Serialize for PropertyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for property in self.0 {
            map.serialize_entry(&property.name, property)?;
        }
        map.end()
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let required = self.required();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &PropertyMap(&self.properties))?;
        if !required.is_empty() {
            map.serialize_entry("required", &required)?;
        }
        map.end()
    }
}

/// Name, description, and parameter schema of one tool.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: String,
    /// What the tool does.
    pub description: String,
    /// Argument schema.
    pub parameters: ParameterSchema,
}

impl ToolDescriptor {
    /// Create a descriptor.
    pub fn new(name: &str, description: &str, parameters: ParameterSchema) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    /// Names of required arguments.
    pub fn required(&self) -> Vec<&str> {
        self.parameters.required()
    }
}
