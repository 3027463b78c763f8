//! Typed access to a tool call's argument map.
//!
//! [`Arguments`] knows which names the tool's descriptor declares as
//! required. `require_*` accessors refuse names outside that set, so a
//! handler cannot depend on an argument the descriptor lets callers omit.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Arguments for one tool invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    tool: String,
    values: Map<String, Value>,
    required: Vec<String>,
}

impl Arguments {
    /// Wrap an argument map for `tool`.
    pub fn new(tool: impl Into<String>, values: Map<String, Value>, required: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            values,
            required,
        }
    }

    /// Wrap a raw JSON value. `null` is treated as an empty object; any
    /// other non-object is a validation error.
    pub fn from_value(tool: impl Into<String>, value: Value, required: Vec<String>) -> Result<Self> {
        let tool = tool.into();
        let values = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::validation(format!(
                    "arguments for '{tool}' must be a JSON object, got {}",
                    type_name(&other)
                )));
            }
        };
        Ok(Self::new(tool, values, required))
    }

    /// Name of the tool these arguments belong to.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The raw argument map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// A non-null argument value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Required names the caller did not supply (absent or `null`).
    pub fn missing_required(&self) -> Vec<&str> {
        self.required
            .iter()
            .map(String::as_str)
            .filter(|name| self.get(name).is_none())
            .collect()
    }

    /// Fail with a validation error naming the first missing required argument.
    pub fn check_required(&self) -> Result<()> {
        match self.missing_required().first() {
            Some(name) => Err(missing(name)),
            None => Ok(()),
        }
    }

    fn declared(&self, name: &str) -> Result<&Value> {
        if !self.required.iter().any(|r| r == name) {
            return Err(Error::validation_field(
                name,
                format!(
                    "tool '{}' reads '{name}' as required but its schema does not declare it",
                    self.tool
                ),
            ));
        }
        self.get(name).ok_or_else(|| missing(name))
    }

    /// A required argument of any JSON type.
    pub fn require_value(&self, name: &str) -> Result<Value> {
        self.declared(name).cloned()
    }

    /// A required string argument.
    pub fn require_str(&self, name: &str) -> Result<String> {
        let value = self.declared(name)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| wrong_type(name, "a string", value))
    }

    /// A required object argument.
    pub fn require_object(&self, name: &str) -> Result<Map<String, Value>> {
        let value = self.declared(name)?;
        value
            .as_object()
            .cloned()
            .ok_or_else(|| wrong_type(name, "an object", value))
    }

    /// An optional string argument.
    pub fn optional_str(&self, name: &str) -> Result<Option<String>> {
        self.get(name)
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| wrong_type(name, "a string", value))
            })
            .transpose()
    }

    /// An optional non-negative integer argument.
    pub fn optional_u64(&self, name: &str) -> Result<Option<u64>> {
        self.get(name)
            .map(|value| {
                value
                    .as_u64()
                    .ok_or_else(|| wrong_type(name, "a non-negative integer", value))
            })
            .transpose()
    }

    /// An optional object argument.
    pub fn optional_object(&self, name: &str) -> Result<Option<Map<String, Value>>> {
        self.get(name)
            .map(|value| {
                value
                    .as_object()
                    .cloned()
                    .ok_or_else(|| wrong_type(name, "an object", value))
            })
            .transpose()
    }

    /// An optional array-of-strings argument.
    pub fn optional_string_list(&self, name: &str) -> Result<Option<Vec<String>>> {
        self.get(name)
            .map(|value| {
                value
                    .as_array()
                    .and_then(|items| {
                        items
                            .iter()
                            .map(|item| item.as_str().map(str::to_string))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or_else(|| wrong_type(name, "an array of strings", value))
            })
            .transpose()
    }

    /// Build a resource property map from `properties` plus shorthand fields.
    ///
    /// The caller's `properties` object is copied first, then every
    /// shorthand argument that is present is inserted on top, replacing a
    /// same-named key.
    pub fn fold_shorthand(&self, shorthand: &[&str]) -> Result<Map<String, Value>> {
        let mut properties = self.optional_object("properties")?.unwrap_or_default();
        for name in shorthand {
            if let Some(value) = self.values.get(*name) {
                properties.insert((*name).to_string(), value.clone());
            }
        }
        Ok(properties)
    }
}

fn missing(name: &str) -> Error {
    Error::validation_field(name, format!("missing required argument '{name}'"))
}

fn wrong_type(name: &str, expected: &str, value: &Value) -> Error {
    Error::validation_field(
        name,
        format!("argument '{name}' must be {expected}, got {}", type_name(value)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
