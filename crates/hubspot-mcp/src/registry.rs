//! Immutable tool registry.
//!
//! A [`ToolRegistry`] maps tool names to a [`ToolDescriptor`] and a plain
//! function [`Handler`]. It is built once, validated up front, and shared
//! read-only by every invocation. Handlers receive all collaborators as
//! arguments; nothing is captured.

use std::collections::HashMap;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use hubspot_client::HubSpotClient;
use serde_json::Value;

use crate::arguments::Arguments;
use crate::error::{Error, Result};
use crate::schema::ToolDescriptor;

/// Type alias for async handler results.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// A tool implementation: arguments and a client in, JSON out.
pub type Handler = fn(Arguments, HubSpotClient) -> HandlerFuture;

/// A descriptor bound to its handler.
///
/// `requires` lists the arguments the handler cannot run without. The
/// registry refuses an entry whose `requires` differs from the names its
/// descriptor marks required.
#[derive(Clone)]
pub struct ToolEntry {
    descriptor: ToolDescriptor,
    handler: Handler,
    requires: Vec<String>,
}

impl ToolEntry {
    /// Bind `handler` to `descriptor`; `requires` names the handler's mandatory reads.
    pub fn new(descriptor: ToolDescriptor, handler: Handler, requires: &[&str]) -> Self {
        Self {
            descriptor,
            handler,
            requires: requires.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    /// The tool's descriptor.
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// The tool's name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The bound handler.
    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// Arguments the handler reads as mandatory.
    pub fn requires(&self) -> &[String] {
        &self.requires
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("descriptor", &self.descriptor)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

/// Read-only mapping from tool name to entry, in registration order.
///
/// # Example
///
/// ```rust,ignore
/// let registry = ToolRegistry::hubspot()?;
/// assert!(registry.contains("get_contact"));
/// let required = registry.describe("get_contact")?.required();
/// ```
#[derive(Debug)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry, rejecting catalogs that break a construction invariant.
    pub fn new(entries: Vec<ToolEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            validate_descriptor(entry.descriptor())?;
            validate_requires(entry)?;
            if index.insert(entry.name().to_string(), position).is_some() {
                return Err(Error::registry(format!(
                    "tool '{}' is registered twice",
                    entry.name()
                )));
            }
        }
        tracing::debug!(tools = entries.len(), "Tool registry built");
        Ok(Self { entries, index })
    }

    /// The built-in HubSpot catalog.
    pub fn hubspot() -> Result<Self> {
        Self::new(crate::tools::catalog())
    }

    /// Entry for `name`, if registered.
    pub fn lookup(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).and_then(|&i| self.entries.get(i))
    }

    /// Descriptor for `name`, or [`Error::UnknownTool`].
    pub fn describe(&self, name: &str) -> Result<&ToolDescriptor> {
        self.lookup(name)
            .map(ToolEntry::descriptor)
            .ok_or_else(|| Error::unknown_tool(name))
    }

    /// All descriptors, in registration order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.entries.iter().map(ToolEntry::descriptor).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a tool exists by name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

fn validate_descriptor(descriptor: &ToolDescriptor) -> Result<()> {
    let tool = descriptor.name.as_str();
    if tool.trim().is_empty() {
        return Err(Error::registry("tool name must not be empty"));
    }

    let mut seen = HashSet::new();
    for property in descriptor.parameters.properties() {
        let name = property.name();
        if !seen.insert(name) {
            return Err(Error::registry(format!(
                "tool '{tool}' declares property '{name}' twice"
            )));
        }
        if property.is_required() && property.default_value().is_some() {
            return Err(Error::registry(format!(
                "tool '{tool}': required property '{name}' must not declare a default"
            )));
        }
        if let (Some(default), Some(allowed)) = (property.default_value(), property.allowed_values())
        {
            let in_enum = default
                .as_str()
                .is_some_and(|d| allowed.iter().any(|a| a == d));
            if !in_enum {
                return Err(Error::registry(format!(
                    "tool '{tool}': default for '{name}' is not one of its allowed values"
                )));
            }
        }
        if let Some(default) = property.default_value() {
            if !property.kind().accepts(default) {
                return Err(Error::registry(format!(
                    "tool '{tool}': default for '{name}' is not a {}",
                    property.kind().as_str()
                )));
            }
        }
    }
    Ok(())
}

fn validate_requires(entry: &ToolEntry) -> Result<()> {
    let declared: HashSet<&str> = entry.descriptor().required().into_iter().collect();
    let read: HashSet<&str> = entry.requires().iter().map(String::as_str).collect();
    if declared == read {
        return Ok(());
    }

    let tool = entry.name();
    if let Some(name) = read.difference(&declared).min() {
        return Err(Error::registry(format!(
            "tool '{tool}': handler requires '{name}' but the schema does not mark it required"
        )));
    }
    match declared.difference(&read).min() {
        Some(name) => Err(Error::registry(format!(
            "tool '{tool}': schema marks '{name}' required but the handler does not require it"
        ))),
        None => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================
