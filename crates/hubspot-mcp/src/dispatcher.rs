//! Tool dispatch and the result envelope.
//!
//! Every call runs through the same steps: look the tool up, check the
//! descriptor's required arguments, run the handler, and wrap whatever
//! came back. Only an unknown tool name escapes as an `Err`; everything
//! else becomes an [`InvocationResult`].

use std::sync::Arc;

use hubspot_client::{HubSpotClient, HubSpotConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::arguments::Arguments;
use crate::error::{Error, Result};
use crate::registry::{ToolEntry, ToolRegistry};
use crate::schema::ToolDescriptor;

// ============================================================================
// InvocationResult
// ============================================================================

/// Outcome of one tool invocation.
///
/// Serialises to `{"success": true, "result": ...}` or
/// `{"success": false, "error": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(into = "Envelope")]
pub enum InvocationResult {
    /// The handler returned a value.
    Success(Value),
    /// The handler failed; the message is human-readable.
    Failure(String),
}

impl InvocationResult {
    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// The envelope as a JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(Envelope::from(self.clone())).unwrap_or(Value::Null)
    }
}

impl From<Result<Value>> for InvocationResult {
    fn from(outcome: Result<Value>) -> Self {
        match outcome {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

/// Wire shape of an [`InvocationResult`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the tool ran successfully.
    pub success: bool,
    /// Tool output on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<InvocationResult> for Envelope {
    fn from(result: InvocationResult) -> Self {
        match result {
            InvocationResult::Success(value) => Self {
                success: true,
                result: Some(value),
                error: None,
            },
            InvocationResult::Failure(message) => Self {
                success: false,
                result: None,
                error: Some(message),
            },
        }
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Routes tool calls to their handlers.
///
/// Cheap to clone: the registry is shared read-only and the client shares
/// one transport. No per-call state is kept, so concurrent invocations
/// are independent.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    client: HubSpotClient,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher over `registry` and `client`.
    pub fn new(registry: ToolRegistry, client: HubSpotClient) -> Self {
        Self::with_shared(Arc::new(registry), client)
    }

    /// Create a dispatcher sharing a registry reference.
    pub fn with_shared(registry: Arc<ToolRegistry>, client: HubSpotClient) -> Self {
        Self { registry, client }
    }

    /// The HubSpot catalog over an HTTP transport built from `config`.
    pub fn from_config(config: &HubSpotConfig) -> Result<Self> {
        let registry = ToolRegistry::hubspot()?;
        let client = HubSpotClient::new(config.build_transport()?);
        Ok(Self::new(registry, client))
    }

    /// The registry in use.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Discovery listing, in registration order.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.registry.list()
    }

    /// Descriptor for one tool.
    pub fn describe(&self, name: &str) -> Result<&ToolDescriptor> {
        self.registry.describe(name)
    }

    /// Invoke `name` with `arguments`.
    ///
    /// Returns `Err` only for [`Error::UnknownTool`]. Validation, HTTP, and
    /// network failures come back as [`InvocationResult::Failure`].
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<InvocationResult> {
        let entry = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::unknown_tool(name))?;

        tracing::debug!(tool = name, "Handling tool call");
        let outcome = self.run(entry, arguments).await;
        if let Err(e) = &outcome {
            tracing::error!("Error handling tool call {name}: {e}");
        }
        Ok(outcome.into())
    }

    async fn run(&self, entry: &ToolEntry, arguments: Value) -> Result<Value> {
        let required = entry
            .descriptor()
            .required()
            .into_iter()
            .map(str::to_string)
            .collect();
        let args = Arguments::from_value(entry.name(), arguments, required)?;
        args.check_required()?;

        let handler = entry.handler();
        handler(args, self.client.clone()).await
    }

    /// Close the underlying transport. Safe to call more than once.
    pub async fn close(&self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
