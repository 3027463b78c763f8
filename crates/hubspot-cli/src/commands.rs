//! Handlers for the `tools`, `call`, and `serve` commands.

use hubspot_client::HubSpotConfig;
use hubspot_mcp::{Dispatcher, InvocationResult, McpServer, ToolRegistry};
use serde_json::Value;

use crate::error::{Error, Result};

/// Render the tool catalog, as a table or as JSON descriptors.
pub fn cmd_tools(registry: &ToolRegistry, json: bool) -> Result<String> {
    let tools = registry.list();
    if json {
        return Ok(serde_json::to_string_pretty(&tools)?);
    }

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for tool in tools {
        out.push_str(&format!("{:<width$}  {}", tool.name, tool.description));
        let required = tool.required();
        if !required.is_empty() {
            out.push_str(&format!(" (requires: {})", required.join(", ")));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Parse `--args` into the argument object for a call.
pub fn parse_call_args(args: Option<&str>) -> Result<Value> {
    let Some(text) = args else {
        return Ok(Value::Object(Default::default()));
    };
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::arguments(format!("not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(Error::arguments("expected a JSON object"));
    }
    Ok(value)
}

/// Invoke one tool and close the transport afterwards.
///
/// An unknown tool name is an `Err`; everything else comes back as an
/// envelope for the caller to print.
pub async fn cmd_call(
    dispatcher: &Dispatcher,
    tool: &str,
    args: Option<&str>,
) -> Result<InvocationResult> {
    let arguments = parse_call_args(args)?;
    let outcome = dispatcher.invoke(tool, arguments).await;
    dispatcher.close().await?;
    Ok(outcome?)
}

/// Build a dispatcher from the configuration at `config_path`.
pub fn load_dispatcher(config_path: Option<&str>) -> Result<Dispatcher> {
    let config = HubSpotConfig::load(config_path)?;
    if !config.has_credentials() {
        tracing::warn!("No HubSpot credentials configured; requests will be unauthenticated");
    }
    Ok(Dispatcher::from_config(&config)?)
}

/// Serve the catalog over MCP on stdin/stdout until input closes.
pub async fn cmd_serve(dispatcher: Dispatcher) -> Result<()> {
    McpServer::new(dispatcher).serve_stdio().await?;
    Ok(())
}
