//! Conversions between dispatcher types and `rmcp` model types.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde_json::Value;

use crate::dispatcher::InvocationResult;
use crate::error::Error;
use crate::schema::ToolDescriptor;

fn json_schema(value: Value) -> Arc<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

/// MCP tool definition for a descriptor.
pub fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        json_schema(descriptor.parameters.to_json()),
    )
}

/// Tool-call result carrying the envelope as pretty-printed JSON text.
///
/// Failures set `isError` so clients can tell them apart without parsing
/// the text.
pub fn to_call_tool_result(result: &InvocationResult) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    let content = vec![Content::text(json)];
    Ok(if result.is_success() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    })
}

/// Protocol error for a call naming an unregistered tool.
pub fn unknown_tool_error(name: &str) -> ErrorData {
    ErrorData::invalid_params(Error::unknown_tool(name).to_string(), None)
}

/// Protocol error for a dispatcher error.
pub fn to_error_data(error: &Error) -> ErrorData {
    match error {
        Error::UnknownTool { name } => unknown_tool_error(name),
        Error::Validation { .. } => ErrorData::invalid_params(error.to_string(), None),
        _ => ErrorData::internal_error(error.to_string(), None),
    }
}
