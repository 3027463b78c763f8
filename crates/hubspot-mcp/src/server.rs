//! MCP server over `rmcp`.
//!
//! [`McpServer`] implements [`ServerHandler`]: discovery comes from the
//! dispatcher's registry and every `tools/call` goes through
//! [`Dispatcher::invoke`]. rmcp runs each request on its own task, so a
//! slow HubSpot request does not hold up later messages. When input ends
//! the service drains in-flight calls and the server closes the transport.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, ServerInitializeError};
use rmcp::transport::IntoTransport;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;

use crate::dispatcher::Dispatcher;
use crate::error::{self, Error};
use crate::mcp::{to_call_tool_result, to_error_data, to_mcp_tool};

// ============================================================================
// ServerConfig
// ============================================================================

/// Server metadata reported in the `initialize` response.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Optional usage hint for clients.
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Some(
                "Tools for listing, reading, creating, updating, deleting, and searching \
                 HubSpot contacts, companies, and deals."
                    .to_string(),
            ),
        }
    }
}

// ============================================================================
// McpServer
// ============================================================================

/// MCP server exposing a [`Dispatcher`]'s catalog.
#[derive(Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
    config: ServerConfig,
}

impl McpServer {
    /// Create a server for `dispatcher` with default metadata.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            config: ServerConfig::default(),
        }
    }

    /// Override the reported server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Override the reported server version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Override the whole metadata block.
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Server metadata.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The dispatcher behind this server.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Serve on the process's stdin and stdout.
    pub async fn serve_stdio(self) -> error::Result<()> {
        self.serve_transport(rmcp::transport::stdio()).await
    }

    /// Serve on `transport` until the peer goes away, then close the
    /// HubSpot transport.
    ///
    /// The transport is closed on every exit path, including a failed
    /// handshake.
    pub async fn serve_transport<T, E, A>(self, transport: T) -> error::Result<()>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        tracing::info!(
            name = %self.config.name,
            version = %self.config.version,
            tools = self.dispatcher.registry().len(),
            "MCP server listening"
        );

        let dispatcher = self.dispatcher.clone();
        let outcome = run(self, transport).await;

        dispatcher.close().await?;
        tracing::info!("MCP server stopped");
        outcome
    }

    /// The `tools/list` result.
    pub fn tools(&self) -> ListToolsResult {
        ListToolsResult::with_all_items(
            self.dispatcher
                .list_tools()
                .into_iter()
                .map(to_mcp_tool)
                .collect(),
        )
    }

    /// Run one `tools/call`.
    ///
    /// Tool failures come back as a result with `isError` set; only an
    /// unknown tool name is a protocol error.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<CallToolResult, ErrorData> {
        match self.dispatcher.invoke(name, arguments).await {
            Ok(result) => to_call_tool_result(&result),
            Err(e) => Err(to_error_data(&e)),
        }
    }
}

async fn run<T, E, A>(server: McpServer, transport: T) -> error::Result<()>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let service = match server.serve(transport).await {
        Ok(service) => service,
        Err(ServerInitializeError::ConnectionClosed(context)) => {
            tracing::debug!("Input closed before {context}");
            return Ok(());
        }
        Err(e) => return Err(Error::server(format!("MCP handshake failed: {e}"))),
    };

    let reason = service
        .waiting()
        .await
        .map_err(|e| Error::server(format!("MCP service task failed: {e}")))?;
    tracing::debug!(?reason, "MCP service finished");
    Ok(())
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let info = ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(Implementation::new(&self.config.name, &self.config.version));
        match &self.config.instructions {
            Some(instructions) => info.with_instructions(instructions),
            None => info,
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(self.tools())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        self.call(&request.name, arguments).await
    }
}

// ============================================================================
// Tests
// ============================================================================
