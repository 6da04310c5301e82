//! MCP Server implementation
//!
//! The main server struct that reads JSON-RPC messages line by line, routes
//! them, and writes one response line per request.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use todoist_api::TodoistApi;

use crate::handlers::handle_tool_call;
use crate::protocol::{
    InitializeResult, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, error_codes,
};
use crate::tools::{ToolDefinition, tool_definitions};
use crate::{Error, Result};

/// Name reported in the `initialize` handshake
pub const SERVER_NAME: &str = "todoist-mcp-server";

/// MCP Server for Todoist
///
/// The Todoist client is injected at construction; the server itself keeps
/// no state between calls.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use todoist_api::{RestClient, RestConfig};
/// use todoist_mcp::TodoistMcpServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = RestClient::new("token", RestConfig::default())?;
///     let server = TodoistMcpServer::new(Arc::new(api));
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct TodoistMcpServer {
    api: Arc<dyn TodoistApi>,
}

impl TodoistMcpServer {
    /// Create a new MCP server instance backed by `api`
    pub fn new(api: Arc<dyn TodoistApi>) -> Self {
        Self { api }
    }

    /// Run the MCP server over stdin/stdout until stdin closes
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        tracing::info!("Todoist MCP server running on stdio");
        self.serve(stdin, stdout).await
    }

    /// Process newline-delimited messages from `reader`, writing responses to `writer`
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(&line).await {
                Ok(response) => response,
                Err(e) => serde_json::to_string(&JsonRpcResponse::error(
                    None,
                    error_codes::INTERNAL_ERROR,
                    format!("Internal error: {}", e),
                ))?,
            };

            // Notifications get no response
            if response.is_empty() {
                continue;
            }
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                let response = JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Received notification");
            return Ok(String::new());
        }

        let response = if request.jsonrpc != JSONRPC_VERSION {
            JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            )
        } else {
            match request.method.as_str() {
                "initialize" => self.handle_initialize(request.id)?,
                "ping" => JsonRpcResponse::success(request.id, json!({})),
                "tools/list" => self.handle_tools_list(request.id),
                "tools/call" => self.handle_tools_call(request.id, request.params).await?,
                _ => JsonRpcResponse::error(
                    request.id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                ),
            }
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION,
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME,
                version: env!("CARGO_PKG_VERSION"),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.tools() }))
    }

    /// Handle tools/call request
    ///
    /// Tool failures are successful JSON-RPC responses with `isError: true`.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        let result = handle_tool_call(self.api.as_ref(), &params.name, params.arguments).await;
        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Get available tools
    pub fn tools(&self) -> &'static [ToolDefinition] {
        tool_definitions()
    }
}
