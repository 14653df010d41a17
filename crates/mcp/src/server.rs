//! MCP server implementation.
//!
//! Wraps a `ToolRegistry` and exposes its tools over the MCP protocol.
//! Handles JSON-RPC requests and dispatches them to the appropriate handlers.

use serde_json::Value;

use kaggle_tools::ToolRegistry;

use crate::error::McpError;
use crate::transport::McpTransport;
use crate::types::*;

/// MCP server that bridges a `ToolRegistry` to MCP clients.
pub struct McpServer {
    registry: ToolRegistry,
    server_name: String,
    server_version: String,
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server wrapping the given tool registry.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_name: "kaggle-mcp".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            initialized: false,
        }
    }

    /// Set the server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Run the server loop, reading from and writing to the transport.
    ///
    /// Processes JSON-RPC requests until the transport is closed.
    pub async fn run<T: McpTransport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        tracing::info!(server = %self.server_name, "MCP server starting");

        loop {
            let line = match transport.receive().await? {
                Some(line) => line,
                None => {
                    tracing::info!("Transport closed, shutting down");
                    break;
                }
            };

            tracing::debug!(message = %line, "Received message");

            // Distinguish requests (have "id") from notifications (no "id")
            // by parsing as generic Value first.
            let raw: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse JSON");
                    let resp = JsonRpcResponse {
                        jsonrpc: "2.0".to_string(),
                        id: RpcId::Number(0),
                        result: None,
                        error: Some(McpError::JsonParse(e).to_rpc_error()),
                    };
                    let json = serde_json::to_string(&resp)?;
                    transport.send(&json).await?;
                    continue;
                }
            };

            // If no "id" field, treat as notification
            if raw.get("id").is_none() {
                if let Ok(notif) = serde_json::from_value::<JsonRpcNotification>(raw) {
                    self.handle_notification(&notif);
                }
                continue;
            }

            // Parse as a request
            let request: JsonRpcRequest = match serde_json::from_value(raw) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse JSON-RPC request");
                    let resp = JsonRpcResponse {
                        jsonrpc: "2.0".to_string(),
                        id: RpcId::Number(0),
                        result: None,
                        error: Some(McpError::JsonParse(e).to_rpc_error()),
                    };
                    let json = serde_json::to_string(&resp)?;
                    transport.send(&json).await?;
                    continue;
                }
            };

            let response = self.handle_request(&request).await;
            let json = serde_json::to_string(&response)?;
            tracing::debug!(response = %json, "Sending response");
            transport.send(&json).await?;
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request and produce a response.
    pub async fn handle_request(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, &request.params),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, &request.params).await,
            method => {
                tracing::warn!(method = %method, "Unknown method");
                let err = McpError::MethodNotFound(method.to_string());
                JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string())
            }
        }
    }

    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => {
                tracing::info!("Client confirmed initialization");
            }
            "notifications/cancelled" => {
                tracing::debug!("Client cancelled a request");
            }
            method => {
                tracing::debug!(method = %method, "Unknown notification, ignoring");
            }
        }
    }

    fn handle_initialize(&mut self, id: RpcId, _params: &Option<Value>) -> JsonRpcResponse {
        tracing::info!("Handling initialize");
        self.initialized = true;

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: Some(self.server_version.clone()),
            },
        };

        match serde_json::to_value(result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                let err = McpError::JsonParse(e);
                JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string())
            }
        }
    }

    fn handle_list_tools(&self, id: RpcId) -> JsonRpcResponse {
        tracing::debug!("Handling tools/list");

        let tools: Vec<ToolInfo> = self.registry.list().into_iter().map(ToolInfo::from).collect();
        let result = ListToolsResult { tools };

        match serde_json::to_value(result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                let err = McpError::JsonParse(e);
                JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string())
            }
        }
    }

    async fn handle_call_tool(&self, id: RpcId, params: &Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                let err = McpError::InvalidParams("missing params".to_string());
                return JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string());
            }
        };

        let call_params: CallToolParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => {
                let err = McpError::InvalidParams(e.to_string());
                return JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string());
            }
        };

        if !self.initialized {
            tracing::warn!(tool = %call_params.name, "tools/call before initialize");
        }

        tracing::debug!(tool = %call_params.name, "Handling tools/call");

        // An unknown tool name is a dispatch error, not a tool failure:
        // it gets a JSON-RPC error, never a {success: false} payload.
        let tool = match self.registry.get(&call_params.name) {
            Some(t) => t,
            None => {
                let err = McpError::ToolNotFound(call_params.name.clone());
                return JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string());
            }
        };

        let result = match tool.execute(call_params.arguments).await {
            Ok(payload) => match serde_json::to_string_pretty(&payload) {
                Ok(text) => CallToolResult {
                    content: vec![ToolContent::Text { text }],
                    is_error: false,
                },
                Err(e) => {
                    let err = McpError::JsonParse(e);
                    return JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string());
                }
            },
            Err(failure) => {
                failure.log();
                let text = match serde_json::to_string_pretty(&failure.to_payload()) {
                    Ok(text) => text,
                    Err(e) => {
                        let err = McpError::JsonParse(e);
                        return JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string());
                    }
                };
                CallToolResult {
                    content: vec![ToolContent::Text { text }],
                    is_error: true,
                }
            }
        };

        match serde_json::to_value(result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                let err = McpError::JsonParse(e);
                JsonRpcResponse::error(id, err.to_rpc_error().code, err.to_string())
            }
        }
    }
}
