//! MCP Service - Core JSON-RPC 2.0 request handler.

use crate::mcp::rpc::{self, RpcRequest, RpcResponse};
use crate::mcp::tools::{ResourceContents, ResourceDescriptor, ToolSet};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Core MCP request handler, generic over the served tool set.
#[derive(Clone)]
pub struct McpService {
    toolset: Arc<dyn ToolSet>,
}

impl McpService {
    pub fn new(toolset: Arc<dyn ToolSet>) -> Self {
        Self { toolset }
    }

    /// Handle one request. `None` means the request was a notification and
    /// no response body should be sent.
    pub async fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        if request.jsonrpc != "2.0" {
            warn!("received unsupported jsonrpc version: {}", request.jsonrpc);
            return Some(RpcResponse::error(
                request.id.clone(),
                rpc::INVALID_REQUEST,
                "Unsupported jsonrpc version (expected 2.0)",
            ));
        }

        let RpcRequest {
            method, params, id, ..
        } = request;

        match method.as_str() {
            "initialize" => Some(self.handle_initialize(id, params)),
            "tools/list" => Some(self.handle_list_tools(id)),
            "tools/call" => Some(self.handle_call_tool(id, params).await),
            "resources/list" => Some(self.handle_resources_list(id)),
            "resources/read" => Some(self.handle_resources_read(id, params).await),
            "resources/templates/list" => Some(self.handle_resource_templates_list(id)),
            "prompts/list" => Some(self.handle_prompts_list(id)),
            "prompts/get" => Some(self.handle_prompts_get(id, params)),
            "ping" => Some(RpcResponse::success(id, json!({ "ok": true }))),
            method if method.starts_with("notifications/") => {
                info!("received client notification: {}", method);
                None
            }
            other => Some(RpcResponse::method_not_found(id, other)),
        }
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> RpcResponse {
        // Params are optional here; several clients omit them entirely.
        if let Some(params) = params {
            let parsed: InitializeParams = match serde_json::from_value(params) {
                Ok(value) => value,
                Err(err) => return RpcResponse::invalid_params(id, err.to_string()),
            };
            if let Some(client) = parsed.client_info {
                info!(
                    "client requested initialization: {} v{}",
                    client.name,
                    client.version.unwrap_or_else(|| "unknown".into())
                );
            }
            if let Some(proposed) = parsed.protocol_version {
                if proposed != PROTOCOL_VERSION {
                    warn!(
                        "client proposed protocol {}, serving {}",
                        proposed, PROTOCOL_VERSION
                    );
                }
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ImplementationInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some(self.toolset.title().to_string()),
            },
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
            },
        };

        RpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    fn handle_list_tools(&self, id: Option<Value>) -> RpcResponse {
        let tools = self.toolset.list_tools();
        let payload = ListToolsResult {
            tools,
            next_cursor: None,
        };

        RpcResponse::success(id, serde_json::to_value(payload).unwrap())
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> RpcResponse {
        let parsed: CallToolParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return RpcResponse::invalid_params(id, message),
        };

        let result = self.toolset.call_tool(&parsed.name, parsed.arguments).await;
        RpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    fn handle_resources_list(&self, id: Option<Value>) -> RpcResponse {
        let payload = ListResourcesResult {
            resources: self.toolset.list_resources(),
            next_cursor: None,
        };
        RpcResponse::success(id, serde_json::to_value(payload).unwrap())
    }

    async fn handle_resources_read(&self, id: Option<Value>, params: Option<Value>) -> RpcResponse {
        let parsed: ResourceReadParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return RpcResponse::invalid_params(id, message),
        };

        match self.toolset.read_resource(&parsed.uri).await {
            Some(contents) => {
                let payload = ResourceReadResult {
                    contents: vec![contents],
                };
                RpcResponse::success(id, serde_json::to_value(payload).unwrap())
            }
            None => RpcResponse::error(
                id,
                rpc::RESOURCE_NOT_FOUND,
                format!("Resource '{}' is not available on this server.", parsed.uri),
            ),
        }
    }

    fn handle_resource_templates_list(&self, id: Option<Value>) -> RpcResponse {
        let payload = ResourceTemplateListResult {
            templates: Vec::new(),
            next_cursor: None,
        };
        RpcResponse::success(id, serde_json::to_value(payload).unwrap())
    }

    fn handle_prompts_list(&self, id: Option<Value>) -> RpcResponse {
        let payload = PromptListResult {
            prompts: Vec::new(),
            next_cursor: None,
        };
        RpcResponse::success(id, serde_json::to_value(payload).unwrap())
    }

    fn handle_prompts_get(&self, id: Option<Value>, params: Option<Value>) -> RpcResponse {
        let parsed: PromptGetParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return RpcResponse::invalid_params(id, message),
        };

        RpcResponse::error(
            id,
            rpc::PROMPT_NOT_FOUND,
            format!("Prompt '{}' is not available on this server.", parsed.name),
        )
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct InitializeParams {
    #[serde(rename = "protocolVersion", default)]
    protocol_version: Option<String>,
    #[serde(rename = "clientInfo", default)]
    client_info: Option<ClientInfo>,
}

#[derive(Debug, Deserialize)]
struct ClientInfo {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "serverInfo")]
    server_info: ImplementationInfo,
    capabilities: ServerCapabilities,
}

#[derive(Debug, Serialize)]
struct ImplementationInfo {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapability,
    resources: ResourcesCapability,
}

#[derive(Debug, Serialize)]
struct ToolsCapability {
    #[serde(rename = "listChanged")]
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct ResourcesCapability {
    subscribe: bool,
    #[serde(rename = "listChanged")]
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct ListToolsResult {
    tools: Vec<crate::mcp::tools::registry::ToolDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ListResourcesResult {
    resources: Vec<ResourceDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    uri: String,
}

#[derive(Debug, Serialize)]
struct ResourceReadResult {
    contents: Vec<ResourceContents>,
}

#[derive(Debug, Serialize)]
struct ResourceTemplateListResult {
    templates: Vec<Value>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct PromptListResult {
    prompts: Vec<PromptDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct PromptDescriptor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    arguments: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PromptGetParams {
    name: String,
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    match params {
        Some(value) => serde_json::from_value(value).map_err(|err| err.to_string()),
        None => serde_json::from_value(Value::Null).map_err(|err| err.to_string()),
    }
}
