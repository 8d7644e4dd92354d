//! MCP Stateless HTTP Handlers for Actix-Web.
//!
//! Each POST carries one JSON-RPC request and gets one response; no session
//! or SSE stream is kept between calls.

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::mcp::rpc::{RpcRequest, RpcResponse};
use crate::mcp::service::McpService;

/// MCP State for Actix-Web (stateless version)
pub struct McpState {
    pub service: McpService,
}

impl McpState {
    pub fn new(service: McpService) -> Self {
        Self { service }
    }
}

/// RPC handler - POST /mcp
///
/// The body is taken as raw bytes so malformed payloads become JSON-RPC
/// error responses instead of transport-level rejections.
pub async fn rpc_handler(state: web::Data<Arc<McpState>>, body: web::Bytes) -> impl Responder {
    let request: RpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            // Valid JSON that is not a request shape gets -32600; anything
            // unparseable gets -32700.
            let response = if serde_json::from_slice::<serde_json::Value>(&body).is_ok() {
                RpcResponse::invalid_request(err.to_string())
            } else {
                RpcResponse::parse_error(err.to_string())
            };
            return HttpResponse::Ok()
                .content_type("application/json")
                .json(response);
        }
    };

    log::info!("Received MCP request: {}", request.method);

    if let Some(response) = state.service.handle_request(request).await {
        return HttpResponse::Ok()
            .content_type("application/json")
            .json(response);
    }

    // Notifications return 202 Accepted
    HttpResponse::Accepted().finish()
}

/// Configure MCP routes (stateless)
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/mcp").route(web::post().to(rpc_handler)));

    // Keep /sse route for backward compatibility (same as /mcp)
    cfg.service(web::resource("/sse").route(web::post().to(rpc_handler)));
}
