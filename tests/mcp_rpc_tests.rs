//! HTTP round-trip tests for the expense server's JSON-RPC endpoint.

use actix_web::{test, web, App};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

use expense_mcp_server::db::AppState;
use expense_mcp_server::mcp::tools::ToolRegistry;
use expense_mcp_server::mcp::{self, McpService, McpState};

fn test_state(dir: &TempDir) -> web::Data<Arc<McpState>> {
    let app_state = AppState::new_with_path(dir.path().join("expenses.db")).expect("open state");
    let catalog_path = dir.path().join("categories.json");
    std::fs::write(&catalog_path, r#"{"food": ["groceries"], "transport": []}"#).unwrap();

    let registry = ToolRegistry::new(app_state, catalog_path);
    web::Data::new(Arc::new(McpState::new(McpService::new(Arc::new(registry)))))
}

#[actix_web::test]
async fn test_initialize_reports_the_expense_server() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "clientInfo": { "name": "test-client", "version": "1.0.0" }
        }
    });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(body["result"]["serverInfo"]["title"], "Expense Tracker");
    assert!(body["result"]["capabilities"]["resources"].is_object());
}

#[actix_web::test]
async fn test_tools_list_names_all_five_tools() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    let payload = json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let tools = body["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "add_expense",
            "list_expenses",
            "update_expense",
            "delete_expense",
            "summarize_expenses"
        ]
    );
    for tool in tools {
        assert!(tool["inputSchema"]["type"].is_string());
    }
}

#[actix_web::test]
async fn test_tool_call_lifecycle_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    // Add an expense.
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {
            "name": "add_expense",
            "arguments": { "date": "2025-03-15", "amount": 45.5, "category": "Food" }
        }
    });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["isError"], false);
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("✅ Added expense: #1"));

    // List it back.
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 4,
        "method": "tools/call",
        "params": { "name": "list_expenses", "arguments": {} }
    });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Found 1 expense:"));
    assert!(text.contains("#1 | 2025-03-15 | 45.50 | Food"));

    // A failed call is still a JSON-RPC success, flagged in the payload.
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 5,
        "method": "tools/call",
        "params": { "name": "delete_expense", "arguments": { "id": 99 } }
    });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["isError"], true);
    assert_eq!(
        body["result"]["content"][0]["text"],
        "❌ expense #99 not found"
    );
}

#[actix_web::test]
async fn test_resources_list_and_read() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    let payload = json!({ "jsonrpc": "2.0", "id": 6, "method": "resources/list" });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let resources = body["result"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["uri"], "expense://categories");
    assert_eq!(resources[0]["mimeType"], "text/plain");

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "resources/read",
        "params": { "uri": "expense://categories" }
    });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let contents = &body["result"]["contents"][0];
    assert_eq!(contents["uri"], "expense://categories");
    let text = contents["text"].as_str().unwrap();
    assert!(text.contains("- Food: Groceries"));
    assert!(text.contains("- Transport: (no subcategories)"));

    // Unknown URIs are a protocol-level error.
    let payload = json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "resources/read",
        "params": { "uri": "expense://budget" }
    });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"]["code"], -32002);
}

#[actix_web::test]
async fn test_ping_and_unknown_method() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    let payload = json!({ "jsonrpc": "2.0", "id": 9, "method": "ping" });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["ok"], true);

    let payload = json!({ "jsonrpc": "2.0", "id": 10, "method": "tools/destroy" });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"]["code"], -32601);
}

#[actix_web::test]
async fn test_notifications_return_202_with_no_body() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    let payload = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::ACCEPTED);

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_malformed_bodies_become_rpc_errors() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    // Unparseable JSON.
    let req = test::TestRequest::post()
        .uri("/mcp")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ this is not json")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"]["code"], -32700);

    // Valid JSON that is not a request object.
    let req = test::TestRequest::post()
        .uri("/mcp")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"no_method": true}"#)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"]["code"], -32600);

    // Wrong jsonrpc version.
    let payload = json!({ "jsonrpc": "1.0", "id": 11, "method": "ping" });
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"]["code"], -32600);
}

#[actix_web::test]
async fn test_sse_alias_serves_the_same_rpc_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app =
        test::init_service(App::new().app_data(test_state(&dir)).configure(mcp::config)).await;

    let payload = json!({ "jsonrpc": "2.0", "id": 12, "method": "ping" });
    let req = test::TestRequest::post()
        .uri("/sse")
        .set_json(&payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["ok"], true);
}
