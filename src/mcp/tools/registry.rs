//! Tool registry - central routing for the expense tools.
//!
//! Provides `list_tools()` and `call_tool()` per the MCP spec, plus the
//! category catalog resource.

use std::path::PathBuf;

use actix_web::web;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::catalog;
use crate::db::AppState;
use crate::mcp::content::{ToolResult, ERROR_PREFIX};

use super::{
    add_expense, delete_expense, list_expenses, parse_arguments, summarize_expenses,
    update_expense, ResourceContents, ResourceDescriptor, ToolSet,
};

/// Tool descriptor conforming to MCP specification.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// URI of the category catalog resource.
pub const CATALOG_URI: &str = "expense://categories";

/// Central registry for the expense tools.
#[derive(Clone)]
pub struct ToolRegistry {
    state: AppState,
    catalog_path: PathBuf,
}

impl ToolRegistry {
    pub fn new(state: AppState, catalog_path: PathBuf) -> Self {
        Self {
            state,
            catalog_path,
        }
    }

    /// Dispatch one tool call. Blocking: runs SQLite work inline, so callers
    /// on the async runtime go through [`ToolSet::call_tool`] instead.
    fn dispatch(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        match name {
            add_expense::TOOL_NAME => self.call_add_expense(arguments),
            list_expenses::TOOL_NAME => self.call_list_expenses(arguments),
            update_expense::TOOL_NAME => self.call_update_expense(arguments),
            delete_expense::TOOL_NAME => self.call_delete_expense(arguments),
            summarize_expenses::TOOL_NAME => self.call_summarize_expenses(arguments),
            _ => ToolResult::error(format!(
                "Tool '{}' is not available. Available tools: {}, {}, {}, {}, {}",
                name,
                add_expense::TOOL_NAME,
                list_expenses::TOOL_NAME,
                update_expense::TOOL_NAME,
                delete_expense::TOOL_NAME,
                summarize_expenses::TOOL_NAME,
            )),
        }
    }

    fn call_add_expense(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<add_expense::AddExpenseRequest>(arguments) {
            Ok(req) => req,
            Err(err) => return ToolResult::error(err),
        };

        // Validate input before touching storage
        if let Err(validation_error) = request.validate() {
            return ToolResult::error(validation_error);
        }

        match add_expense::execute(&self.state.store, request) {
            Ok(text) => ToolResult::success(text),
            Err(err) => ToolResult::error(err.to_string()),
        }
    }

    fn call_list_expenses(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<list_expenses::ListExpensesRequest>(arguments) {
            Ok(req) => req,
            Err(err) => return ToolResult::error(err),
        };

        match list_expenses::execute(&self.state.store, request) {
            Ok(text) => ToolResult::success(text),
            Err(err) => ToolResult::error(err.to_string()),
        }
    }

    fn call_update_expense(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<update_expense::UpdateExpenseRequest>(arguments) {
            Ok(req) => req,
            Err(err) => return ToolResult::error(err),
        };

        match update_expense::execute(&self.state.store, request) {
            Ok(text) => ToolResult::success(text),
            Err(err) => ToolResult::error(err.to_string()),
        }
    }

    fn call_delete_expense(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<delete_expense::DeleteExpenseRequest>(arguments) {
            Ok(req) => req,
            Err(err) => return ToolResult::error(err),
        };

        match delete_expense::execute(&self.state.store, request) {
            Ok(text) => ToolResult::success(text),
            Err(err) => ToolResult::error(err.to_string()),
        }
    }

    fn call_summarize_expenses(&self, arguments: Option<Value>) -> ToolResult {
        let request =
            match parse_arguments::<summarize_expenses::SummarizeExpensesRequest>(arguments) {
                Ok(req) => req,
                Err(err) => return ToolResult::error(err),
            };

        match summarize_expenses::execute(&self.state.store, request) {
            Ok(text) => ToolResult::success(text),
            Err(err) => ToolResult::error(err.to_string()),
        }
    }
}

#[async_trait]
impl ToolSet for ToolRegistry {
    fn title(&self) -> &str {
        "Expense Tracker"
    }

    fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![
            add_expense::descriptor(),
            list_expenses::descriptor(),
            update_expense::descriptor(),
            delete_expense::descriptor(),
            summarize_expenses::descriptor(),
        ]
    }

    async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        let registry = self.clone();
        let name = name.to_string();
        match web::block(move || registry.dispatch(&name, arguments)).await {
            Ok(result) => result,
            Err(err) => ToolResult::error(format!("Tool execution was interrupted: {}", err)),
        }
    }

    fn list_resources(&self) -> Vec<ResourceDescriptor> {
        vec![ResourceDescriptor {
            uri: CATALOG_URI.to_string(),
            name: "Expense categories".to_string(),
            description: Some(
                "Suggested categories and subcategories for classifying expenses".to_string(),
            ),
            mime_type: Some("text/plain".to_string()),
        }]
    }

    async fn read_resource(&self, uri: &str) -> Option<ResourceContents> {
        if uri != CATALOG_URI {
            return None;
        }

        let path = self.catalog_path.clone();
        // A broken catalog file is reported inside the resource text, not as
        // a protocol fault.
        let text = match web::block(move || catalog::render_catalog(&path)).await {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => format!("{}{}", ERROR_PREFIX, err),
            Err(err) => format!("{}could not load categories: {}", ERROR_PREFIX, err),
        };

        Some(ResourceContents {
            uri: CATALOG_URI.to_string(),
            mime_type: "text/plain".to_string(),
            text,
        })
    }
}
