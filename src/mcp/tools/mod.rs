//! MCP Tools module - defines tools exposed via JSON-RPC.
//!
//! Each tool provides:
//! - Tool descriptor (name, description, input schema)
//! - Argument parsing and validation
//! - Execution and result formatting

pub mod add_expense;
pub mod calculator;
pub mod delete_expense;
pub mod list_expenses;
pub mod registry;
pub mod summarize_expenses;
pub mod update_expense;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::content::ToolResult;
use registry::ToolDescriptor;

pub use registry::ToolRegistry;

/// The tools (and optional resources) one server exposes.
///
/// The protocol service is written against this seam so the expense server
/// and the calculator server share the same request handling.
#[async_trait]
pub trait ToolSet: Send + Sync {
    /// Human-readable server title reported during initialization.
    fn title(&self) -> &str;

    fn list_tools(&self) -> Vec<ToolDescriptor>;

    async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult;

    fn list_resources(&self) -> Vec<ResourceDescriptor> {
        Vec::new()
    }

    /// Contents of the resource at `uri`, or `None` when the URI is unknown.
    async fn read_resource(&self, _uri: &str) -> Option<ResourceContents> {
        None
    }
}

/// Resource descriptor conforming to the resources/list shape.
#[derive(Debug, Serialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Text contents of a read resource.
#[derive(Debug, Serialize)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// Absent arguments parse as an empty object so tools whose parameters all
/// have defaults can be called bare.
pub(crate) fn parse_arguments<T: for<'de> Deserialize<'de>>(
    arguments: Option<Value>,
) -> Result<T, String> {
    let value = arguments.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|err| format!("Invalid arguments: {}", err))
}
