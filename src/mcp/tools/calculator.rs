//! Tool definition for the standalone calculator server.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::content::{ContentItem, ToolResult};

use super::registry::ToolDescriptor;
use super::{parse_arguments, ToolSet};

pub const TOOL_NAME: &str = "add_numbers";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: "Add two numbers together and return their sum.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "a": { "type": "number", "description": "First number" },
                "b": { "type": "number", "description": "Second number" }
            },
            "required": ["a", "b"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddNumbersRequest {
    pub a: f64,
    pub b: f64,
}

/// The calculator server's single-tool set.
#[derive(Debug, Clone, Default)]
pub struct CalculatorTools;

#[async_trait]
impl ToolSet for CalculatorTools {
    fn title(&self) -> &str {
        "Calculator Server"
    }

    fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![descriptor()]
    }

    async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        match name {
            TOOL_NAME => call_add_numbers(arguments),
            _ => ToolResult::error(format!(
                "Tool '{}' is not available. Available tools: {}",
                name, TOOL_NAME
            )),
        }
    }
}

fn call_add_numbers(arguments: Option<Value>) -> ToolResult {
    let request = match parse_arguments::<AddNumbersRequest>(arguments) {
        Ok(req) => req,
        Err(err) => return ToolResult::error(err),
    };

    // Plain numeric text, no outcome marker.
    ToolResult {
        content: vec![ContentItem::text(format!("{}", request.a + request.b))],
        is_error: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor() {
        let desc = descriptor();
        assert_eq!(desc.name, TOOL_NAME);
        assert!(!desc.description.is_empty());
        assert!(desc.input_schema.get("required").is_some());
    }

    #[test]
    fn test_add_numbers_returns_the_sum_as_text() {
        let result = call_add_numbers(Some(json!({"a": 1, "b": 2})));
        assert!(!result.is_error);
        assert_eq!(result.content[0].text, "3");

        let result = call_add_numbers(Some(json!({"a": 1.25, "b": 2.25})));
        assert_eq!(result.content[0].text, "3.5");
    }

    #[test]
    fn test_missing_operands_are_an_argument_error() {
        let result = call_add_numbers(Some(json!({"a": 1})));
        assert!(result.is_error);
        assert!(result.content[0].text.contains("Invalid arguments"));
    }
}
