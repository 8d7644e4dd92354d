//! Content items and tool results for the tools/call payload.
//!
//! Tool outcomes travel as human-readable text. The transport-level response
//! is a JSON-RPC success either way, so the text carries a stable marker that
//! lets callers detect the outcome mechanically.

use serde::Serialize;

/// Marker prefixed to successful tool output.
pub const SUCCESS_PREFIX: &str = "✅ ";
/// Marker prefixed to failed tool output.
pub const ERROR_PREFIX: &str = "❌ ";

/// One content block in a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Result payload for tools/call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful outcome; `text` gets the success marker.
    pub fn success(text: impl AsRef<str>) -> Self {
        Self {
            content: vec![ContentItem::text(format!(
                "{}{}",
                SUCCESS_PREFIX,
                text.as_ref()
            ))],
            is_error: false,
        }
    }

    /// Failed outcome; `text` gets the error marker.
    pub fn error(text: impl AsRef<str>) -> Self {
        Self {
            content: vec![ContentItem::text(format!(
                "{}{}",
                ERROR_PREFIX,
                text.as_ref()
            ))],
            is_error: true,
        }
    }
}
