//! Tool definition for permanently removing an expense.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::ExpenseStore;
use crate::error::ExpenseError;
use crate::expense::report;

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "delete_expense";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: "Permanently delete one expense by id. There is no undo.".to_string(),
        input_schema: input_schema(),
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "integer",
                "description": "Id of the expense to delete, as shown by list_expenses"
            }
        },
        "required": ["id"]
    })
}

#[derive(Debug, Deserialize)]
pub struct DeleteExpenseRequest {
    pub id: i64,
}

pub fn execute(
    store: &ExpenseStore,
    request: DeleteExpenseRequest,
) -> Result<String, ExpenseError> {
    let snapshot = store.delete(request.id)?;
    Ok(format!(
        "Deleted expense: {}",
        report::listing_line(&snapshot)
    ))
}
