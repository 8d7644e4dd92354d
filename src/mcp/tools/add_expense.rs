//! Tool definition for recording a new expense.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::dates;
use crate::db::ExpenseStore;
use crate::error::ExpenseError;
use crate::expense::model::NewExpense;
use crate::expense::report;

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "add_expense";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Record a new expense. ",
            "Dates are flexible: ISO (2025-03-15), day-first (15/03/2025), ",
            "month names (March 5, 2025), or relative words like 'today', ",
            "'yesterday' and '3 days ago'. ",
            "Check the expense://categories resource for suggested categories."
        )
        .to_string(),
        input_schema: input_schema(),
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "date": {
                "type": "string",
                "description": "When the money was spent, e.g. 'today' or '2025-03-15'"
            },
            "amount": {
                "type": "number",
                "description": "Amount spent, must be greater than zero"
            },
            "category": {
                "type": "string",
                "description": "Expense category, e.g. 'Food'"
            },
            "subcategory": {
                "type": "string",
                "description": "Optional subcategory, e.g. 'Groceries'"
            },
            "note": {
                "type": "string",
                "description": "Optional free-form note"
            }
        },
        "required": ["date", "amount", "category"]
    })
}

#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub date: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub note: String,
}

impl AddExpenseRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("Amount must be greater than zero".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("Category must not be empty".to_string());
        }
        Ok(())
    }
}

pub fn execute(store: &ExpenseStore, request: AddExpenseRequest) -> Result<String, ExpenseError> {
    let date = dates::parse_fuzzy_date(&request.date, dates::local_today())?;
    let stored = store.create(&NewExpense {
        date,
        amount: request.amount,
        category: request.category,
        subcategory: request.subcategory,
        note: request.note,
    })?;
    Ok(format!("Added expense: {}", report::listing_line(&stored)))
}
