//! Tool definition for correcting an existing expense.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::dates;
use crate::db::ExpenseStore;
use crate::error::ExpenseError;
use crate::expense::model::{Expense, ExpenseUpdate};

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "update_expense";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Change fields of an existing expense by id. ",
            "Only supplied fields are overwritten: leave a text field empty ",
            "or the amount at zero to keep the stored value. ",
            "There is no way to clear a subcategory or note back to empty."
        )
        .to_string(),
        input_schema: input_schema(),
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "integer",
                "description": "Id of the expense to change, as shown by list_expenses"
            },
            "date": {
                "type": "string",
                "description": "New date, same flexible formats as add_expense"
            },
            "amount": {
                "type": "number",
                "description": "New amount; values of zero or less are ignored"
            },
            "category": {
                "type": "string",
                "description": "New category"
            },
            "subcategory": {
                "type": "string",
                "description": "New subcategory"
            },
            "note": {
                "type": "string",
                "description": "New note"
            }
        },
        "required": ["id"]
    })
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub note: String,
}

impl UpdateExpenseRequest {
    /// Effective field changes. Empty text and non-positive amounts leave
    /// fields untouched; a non-empty date that does not parse is likewise
    /// ignored rather than reported.
    pub fn changes(&self, today: NaiveDate) -> ExpenseUpdate {
        let date = match self.date.trim() {
            "" => None,
            expression => dates::parse_fuzzy_date(expression, today).ok(),
        };
        ExpenseUpdate {
            date,
            amount: (self.amount > 0.0).then_some(self.amount),
            category: effective_text(&self.category),
            subcategory: effective_text(&self.subcategory),
            note: effective_text(&self.note),
        }
    }
}

fn effective_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn execute(
    store: &ExpenseStore,
    request: UpdateExpenseRequest,
) -> Result<String, ExpenseError> {
    let changes = request.changes(dates::local_today());
    let (before, after) = store.update(request.id, &changes)?;

    let diff = describe_changes(&before, &after);
    if diff.is_empty() {
        return Ok(format!(
            "Updated expense #{}: stored values already matched",
            after.id
        ));
    }

    let mut text = format!("Updated expense #{}:", after.id);
    for line in &diff {
        text.push_str("\n- ");
        text.push_str(line);
    }
    Ok(text)
}

fn describe_changes(before: &Expense, after: &Expense) -> Vec<String> {
    let mut changes = Vec::new();
    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {:.2} -> {:.2}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.subcategory != after.subcategory {
        changes.push(format!(
            "subcategory: {} -> {}",
            before.subcategory, after.subcategory
        ));
    }
    if before.note != after.note {
        changes.push(format!("note: {} -> {}", before.note, after.note));
    }
    changes
}
