//! Tool definition for listing recorded expenses.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::dates;
use crate::db::ExpenseStore;
use crate::error::ExpenseError;
use crate::expense::filter::ExpenseFilter;
use crate::expense::report;

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "list_expenses";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "List recorded expenses, newest first. ",
            "Filter by category and/or a period: either a date_range keyword ",
            "('today', 'yesterday', 'this week', 'last week', 'this month', ",
            "'last month', 'this year', 'last year', 'last N days') or explicit ",
            "start_date/end_date values."
        )
        .to_string(),
        input_schema: input_schema(),
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "limit": {
                "type": "integer",
                "description": "Maximum rows to return (default: 10, 0 means no limit)"
            },
            "category": {
                "type": "string",
                "description": "Only expenses with exactly this category"
            },
            "date_range": {
                "type": "string",
                "description": "Period keyword such as 'last month' or 'last 7 days'"
            },
            "start_date": {
                "type": "string",
                "description": "Earliest date to include (inclusive), ignored when date_range matches"
            },
            "end_date": {
                "type": "string",
                "description": "Latest date to include (inclusive), ignored when date_range matches"
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct ListExpensesRequest {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

fn default_limit() -> u32 {
    10
}

impl ListExpensesRequest {
    pub fn filter(&self, today: chrono::NaiveDate) -> Result<ExpenseFilter, ExpenseError> {
        let (start, end) =
            dates::resolve_range(&self.date_range, &self.start_date, &self.end_date, today)?;
        Ok(ExpenseFilter {
            category: effective_text(&self.category),
            start_date: start,
            end_date: end,
            limit: self.limit,
        })
    }
}

fn effective_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn execute(store: &ExpenseStore, request: ListExpensesRequest) -> Result<String, ExpenseError> {
    let filter = request.filter(dates::local_today())?;
    let rows = store.query(&filter)?;
    Ok(report::render_listing(&rows))
}
