//! Tool definition for aggregated spending summaries.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::dates;
use crate::db::ExpenseStore;
use crate::error::ExpenseError;
use crate::expense::filter::{ExpenseFilter, GroupKey};
use crate::expense::report;

use super::registry::ToolDescriptor;

pub const TOOL_NAME: &str = "summarize_expenses";

/// Get the tool descriptor for MCP tools/list.
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Summarize spending per category with totals and percentages. ",
            "When a category is given, its expenses are broken down by ",
            "subcategory instead. ",
            "Accepts the same date_range keywords and start_date/end_date ",
            "values as list_expenses."
        )
        .to_string(),
        input_schema: input_schema(),
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "date_range": {
                "type": "string",
                "description": "Period keyword such as 'this month' or 'last 30 days'"
            },
            "start_date": {
                "type": "string",
                "description": "Earliest date to include (inclusive), ignored when date_range matches"
            },
            "end_date": {
                "type": "string",
                "description": "Latest date to include (inclusive), ignored when date_range matches"
            },
            "category": {
                "type": "string",
                "description": "Focus on one category and group by subcategory"
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct SummarizeExpensesRequest {
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub category: String,
}

pub fn execute(
    store: &ExpenseStore,
    request: SummarizeExpensesRequest,
) -> Result<String, ExpenseError> {
    let (start, end) = dates::resolve_range(
        &request.date_range,
        &request.start_date,
        &request.end_date,
        dates::local_today(),
    )?;

    let focus = if request.category.is_empty() {
        None
    } else {
        Some(request.category.as_str())
    };
    let key = match focus {
        Some(_) => GroupKey::Subcategory,
        None => GroupKey::Category,
    };

    let filter = ExpenseFilter {
        category: focus.map(str::to_string),
        start_date: start,
        end_date: end,
        limit: 0,
    };
    let groups = store.summarize(&filter, key)?;

    let period = report::describe_period(start, end);
    Ok(report::render_summary(&groups, focus, period.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::model::NewExpense;
    use chrono::NaiveDate;

    fn seeded_store(dir: &tempfile::TempDir) -> ExpenseStore {
        let store = ExpenseStore::open(dir.path().join("test.db")).unwrap();
        let rows = [
            ("2025-03-10", 10.0, "Food", ""),
            ("2025-03-11", 30.0, "Food", "Groceries"),
            ("2025-03-12", 60.0, "Transport", "Taxi"),
        ];
        for (date, amount, category, subcategory) in rows {
            store
                .create(&NewExpense {
                    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                    amount,
                    category: category.to_string(),
                    subcategory: subcategory.to_string(),
                    note: String::new(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_descriptor() {
        let desc = descriptor();
        assert_eq!(desc.name, TOOL_NAME);
        assert!(!desc.description.is_empty());
        assert!(desc.input_schema.get("properties").is_some());
    }

    #[test]
    fn test_execute_groups_by_category_without_a_focus() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        let request: SummarizeExpensesRequest = serde_json::from_value(json!({})).unwrap();
        let text = execute(&store, request).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Expense summary:");
        assert_eq!(lines[1], "- Transport: 60.00 (1 record, 60.0%)");
        assert_eq!(lines[2], "- Food: 40.00 (2 records, 40.0%)");
        assert_eq!(lines[3], "Total: 100.00 across 3 records");
    }

    #[test]
    fn test_execute_focused_on_a_category_groups_by_subcategory() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        let request: SummarizeExpensesRequest =
            serde_json::from_value(json!({ "category": "Food" })).unwrap();
        let text = execute(&store, request).unwrap();

        assert!(text.starts_with("Expense summary for Food:"));
        assert!(text.contains("- Groceries: 30.00 (1 record, 75.0%)"));
        assert!(text.contains("- (no subcategory): 10.00 (1 record, 25.0%)"));
        assert!(text.ends_with("Total: 40.00 across 2 records"));
    }

    #[test]
    fn test_execute_echoes_explicit_bounds_in_the_heading() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        let request: SummarizeExpensesRequest = serde_json::from_value(json!({
            "start_date": "2025-03-11",
            "end_date": "2025-03-12"
        }))
        .unwrap();
        let text = execute(&store, request).unwrap();

        assert!(text.starts_with("Expense summary (2025-03-11 to 2025-03-12):"));
        assert!(text.contains("- Transport: 60.00"));
        assert!(text.contains("- Food: 30.00"));
    }

    #[test]
    fn test_execute_with_no_matches_says_so() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        let request: SummarizeExpensesRequest =
            serde_json::from_value(json!({ "category": "Rent" })).unwrap();
        assert_eq!(execute(&store, request).unwrap(), "No expenses to summarize.");
    }
}
