//! Renders listings and grouped summaries as stable, human-readable text.
//!
//! Outcome markers are not applied here; the tool layer wraps these bodies
//! when it builds the final result.

use chrono::NaiveDate;

use crate::expense::model::{Expense, GroupTotal};

/// Label for summary groups whose subcategory is empty. Kept distinct so
/// those rows are never merged into a blank line or dropped.
pub const NO_SUBCATEGORY_LABEL: &str = "(no subcategory)";

/// One listing line: `#id | date | amount | Category [/ Sub] [| note]`.
pub fn listing_line(expense: &Expense) -> String {
    let mut line = format!(
        "#{} | {} | {:.2} | {}",
        expense.id, expense.date, expense.amount, expense.category
    );
    if !expense.subcategory.is_empty() {
        line.push_str(" / ");
        line.push_str(&expense.subcategory);
    }
    if !expense.note.is_empty() {
        line.push_str(" | ");
        line.push_str(&expense.note);
    }
    line
}

/// Multi-line listing in the order the rows were supplied.
pub fn render_listing(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }
    let mut out = format!("Found {}:", count_noun(expenses.len() as i64, "expense"));
    for expense in expenses {
        out.push('\n');
        out.push_str(&listing_line(expense));
    }
    out
}

/// Multi-line summary of pre-aggregated groups, assumed already sorted by
/// descending total. Percentages are of the grand total, 0 when it is 0.
pub fn render_summary(groups: &[GroupTotal], focus: Option<&str>, period: Option<&str>) -> String {
    if groups.is_empty() {
        return "No expenses to summarize.".to_string();
    }

    let grand_total: f64 = groups.iter().map(|g| g.total).sum();
    let record_count: i64 = groups.iter().map(|g| g.count).sum();

    let mut heading = match focus {
        Some(category) => format!("Expense summary for {}", category),
        None => "Expense summary".to_string(),
    };
    if let Some(period) = period {
        heading.push_str(&format!(" ({})", period));
    }
    heading.push(':');

    let mut out = heading;
    for group in groups {
        let label = if group.key.is_empty() {
            NO_SUBCATEGORY_LABEL
        } else {
            group.key.as_str()
        };
        let percentage = if grand_total == 0.0 {
            0.0
        } else {
            group.total / grand_total * 100.0
        };
        out.push_str(&format!(
            "\n- {}: {:.2} ({}, {:.1}%)",
            label,
            group.total,
            count_noun(group.count, "record"),
            percentage
        ));
    }
    out.push_str(&format!(
        "\nTotal: {:.2} across {}",
        grand_total,
        count_noun(record_count, "record")
    ));
    out
}

/// Human-readable echo of the resolved bounds, if any were set.
pub fn describe_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{} to {}", start, end)),
        (Some(start), None) => Some(format!("from {}", start)),
        (None, Some(end)) => Some(format!("through {}", end)),
        (None, None) => None,
    }
}

/// `"1 record"` / `"3 records"`.
pub fn count_noun(count: i64, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
