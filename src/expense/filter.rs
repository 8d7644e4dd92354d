//! Builds parameterized SQL for listing and summary queries.

use chrono::NaiveDate;
use rusqlite::types::Value;

/// Column a summary aggregates by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Category,
    Subcategory,
}

impl GroupKey {
    pub fn column(self) -> &'static str {
        match self {
            GroupKey::Category => "category",
            GroupKey::Subcategory => "subcategory",
        }
    }
}

/// Row filter shared by listings and summaries.
///
/// Dates bound here are inclusive on both ends. `limit` applies to listings
/// only and `0` means unbounded; summaries always aggregate every matching
/// row regardless of it.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: u32,
}

impl ExpenseFilter {
    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();

        if let Some(category) = &self.category {
            conditions.push("category = ?");
            binds.push(Value::Text(category.clone()));
        }
        if let Some(start) = self.start_date {
            conditions.push("date >= ?");
            binds.push(Value::Text(start.to_string()));
        }
        if let Some(end) = self.end_date {
            conditions.push("date <= ?");
            binds.push(Value::Text(end.to_string()));
        }

        if conditions.is_empty() {
            (String::new(), binds)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), binds)
        }
    }

    /// SELECT for a listing, newest first with id as the tiebreak.
    pub fn listing_sql(&self) -> (String, Vec<Value>) {
        let (clause, mut binds) = self.where_clause();
        let mut sql = format!(
            "SELECT id, date, amount, category, subcategory, note \
             FROM expenses{} ORDER BY date DESC, id DESC",
            clause
        );
        if self.limit > 0 {
            sql.push_str(" LIMIT ?");
            binds.push(Value::Integer(i64::from(self.limit)));
        }
        (sql, binds)
    }

    /// SELECT aggregating matching rows per `key`, largest total first.
    pub fn summary_sql(&self, key: GroupKey) -> (String, Vec<Value>) {
        let (clause, binds) = self.where_clause();
        let column = key.column();
        let sql = format!(
            "SELECT {column}, SUM(amount), COUNT(*) \
             FROM expenses{clause} GROUP BY {column} ORDER BY SUM(amount) DESC"
        );
        (sql, binds)
    }
}
