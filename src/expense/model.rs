//! Core expense records as stored and as supplied by tools.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored expense row.
///
/// `date` stays a plain ISO `YYYY-MM-DD` string here: it is written in that
/// shape, compared lexicographically in SQL, and echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// Fields required to insert a new expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// Partial update for an existing expense. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub note: Option<String>,
}

impl ExpenseUpdate {
    /// True when no column would change.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.note.is_none()
    }
}

/// One aggregated bucket from a summary query.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
    pub count: i64,
}
