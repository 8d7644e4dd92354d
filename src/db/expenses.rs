//! Row-level operations on the expenses table.

use rusqlite::{params, params_from_iter, types::Value, Connection, Row, TransactionBehavior};

use crate::error::ExpenseError;
use crate::expense::filter::{ExpenseFilter, GroupKey};
use crate::expense::model::{Expense, ExpenseUpdate, GroupTotal, NewExpense};

use super::ExpenseStore;

fn row_to_expense(row: &Row) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        subcategory: row.get(4)?,
        note: row.get(5)?,
    })
}

fn get_in(conn: &Connection, id: i64) -> Result<Expense, ExpenseError> {
    conn.query_row(
        "SELECT id, date, amount, category, subcategory, note FROM expenses WHERE id = ?1",
        params![id],
        row_to_expense,
    )
    .map_err(|err| match err {
        rusqlite::Error::QueryReturnedNoRows => ExpenseError::NotFound(id),
        other => ExpenseError::Storage(other),
    })
}

impl ExpenseStore {
    /// Insert a new expense and return it as stored, id included.
    pub fn create(&self, new: &NewExpense) -> Result<Expense, ExpenseError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO expenses (date, amount, category, subcategory, note) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.date.to_string(),
                new.amount,
                new.category,
                new.subcategory,
                new.note
            ],
        )?;
        let id = conn.last_insert_rowid();
        get_in(&conn, id)
    }

    pub fn get(&self, id: i64) -> Result<Expense, ExpenseError> {
        let conn = self.connect()?;
        get_in(&conn, id)
    }

    /// Overwrite the supplied fields of row `id` and return the row before
    /// and after the change.
    ///
    /// The existence check and the write share an immediate transaction, so
    /// a concurrent delete cannot slip between them. A missing row reports
    /// `NotFound` even when the update carries no effective fields.
    pub fn update(
        &self,
        id: i64,
        update: &ExpenseUpdate,
    ) -> Result<(Expense, Expense), ExpenseError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let before = get_in(&tx, id)?;

        if update.is_empty() {
            return Err(ExpenseError::NoFieldsToUpdate);
        }

        let mut assignments = Vec::new();
        let mut binds: Vec<Value> = Vec::new();
        if let Some(date) = update.date {
            assignments.push("date = ?");
            binds.push(Value::Text(date.to_string()));
        }
        if let Some(amount) = update.amount {
            assignments.push("amount = ?");
            binds.push(Value::Real(amount));
        }
        if let Some(category) = &update.category {
            assignments.push("category = ?");
            binds.push(Value::Text(category.clone()));
        }
        if let Some(subcategory) = &update.subcategory {
            assignments.push("subcategory = ?");
            binds.push(Value::Text(subcategory.clone()));
        }
        if let Some(note) = &update.note {
            assignments.push("note = ?");
            binds.push(Value::Text(note.clone()));
        }
        binds.push(Value::Integer(id));

        let sql = format!(
            "UPDATE expenses SET {} WHERE id = ?",
            assignments.join(", ")
        );
        tx.execute(&sql, params_from_iter(binds))?;

        let after = get_in(&tx, id)?;
        tx.commit()?;
        Ok((before, after))
    }

    /// Remove row `id` permanently, returning its final snapshot.
    pub fn delete(&self, id: i64) -> Result<Expense, ExpenseError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let snapshot = get_in(&tx, id)?;
        tx.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(snapshot)
    }

    /// Rows matching `filter`, newest first.
    pub fn query(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, ExpenseError> {
        let conn = self.connect()?;
        let (sql, binds) = filter.listing_sql();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(binds), row_to_expense)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Per-group totals for rows matching `filter`, largest total first.
    pub fn summarize(
        &self,
        filter: &ExpenseFilter,
        key: GroupKey,
    ) -> Result<Vec<GroupTotal>, ExpenseError> {
        let conn = self.connect()?;
        let (sql, binds) = filter.summary_sql(key);
        let mut stmt = conn.prepare(&sql)?;
        let groups = stmt
            .query_map(params_from_iter(binds), |row| {
                Ok(GroupTotal {
                    key: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temp_store() -> (tempfile::TempDir, ExpenseStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ExpenseStore::open(dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn new_expense(date: &str, amount: f64) -> NewExpense {
        NewExpense {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            category: "Food".to_string(),
            subcategory: String::new(),
            note: String::new(),
        }
    }

    #[test]
    fn test_missing_id_maps_to_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(store.get(42), Err(ExpenseError::NotFound(42))));
        assert!(matches!(store.delete(42), Err(ExpenseError::NotFound(42))));

        let update = ExpenseUpdate {
            amount: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            store.update(42, &update),
            Err(ExpenseError::NotFound(42))
        ));

        // The missing row is reported even when there is nothing to change.
        assert!(matches!(
            store.update(42, &ExpenseUpdate::default()),
            Err(ExpenseError::NotFound(42))
        ));
    }

    #[test]
    fn test_empty_update_is_rejected_and_leaves_the_row_intact() {
        let (_dir, store) = temp_store();
        let stored = store.create(&new_expense("2025-03-15", 45.5)).unwrap();

        let err = store.update(stored.id, &ExpenseUpdate::default()).unwrap_err();
        assert!(matches!(err, ExpenseError::NoFieldsToUpdate));
        assert_eq!(store.get(stored.id).unwrap(), stored);
    }

    #[test]
    fn test_update_returns_before_and_after_snapshots() {
        let (_dir, store) = temp_store();
        let stored = store.create(&new_expense("2025-03-15", 45.5)).unwrap();

        let update = ExpenseUpdate {
            amount: Some(50.0),
            note: Some("corrected".to_string()),
            ..Default::default()
        };
        let (before, after) = store.update(stored.id, &update).unwrap();

        assert_eq!(before, stored);
        assert_eq!(after.amount, 50.0);
        assert_eq!(after.note, "corrected");
        assert_eq!(after.date, before.date);
        assert_eq!(after.category, before.category);
    }
}
