//! SQLite-backed storage for expense records.
//!
//! Connections are opened per operation rather than pooled: WAL mode plus a
//! busy timeout lets concurrent invocations queue on the file instead of
//! corrupting it or failing fast.

mod expenses;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::ExpenseError;

/// Environment variable naming the database file.
pub const DB_PATH_VAR: &str = "EXPENSE_DB_PATH";

const DEFAULT_DB_PATH: &str = "expenses.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    subcategory TEXT NOT NULL DEFAULT '',
    note TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);
";

/// Shared application state handed to every tool invocation.
#[derive(Clone)]
pub struct AppState {
    pub store: ExpenseStore,
}

impl AppState {
    /// Build state from the environment, creating the database if needed.
    pub fn new() -> Result<Self, ExpenseError> {
        dotenvy::dotenv().ok();
        let path = env::var(DB_PATH_VAR).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        Self::new_with_path(path)
    }

    pub fn new_with_path(path: impl AsRef<Path>) -> Result<Self, ExpenseError> {
        Ok(AppState {
            store: ExpenseStore::open(path)?,
        })
    }
}

/// Handle to the expense database file.
///
/// Cloning is cheap; each operation opens its own connection from the path.
#[derive(Clone)]
pub struct ExpenseStore {
    db_path: PathBuf,
}

impl ExpenseStore {
    /// Open the database at `path`, creating the file and schema if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExpenseError> {
        let store = ExpenseStore {
            db_path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, ExpenseError> {
        let conn = Connection::open(&self.db_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(Duration::from_millis(5000))?;
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_schema_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.db");

        let first = ExpenseStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first.path(), path);

        // Reopening an existing file must not clobber it.
        let reopened = ExpenseStore::open(&path).unwrap();
        let conn = reopened.connect().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
