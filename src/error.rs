//! Error types shared by the expense tools.

use thiserror::Error;

/// Errors that can occur while executing an expense tool.
///
/// Every variant carries a stable, human-readable message. Tools convert
/// these to marker-prefixed text at the MCP boundary instead of letting
/// them cross it as a fault.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("could not parse date '{0}'")]
    InvalidDate(String),
    #[error("expense #{0} not found")]
    NotFound(i64),
    #[error("nothing to update: no effective fields were supplied")]
    NoFieldsToUpdate,
    #[error("categories file not found at '{0}'")]
    ConfigMissing(String),
    #[error("categories file could not be read: {0}")]
    ConfigUnreadable(#[source] std::io::Error),
    #[error("categories file is not valid JSON: {0}")]
    ConfigInvalid(#[source] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
