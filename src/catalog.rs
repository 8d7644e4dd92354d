//! Category catalog loaded from an external JSON document.
//!
//! The document maps category keys to lists of subcategory keys. Keys are
//! lowercase with underscores; display output shows them title-cased with
//! spaces. A missing, unreadable, or malformed document is reported as a
//! distinct error, never a crash.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Environment variable naming the catalog file.
pub const CATALOG_PATH_VAR: &str = "EXPENSE_CATEGORIES_PATH";

const DEFAULT_CATALOG_PATH: &str = "categories.json";

pub fn catalog_path_from_env() -> PathBuf {
    env::var(CATALOG_PATH_VAR)
        .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
        .into()
}

/// Load the catalog at `path` and render it for display, one category per
/// line with its subcategories.
pub fn render_catalog(path: &Path) -> Result<String, ExpenseError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            ExpenseError::ConfigMissing(path.display().to_string())
        } else {
            ExpenseError::ConfigUnreadable(err)
        }
    })?;
    let catalog: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&raw).map_err(ExpenseError::ConfigInvalid)?;

    let mut out = String::from("Expense categories:");
    for (category, subcategories) in &catalog {
        out.push_str(&format!("\n- {}: ", display_name(category)));
        if subcategories.is_empty() {
            out.push_str("(no subcategories)");
        } else {
            let names: Vec<String> = subcategories.iter().map(|s| display_name(s)).collect();
            out.push_str(&names.join(", "));
        }
    }
    Ok(out)
}

/// `personal_care` becomes `Personal Care`.
fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
