//! Expense domain types, query filters, and report rendering.

pub mod filter;
pub mod model;
pub mod report;
