//! Reports module for the expense analyzer
//!
//! The engine holds the pure aggregate functions; the report types bundle
//! them for display and export.

pub mod engine;
pub mod monthly;
pub mod summary;

pub use engine::{by_category, by_month, top_category, total, CategoryTotal};
pub use monthly::MonthlySummary;
pub use summary::ExpenseReport;
