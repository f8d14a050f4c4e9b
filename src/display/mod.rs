//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for terminal
//! display.

pub mod expense;
pub mod report;

pub use expense::{format_expense_added, format_expense_row, format_expense_table};
