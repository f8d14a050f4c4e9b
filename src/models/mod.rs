//! Core data models for the expense analyzer
//!
//! This module contains the data structures that represent the expense
//! domain: records, their identifiers, amounts, and calendar months.

pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use expense::{parse_amount, parse_category, parse_date, ExpenseRecord, NewExpense};
pub use ids::ExpenseId;
pub use money::Money;
pub use month::Month;
