//! Expense Analyzer - personal expense tracking with CSV storage
//!
//! This library provides the core functionality for the expense analyzer:
//! a record store that validates and persists expenses to a flat CSV file,
//! and a report engine that computes totals and breakdowns over them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expense records, money, months)
//! - `storage`: CSV record store with atomic writes
//! - `reports`: Pure aggregations and report formatting
//! - `display`: Terminal table formatting
//! - `cli`: Command handlers used by the `expense` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_analyzer::reports;
//! use expense_analyzer::storage::RecordStore;
//!
//! # fn main() -> Result<(), expense_analyzer::ExpenseError> {
//! let mut store = RecordStore::new("expenses.csv".into());
//! store.load()?;
//! store.add("200", "Food", "2025-01-13", "Pizza")?;
//!
//! let total = reports::total(store.list_all());
//! println!("Spent {}", total);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult, ValidationError};
