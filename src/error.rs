//! Custom error types for the expense analyzer
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Kinds of user input that fail validation
///
/// Validation errors never change the store: no partial record is created and
/// no file write happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Amount is missing, non-numeric, not greater than zero, or too large
    #[error("Invalid amount '{0}': enter a number greater than 0 and at most 1000000000 (e.g. 250)")]
    InvalidAmount(String),

    /// Date is not a real calendar date in YYYY-MM-DD form
    #[error("Invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    /// Category is empty after trimming
    #[error("Invalid category: category cannot be empty")]
    InvalidCategory,

    /// Month is not in YYYY-MM form
    #[error("Invalid month '{0}': use YYYY-MM")]
    InvalidMonth(String),

    /// Date range with start after end
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },
}

/// The main error type for expense analyzer operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage errors (expense file cannot be read or written)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Get the validation kind, if this is a validation error
    pub fn validation_kind(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(kind) => Some(kind),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for expense analyzer operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
