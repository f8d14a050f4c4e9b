//! Expense record model
//!
//! An expense is a single dated spending entry with a category and an
//! optional note. Records are immutable once created by the record store.

use chrono::NaiveDate;

use super::ids::ExpenseId;
use super::money::Money;
use crate::error::ValidationError;

/// Date format used for input and storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date ("YYYY-MM-DD")
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Largest amount a single expense may carry
///
/// Keeps sums of any realistic number of records inside `i64` cents.
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000);

/// Parse an amount that must be strictly positive and at most [`MAX_AMOUNT`]
pub fn parse_amount(s: &str) -> Result<Money, ValidationError> {
    let trimmed = s.trim();
    match Money::parse(trimmed) {
        Ok(amount) if amount.is_positive() && amount <= MAX_AMOUNT => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(trimmed.to_string())),
    }
}

/// Parse a category label, which must be non-empty after trimming
pub fn parse_category(s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidCategory);
    }
    Ok(trimmed.to_string())
}

/// Validated fields of an expense that has not been assigned an ID yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub note: String,
}

impl NewExpense {
    /// Validate raw user input
    ///
    /// Checks run in order: amount, date, category. The note is kept as-is.
    pub fn parse(
        amount: &str,
        category: &str,
        date: &str,
        note: &str,
    ) -> Result<Self, ValidationError> {
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        let category = parse_category(category)?;

        Ok(Self {
            amount,
            category,
            date,
            note: note.to_string(),
        })
    }
}

/// A persisted expense entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    /// Unique identifier, assigned by the store
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Free-form category label
    pub category: String,

    /// Date of the expense
    pub date: NaiveDate,

    /// Note (may be empty)
    pub note: String,
}

impl ExpenseRecord {
    /// Attach an ID to validated expense fields
    pub fn new(id: ExpenseId, expense: NewExpense) -> Self {
        Self {
            id,
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
            note: expense.note,
        }
    }

    /// Check whether the category matches, optionally ignoring case
    pub fn category_matches(&self, category: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            self.category == category
        } else {
            self.category.to_lowercase() == category.to_lowercase()
        }
    }

    /// Check whether the date falls within an inclusive range
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}
