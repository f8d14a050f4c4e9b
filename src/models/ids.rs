//! Strongly-typed ID wrapper for expense records
//!
//! Expense IDs are positive integers assigned by the record store. The
//! newtype keeps them from being mixed up with counts or row numbers.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Identifier of an expense record (always >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(NonZeroU64);

impl ExpenseId {
    /// The first ID handed out by an empty store
    pub const FIRST: ExpenseId = ExpenseId(NonZeroU64::MIN);

    /// Create an ID from a raw value, rejecting zero
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    /// Get the raw value
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// The ID that follows this one
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a positive integer: '{}'", s))?;
        Self::new(value).ok_or_else(|| format!("id must be positive: '{}'", s))
    }
}
