//! Expense display formatting
//!
//! Provides utilities for formatting expense records as terminal tables.

use super::report::truncate;
use crate::models::expense::DATE_FORMAT;
use crate::models::ExpenseRecord;

/// Format a single expense as a table row
pub fn format_expense_row(record: &ExpenseRecord, currency_symbol: &str) -> String {
    format!(
        "{:>5} {:>12} {:<18} {} {}",
        record.id.to_string(),
        record.amount.format_with_symbol(currency_symbol),
        truncate(&record.category, 18),
        record.date.format(DATE_FORMAT),
        record.note.replace('\n', " ")
    )
}

/// Format a list of expenses as a table
pub fn format_expense_table(records: &[ExpenseRecord], currency_symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:>12} {:<18} {:<10} {}\n",
        "ID", "Amount", "Category", "Date", "Note"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for record in records {
        output.push_str(&format_expense_row(record, currency_symbol));
        output.push('\n');
    }

    output
}

/// Format the confirmation shown after adding an expense
pub fn format_expense_added(record: &ExpenseRecord, currency_symbol: &str) -> String {
    let mut output = format!(
        "Added expense #{}: {} {} on {}",
        record.id,
        record.amount.format_with_symbol(currency_symbol),
        record.category,
        record.date.format(DATE_FORMAT)
    );
    if !record.note.is_empty() {
        output.push_str(&format!(" ({})", record.note));
    }
    output
}
