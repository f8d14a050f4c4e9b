//! Monthly Summary
//!
//! Total, per-category breakdown, and top category for one calendar month.

use std::collections::BTreeMap;

use super::engine::{self, CategoryTotal};
use crate::models::{ExpenseRecord, Money, Month};

/// Spending summary for a single month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    /// The month summarized
    pub month: Month,
    /// Total spending in the month
    pub total: Money,
    /// Spending by category within the month
    pub by_category: BTreeMap<String, Money>,
    /// Highest-spending category, `None` when the month has no expenses
    pub top_category: Option<CategoryTotal>,
    /// Number of expenses in the month
    pub expense_count: usize,
}

impl MonthlySummary {
    /// Summarize the records that fall in `month`; other records are ignored
    pub fn generate(records: &[ExpenseRecord], month: Month) -> Self {
        let in_month: Vec<ExpenseRecord> = records
            .iter()
            .filter(|r| month.contains(r.date))
            .cloned()
            .collect();

        let by_category = engine::by_category(&in_month);
        let top_category = engine::top_of(&by_category);

        Self {
            month,
            total: engine::total(&in_month),
            by_category,
            top_category,
            expense_count: in_month.len(),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Report: {}\n", self.month));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n",
            self.total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Expenses: {}\n\n", self.expense_count));

        output.push_str("Category-wise Spending:\n");
        if self.by_category.is_empty() {
            output.push_str("  No data found for this month\n");
        } else {
            for (category, amount) in &self.by_category {
                output.push_str(&format!(
                    "  {:<25} {:>12}\n",
                    category,
                    amount.format_with_symbol(currency_symbol)
                ));
            }
        }

        output.push('\n');
        match &self.top_category {
            Some(top) => output.push_str(&format!(
                "Top Category: {} ({})\n",
                top.category,
                top.total.format_with_symbol(currency_symbol)
            )),
            None => output.push_str("Top Category: No Data\n"),
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};

    fn record(id: u64, amount: &str, category: &str, date: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            ExpenseId::new(id).unwrap(),
            NewExpense::parse(amount, category, date, "").unwrap(),
        )
    }

    #[test]
    fn test_generate_monthly_summary() {
        let records = vec![
            record(1, "200", "Food", "2025-01-13"),
            record(2, "500", "Travel", "2025-01-14"),
            record(3, "100", "Food", "2025-02-15"),
            record(4, "40", "Food", "2025-01-31"),
        ];

        let summary = MonthlySummary::generate(&records, Month::new(2025, 1).unwrap());

        assert_eq!(summary.total, Money::from_units(740));
        assert_eq!(summary.expense_count, 3);
        assert_eq!(summary.by_category["Food"], Money::from_units(240));
        assert_eq!(summary.top_category.unwrap().category, "Travel");
    }

    #[test]
    fn test_empty_month() {
        let records = vec![record(1, "200", "Food", "2025-01-13")];
        let summary = MonthlySummary::generate(&records, Month::new(2024, 1).unwrap());

        assert_eq!(summary.total, Money::zero());
        assert!(summary.by_category.is_empty());
        assert!(summary.top_category.is_none());
        assert!(summary.format_terminal("$").contains("Top Category: No Data"));
    }

    #[test]
    fn test_format_terminal() {
        let records = vec![record(1, "12.50", "Food", "2025-03-02")];
        let output =
            MonthlySummary::generate(&records, Month::new(2025, 3).unwrap()).format_terminal("€");

        assert!(output.starts_with("Monthly Report: 2025-03\n"));
        assert!(output.contains("Total Spending: €12.50"));
        assert!(output.contains("Top Category: Food (€12.50)"));
    }
}
