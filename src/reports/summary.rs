//! Full Expense Report
//!
//! Bundles every aggregate the engine computes over a snapshot: total,
//! per-category and per-month breakdowns, and the top category.

use std::collections::BTreeMap;
use std::io::Write;

use super::engine::{self, CategoryTotal};
use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money, Month};

/// Aggregate report over a set of expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseReport {
    /// Total spending
    pub total: Money,
    /// Number of expenses covered
    pub expense_count: usize,
    /// Spending by category
    pub by_category: BTreeMap<String, Money>,
    /// Spending by month
    pub by_month: BTreeMap<Month, Money>,
    /// Highest-spending category
    pub top_category: Option<CategoryTotal>,
}

impl ExpenseReport {
    /// Generate a report from a snapshot of records
    pub fn generate(records: &[ExpenseRecord]) -> Self {
        let by_category = engine::by_category(records);
        let top_category = engine::top_of(&by_category);

        Self {
            total: engine::total(records),
            expense_count: records.len(),
            by_category,
            by_month: engine::by_month(records),
            top_category,
        }
    }

    fn percentage_of_total(&self, amount: Money) -> f64 {
        if self.total.is_zero() {
            0.0
        } else {
            amount.cents() as f64 / self.total.cents() as f64 * 100.0
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();
        let max_category = self
            .top_category
            .as_ref()
            .map(|t| t.total.cents() as f64)
            .unwrap_or(0.0);

        output.push_str("Expense Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Expense: {}\n",
            self.total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Expenses: {}\n\n", self.expense_count));

        output.push_str(&format!(
            "{:<25} {:>12} {:>6}  {}\n",
            "Category", "Amount", "%", ""
        ));
        output.push_str(&separator(60));
        output.push('\n');
        if self.by_category.is_empty() {
            output.push_str("No expenses found\n");
        }
        for (category, amount) in &self.by_category {
            output.push_str(&format!(
                "{:<25} {:>12} {:>6}  {}\n",
                category,
                amount.format_with_symbol(currency_symbol),
                format_percentage(self.percentage_of_total(*amount)),
                format_bar(amount.cents() as f64, max_category, 12)
            ));
        }

        if !self.by_month.is_empty() {
            output.push_str(&format!("\n{:<25} {:>12}\n", "Month", "Amount"));
            output.push_str(&separator(60));
            output.push('\n');
            for (month, amount) in &self.by_month {
                output.push_str(&format!(
                    "{:<25} {:>12}\n",
                    month.to_string(),
                    amount.format_with_symbol(currency_symbol)
                ));
            }
        }

        output.push('\n');
        match &self.top_category {
            Some(top) => output.push_str(&format!(
                "Top Category: {} -> {}\n",
                top.category,
                top.total.format_with_symbol(currency_symbol)
            )),
            None => output.push_str("Top Category: No Data\n"),
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per category and per month, followed by a total row.
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let export_err = |e: csv::Error| ExpenseError::Export(e.to_string());
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Section", "Key", "Amount", "Percentage"])
            .map_err(export_err)?;

        let categories = self
            .by_category
            .iter()
            .map(|(category, amount)| ("category", category.clone(), *amount));
        let months = self
            .by_month
            .iter()
            .map(|(month, amount)| ("month", month.to_string(), *amount));

        for (section, key, amount) in categories.chain(months) {
            let percentage = format!("{:.2}", self.percentage_of_total(amount));
            csv_writer
                .write_record([
                    section,
                    key.as_str(),
                    amount.to_plain_string().as_str(),
                    percentage.as_str(),
                ])
                .map_err(export_err)?;
        }

        let total = self.total.to_plain_string();
        let total_pct = if self.total.is_zero() { "0.00" } else { "100.00" };
        csv_writer
            .write_record(["total", "", total.as_str(), total_pct])
            .map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        Ok(())
    }
}
