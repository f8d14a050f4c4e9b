//! CLI commands for recording and searching expenses
//!
//! Thin layer over the record store: arguments are passed through as typed
//! strings and all validation happens in the store.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_added, format_expense_table};
use crate::error::ExpenseResult;
use crate::storage::RecordStore;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g. 250 or 12.50)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (e.g. Food)
        category: String,
        /// Date of the expense (YYYY-MM-DD)
        date: String,
        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List all expenses
    #[command(alias = "ls")]
    List,

    /// Show expenses in a category
    #[command(alias = "search")]
    Category {
        /// Category to match
        name: String,
    },

    /// Show expenses between two dates (inclusive)
    Range {
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
    },
}

/// Handle expense commands
pub fn handle_expense_command(
    store: &mut RecordStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let record = store.add(&amount, &category, &date, &note)?;
            println!("{}", format_expense_added(&record, symbol));
        }
        ExpenseCommands::List => {
            print!("{}", format_expense_table(store.list_all(), symbol));
        }
        ExpenseCommands::Category { name } => {
            let results = store.filter_by_category(&name);
            if results.is_empty() {
                println!("No expenses found in category '{}'.", name.trim());
            } else {
                print!("{}", format_expense_table(&results, symbol));
            }
        }
        ExpenseCommands::Range { start, end } => {
            let results = store.filter_by_date_range(&start, &end)?;
            if results.is_empty() {
                println!("No expenses found between {} and {}.", start, end);
            } else {
                print!("{}", format_expense_table(&results, symbol));
            }
        }
    }

    Ok(())
}
