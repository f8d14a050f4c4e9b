//! CLI commands for reports
//!
//! Provides commands for printing and exporting spending summaries.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::Month;
use crate::reports::{ExpenseReport, MonthlySummary};
use crate::storage::RecordStore;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Summarize one month: total, categories, top category
    Month {
        /// Month to summarize (YYYY-MM); defaults to the current month
        month: Option<String>,
    },

    /// Full report over all expenses
    Report {
        /// Export to CSV file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    store: &RecordStore,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Month { month } => handle_month_report(store, settings, month),
        ReportCommands::Report { output } => handle_full_report(store, settings, output),
    }
}

fn handle_month_report(
    store: &RecordStore,
    settings: &Settings,
    month: Option<String>,
) -> ExpenseResult<()> {
    let month = match month {
        Some(s) => {
            Month::parse(&s).map_err(|_| ValidationError::InvalidMonth(s.trim().to_string()))?
        }
        None => Month::current(),
    };

    let records = store.filter_by_month(month);
    let summary = MonthlySummary::generate(&records, month);
    print!("{}", summary.format_terminal(&settings.currency_symbol));

    Ok(())
}

fn handle_full_report(
    store: &RecordStore,
    settings: &Settings,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let report = ExpenseReport::generate(store.list_all());

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
