use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_analyzer::cli::{
    handle_expense_command, handle_report_command, ExpenseCommands, ReportCommands,
};
use expense_analyzer::config::{ExpensePaths, Settings};
use expense_analyzer::storage::open_store;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Expense Analyzer records your expenses in a CSV file and \
                  reports totals by category and by month."
)]
struct Cli {
    /// Log verbosity (overridden by RUST_LOG)
    #[arg(long, global = true, default_value_t = LevelFilter::ERROR)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Expense Analyzer - personal expense tracking");
        println!();
        println!("Run 'expense --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config = command {
        if !paths.settings_file().exists() {
            settings.save(&paths)?;
        }

        println!("Expense Analyzer Configuration");
        println!("==============================");
        println!("Config directory: {}", paths.base_dir().display());
        println!("Settings file:    {}", paths.settings_file().display());
        println!("Expenses file:    {}", paths.expenses_file().display());
        println!();
        println!("Settings:");
        println!("  Currency symbol:           {}", settings.currency_symbol);
        println!(
            "  Case-sensitive categories: {}",
            settings.case_sensitive_categories
        );
        return Ok(());
    }

    let mut store = open_store(&paths, &settings)?;
    let load_report = store.load()?;
    for warning in load_report.warnings() {
        eprintln!("Warning: {}", warning);
    }

    match command {
        Commands::Expense(cmd) => handle_expense_command(&mut store, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&store, &settings, cmd)?,
        Commands::Config => {}
    }

    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            "expense_analyzer",
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
