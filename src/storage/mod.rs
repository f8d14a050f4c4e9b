//! Storage layer for the expense analyzer
//!
//! Provides the CSV-backed record store with atomic writes and automatic
//! directory creation.

pub mod file_io;
pub mod records;

pub use file_io::{open_csv, write_csv_atomic};
pub use records::{LoadReport, RecordStore, SkippedRow};

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseError;

/// Open the record store described by the paths and settings
///
/// Directories are created if needed; records are not loaded yet.
pub fn open_store(paths: &ExpensePaths, settings: &Settings) -> Result<RecordStore, ExpenseError> {
    paths.ensure_directories()?;

    Ok(RecordStore::new(paths.expenses_file())
        .with_case_sensitive_categories(settings.case_sensitive_categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_store(&paths, &Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(store.path(), temp_dir.path().join("data").join("expenses.csv"));
        assert!(store.is_empty());
    }
}
