//! Expense record store backed by a CSV file
//!
//! The store owns the ordered list of expense records, assigns IDs, validates
//! input, and rewrites expenses.csv after every addition.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::error::{ExpenseError, ExpenseResult, ValidationError};
use crate::models::{
    parse_amount, parse_category, parse_date, ExpenseId, ExpenseRecord, Month, NewExpense,
};

use super::file_io::{open_csv, write_csv_atomic};

/// Column layout of expenses.csv
pub const HEADER: [&str; 5] = ["id", "amount", "category", "date", "note"];

/// A data row that was skipped during load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    /// Why the row was rejected
    pub reason: String,
}

/// Outcome of loading the expense file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records loaded
    pub loaded: usize,
    /// Rows that were skipped because they were malformed
    pub skipped: Vec<SkippedRow>,
    /// Set when the whole file could not be read and the store started empty
    pub unreadable: Option<String>,
}

impl LoadReport {
    /// True when every row was loaded and the file was readable
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.unreadable.is_none()
    }

    /// Human-readable warnings for the caller to surface
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(reason) = &self.unreadable {
            warnings.push(reason.clone());
        }
        for row in &self.skipped {
            warnings.push(format!("Skipped line {}: {}", row.line, row.reason));
        }
        warnings
    }
}

/// Single source of truth for expense records
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<ExpenseRecord>,
    case_sensitive_categories: bool,
}

impl RecordStore {
    /// Create an empty store persisting to `path`
    ///
    /// Nothing is read until [`RecordStore::load`] is called.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
            case_sensitive_categories: false,
        }
    }

    /// Match categories case-sensitively in [`RecordStore::filter_by_category`]
    pub fn with_case_sensitive_categories(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_categories = case_sensitive;
        self
    }

    /// Path of the backing CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load records from disk, replacing the in-memory sequence
    ///
    /// A missing file is an empty dataset. Malformed rows are skipped. If the
    /// file cannot be read at all, the store starts empty and the file is
    /// moved aside so a later save cannot overwrite it.
    pub fn load(&mut self) -> ExpenseResult<LoadReport> {
        self.records.clear();

        match self.read_file() {
            Ok((records, skipped)) => {
                for row in &skipped {
                    warn!(line = row.line, reason = %row.reason, "skipping malformed expense row");
                }
                self.records = records;
                debug!(
                    path = %self.path.display(),
                    loaded = self.records.len(),
                    skipped = skipped.len(),
                    "loaded expenses"
                );
                Ok(LoadReport {
                    loaded: self.records.len(),
                    skipped,
                    unreadable: None,
                })
            }
            Err(e) => {
                let reason = match self.move_aside() {
                    Ok(Some(moved_to)) => format!(
                        "{}; starting with no expenses (original kept at {})",
                        e,
                        moved_to.display()
                    ),
                    Ok(None) => format!("{}; starting with no expenses", e),
                    Err(move_err) => format!(
                        "{}; starting with no expenses (could not preserve file: {})",
                        e, move_err
                    ),
                };
                warn!(path = %self.path.display(), "{}", reason);
                Ok(LoadReport {
                    loaded: 0,
                    skipped: Vec::new(),
                    unreadable: Some(reason),
                })
            }
        }
    }

    fn read_file(&self) -> ExpenseResult<(Vec<ExpenseRecord>, Vec<SkippedRow>)> {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        let Some(mut reader) = open_csv(&self.path)? else {
            return Ok((records, skipped));
        };

        let headers = reader.headers().map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to read header of {}: {}",
                self.path.display(),
                e
            ))
        })?;

        // A zero-byte file has no header and no data
        if headers.is_empty() {
            return Ok((records, skipped));
        }
        if headers.iter().map(str::trim).ne(HEADER) {
            return Err(ExpenseError::Storage(format!(
                "Unexpected header in {}: expected '{}'",
                self.path.display(),
                HEADER.join(",")
            )));
        }

        let mut seen_ids = HashSet::new();

        for (index, result) in reader.records().enumerate() {
            // Header is line 1
            let fallback_line = index as u64 + 2;
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    let line = e
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(fallback_line);
                    skipped.push(SkippedRow {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

            match parse_row(&row) {
                Ok(record) if !seen_ids.insert(record.id) => skipped.push(SkippedRow {
                    line,
                    reason: format!("duplicate id {}", record.id),
                }),
                Ok(record) => records.push(record),
                Err(reason) => skipped.push(SkippedRow { line, reason }),
            }
        }

        Ok((records, skipped))
    }

    fn move_aside(&self) -> std::io::Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = unreadable_target(&self.path);
        fs::rename(&self.path, &target)?;
        Ok(Some(target))
    }

    /// Save all records to disk, replacing the file
    pub fn save(&self) -> ExpenseResult<()> {
        let rows = self.records.iter().map(|r| {
            [
                r.id.to_string(),
                r.amount.to_plain_string(),
                r.category.clone(),
                r.date.format(crate::models::expense::DATE_FORMAT).to_string(),
                r.note.clone(),
            ]
        });
        write_csv_atomic(&self.path, HEADER, rows)?;
        debug!(path = %self.path.display(), count = self.records.len(), "saved expenses");
        Ok(())
    }

    /// Validate and record a new expense, then persist the full list
    ///
    /// Validation failures leave memory and disk untouched. If only the save
    /// fails, the record stays in memory and the error is returned so the
    /// caller can retry [`RecordStore::save`].
    pub fn add(
        &mut self,
        amount: &str,
        category: &str,
        date: &str,
        note: &str,
    ) -> ExpenseResult<ExpenseRecord> {
        let expense = NewExpense::parse(amount, category, date, note)?;
        let id = self.next_id()?;
        let record = ExpenseRecord::new(id, expense);

        self.records.push(record.clone());
        info!(id = %record.id, category = %record.category, amount = %record.amount, "added expense");

        if let Err(e) = self.save() {
            warn!(id = %record.id, error = %e, "expense kept in memory but not saved");
            return Err(e);
        }

        Ok(record)
    }

    fn next_id(&self) -> ExpenseResult<ExpenseId> {
        match self.records.iter().map(|r| r.id).max() {
            None => Ok(ExpenseId::FIRST),
            Some(max) => max
                .next()
                .ok_or_else(|| ExpenseError::Storage("No expense IDs left to assign".into())),
        }
    }

    /// All records in insertion order
    pub fn list_all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose category equals `category` (after trimming)
    ///
    /// Case-insensitive unless the store was built with
    /// [`RecordStore::with_case_sensitive_categories`].
    pub fn filter_by_category(&self, category: &str) -> Vec<ExpenseRecord> {
        let category = category.trim();
        self.records
            .iter()
            .filter(|r| r.category_matches(category, self.case_sensitive_categories))
            .cloned()
            .collect()
    }

    /// Records dated within `[start, end]`, in insertion order
    pub fn filter_by_date_range(&self, start: &str, end: &str) -> ExpenseResult<Vec<ExpenseRecord>> {
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if start_date > end_date {
            return Err(ValidationError::InvalidRange {
                start: start.trim().to_string(),
                end: end.trim().to_string(),
            }
            .into());
        }
        Ok(self.records_between(start_date, end_date))
    }

    /// Records dated within an already-parsed inclusive range
    pub fn records_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<ExpenseRecord> {
        self.records
            .iter()
            .filter(|r| r.in_range(start, end))
            .cloned()
            .collect()
    }

    /// Records dated within a calendar month
    pub fn filter_by_month(&self, month: Month) -> Vec<ExpenseRecord> {
        self.records_between(month.start_date(), month.end_date())
    }
}

fn parse_row(row: &StringRecord) -> Result<ExpenseRecord, String> {
    if row.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            row.len()
        ));
    }

    let id: ExpenseId = row[0].parse().map_err(|e| format!("invalid id: {}", e))?;
    let amount = parse_amount(&row[1]).map_err(|e| e.to_string())?;
    let category = parse_category(&row[2]).map_err(|e| e.to_string())?;
    let date = parse_date(&row[3]).map_err(|e| e.to_string())?;

    Ok(ExpenseRecord {
        id,
        amount,
        category,
        date,
        note: row[4].to_string(),
    })
}

/// First free name among `<file>.unreadable`, `<file>.unreadable.1`, ...
fn unreadable_target(path: &Path) -> PathBuf {
    let mut base = path.file_name().unwrap_or_default().to_os_string();
    base.push(".unreadable");

    let mut target = path.with_file_name(&base);
    let mut n = 1u32;
    while target.exists() {
        let mut name = base.clone();
        name.push(format!(".{}", n));
        target = path.with_file_name(name);
        n += 1;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        let store = RecordStore::new(path);
        (temp_dir, store)
    }

    fn seed(store: &mut RecordStore) {
        store.add("200", "Food", "2025-01-13", "Pizza").unwrap();
        store.add("500", "Travel", "2025-01-14", "Fuel").unwrap();
        store.add("100", "Food", "2025-01-15", "T-shirt").unwrap();
    }

    fn ids(records: &[ExpenseRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id.get()).collect()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, mut store) = create_test_store();
        let report = store.load().unwrap();
        assert!(report.is_clean());
        assert_eq!(report.loaded, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let (_temp_dir, mut store) = create_test_store();
        store.load().unwrap();

        let mut last = 0;
        for i in 0..5 {
            let before = store.len();
            let record = store.add("10", "Misc", "2025-03-01", "").unwrap();
            assert!(record.id.get() > last);
            last = record.id.get();
            assert_eq!(store.len(), before + 1);
            assert_eq!(store.list_all().last(), Some(&record));
            assert_eq!(record.id.get(), i + 1);
        }
    }

    #[test]
    fn test_add_fields_match_input() {
        let (_temp_dir, mut store) = create_test_store();
        let record = store.add("12.50", " Coffee ", "2025-02-03", "Latte, large").unwrap();

        assert_eq!(record.amount, Money::from_cents(1250));
        assert_eq!(record.category, "Coffee");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        assert_eq!(record.note, "Latte, large");
    }

    #[test]
    fn test_add_writes_file() {
        let (temp_dir, mut store) = create_test_store();
        seed(&mut store);

        let contents = fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap();
        assert_eq!(
            contents,
            "id,amount,category,date,note\n\
             1,200,Food,2025-01-13,Pizza\n\
             2,500,Travel,2025-01-14,Fuel\n\
             3,100,Food,2025-01-15,T-shirt\n"
        );
    }

    #[test]
    fn test_next_id_follows_max_not_count() {
        let (temp_dir, mut store) = create_test_store();
        let path = temp_dir.path().join("expenses.csv");
        fs::write(
            &path,
            "id,amount,category,date,note\n7,10,Food,2025-01-01,\n3,5,Food,2025-01-02,\n",
        )
        .unwrap();

        store.load().unwrap();
        let record = store.add("1", "Food", "2025-01-03", "").unwrap();
        assert_eq!(record.id.get(), 8);
    }

    #[test]
    fn test_invalid_amount_does_not_mutate() {
        let (temp_dir, mut store) = create_test_store();
        seed(&mut store);
        let path = temp_dir.path().join("expenses.csv");
        let before = fs::read(&path).unwrap();

        for bad in ["-5", "abc", ""] {
            let err = store.add(bad, "Food", "2025-01-13", "").unwrap_err();
            assert!(matches!(
                err.validation_kind(),
                Some(ValidationError::InvalidAmount(_))
            ));
        }

        assert_eq!(store.len(), 3);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_invalid_input_creates_no_file() {
        let (temp_dir, mut store) = create_test_store();

        let err = store.add("10", "Food", "2025-02-30", "").unwrap_err();
        assert!(matches!(
            err.validation_kind(),
            Some(ValidationError::InvalidDate(_))
        ));

        let err = store.add("10", "  ", "2025-02-03", "").unwrap_err();
        assert_eq!(err.validation_kind(), Some(&ValidationError::InvalidCategory));

        assert!(store.is_empty());
        assert!(!temp_dir.path().join("expenses.csv").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, mut store) = create_test_store();
        seed(&mut store);
        store
            .add("3.75", "Gifts, misc", "2025-02-01", "He said \"thanks\"\nsecond line")
            .unwrap();

        let mut store2 = RecordStore::new(temp_dir.path().join("expenses.csv"));
        let report = store2.load().unwrap();

        assert!(report.is_clean());
        assert_eq!(report.loaded, 4);
        assert_eq!(store2.list_all(), store.list_all());
    }

    #[test]
    fn test_save_failure_keeps_record_in_memory() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("expenses.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = RecordStore::new(path);
        let err = store.add("10", "Food", "2025-01-13", "").unwrap_err();

        assert!(err.is_storage());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_skips_malformed_rows() {
        let (temp_dir, mut store) = create_test_store();
        let path = temp_dir.path().join("expenses.csv");
        fs::write(
            &path,
            "id,amount,category,date,note\n\
             1,200,Food,2025-01-13,Pizza\n\
             2,abc,Food,2025-01-13,bad amount\n\
             3,50,Food,2025-02-30,bad date\n\
             4,50,,2025-01-13,no category\n\
             x,50,Food,2025-01-13,bad id\n\
             5,50,Food\n\
             1,75,Food,2025-01-14,duplicate id\n\
             6,500,Travel,2025-01-14,Fuel\n",
        )
        .unwrap();

        let report = store.load().unwrap();

        assert_eq!(report.loaded, 2);
        assert!(report.unreadable.is_none());
        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6, 7, 8]);
        assert!(report.skipped[5].reason.contains("duplicate"));
        assert_eq!(ids(store.list_all()), vec![1, 6]);
        assert_eq!(report.warnings().len(), 6);
    }

    #[test]
    fn test_unreadable_file_is_moved_aside() {
        let (temp_dir, mut store) = create_test_store();
        let path = temp_dir.path().join("expenses.csv");
        fs::write(&path, "this is not,the expected header\n1,2\n").unwrap();

        let report = store.load().unwrap();

        assert!(store.is_empty());
        assert!(report.unreadable.is_some());
        assert!(!report.is_clean());
        assert!(!path.exists());
        let kept = temp_dir.path().join("expenses.csv.unreadable");
        assert_eq!(
            fs::read_to_string(kept).unwrap(),
            "this is not,the expected header\n1,2\n"
        );

        // The store keeps working after a degraded load
        store.add("10", "Food", "2025-01-13", "").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_repeated_unreadable_loads_keep_every_copy() {
        let (temp_dir, mut store) = create_test_store();
        let path = temp_dir.path().join("expenses.csv");

        fs::write(&path, "bad header one\nsaved-data-1\n").unwrap();
        let first = store.load().unwrap();
        store.add("10", "Food", "2025-01-13", "").unwrap();

        fs::write(&path, "bad header two\nsaved-data-2\n").unwrap();
        let second = store.load().unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("expenses.csv.unreadable")).unwrap(),
            "bad header one\nsaved-data-1\n"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("expenses.csv.unreadable.1")).unwrap(),
            "bad header two\nsaved-data-2\n"
        );
        assert!(first.unreadable.unwrap().contains("expenses.csv.unreadable"));
        assert!(second.unreadable.unwrap().contains("expenses.csv.unreadable.1"));
    }

    #[test]
    fn test_oversized_amount_rejected() {
        let (temp_dir, mut store) = create_test_store();
        store.add("1000000000", "Rent", "2025-01-01", "").unwrap();
        store.add("1000000000", "Rent", "2025-01-02", "").unwrap();
        let before = fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap();

        let err = store
            .add("90000000000000000", "Rent", "2025-01-03", "")
            .unwrap_err();
        assert!(matches!(
            err.validation_kind(),
            Some(ValidationError::InvalidAmount(_))
        ));
        assert_eq!(store.len(), 2);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap(),
            before
        );
        assert_eq!(
            crate::reports::total(store.list_all()),
            Money::from_units(2_000_000_000)
        );
    }

    #[test]
    fn test_oversized_amount_row_skipped_on_load() {
        let (temp_dir, mut store) = create_test_store();
        fs::write(
            temp_dir.path().join("expenses.csv"),
            "id,amount,category,date,note\n\
             1,90000000000000000,Rent,2025-01-01,\n\
             2,90000000000000000,Rent,2025-01-02,\n\
             3,25,Food,2025-01-03,\n",
        )
        .unwrap();

        let report = store.load().unwrap();

        assert_eq!(report.skipped.len(), 2);
        assert_eq!(ids(store.list_all()), vec![3]);
        assert_eq!(crate::reports::total(store.list_all()), Money::from_units(25));
    }

    #[test]
    fn test_empty_file_loads_as_empty() {
        let (temp_dir, mut store) = create_test_store();
        fs::write(temp_dir.path().join("expenses.csv"), "").unwrap();

        let report = store.load().unwrap();
        assert!(report.is_clean());
        assert!(store.is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let (_temp_dir, mut store) = create_test_store();
        seed(&mut store);

        assert_eq!(ids(&store.filter_by_category("Food")), vec![1, 3]);
        assert_eq!(ids(&store.filter_by_category(" food ")), vec![1, 3]);
        assert!(store.filter_by_category("Rent").is_empty());
        assert!(store.filter_by_category("").is_empty());
    }

    #[test]
    fn test_filter_by_category_case_sensitive() {
        let (temp_dir, mut store) = create_test_store();
        seed(&mut store);

        let mut store = RecordStore::new(temp_dir.path().join("expenses.csv"))
            .with_case_sensitive_categories(true);
        store.load().unwrap();

        assert_eq!(ids(&store.filter_by_category("Food")), vec![1, 3]);
        assert!(store.filter_by_category("food").is_empty());
    }

    #[test]
    fn test_filter_by_date_range() {
        let (_temp_dir, mut store) = create_test_store();
        seed(&mut store);

        let range = store.filter_by_date_range("2025-01-13", "2025-01-14").unwrap();
        assert_eq!(ids(&range), vec![1, 2]);

        let all = store.filter_by_date_range("2025-01-01", "2025-12-31").unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3]);

        let none = store.filter_by_date_range("2024-01-01", "2024-12-31").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_by_single_day() {
        let (_temp_dir, mut store) = create_test_store();
        seed(&mut store);
        store.add("42", "Food", "2025-01-14", "").unwrap();

        let day = store.filter_by_date_range("2025-01-14", "2025-01-14").unwrap();
        assert_eq!(ids(&day), vec![2, 4]);
        let expected = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
        assert!(day.iter().all(|r| r.date == expected));
    }

    #[test]
    fn test_filter_preserves_insertion_order() {
        let (_temp_dir, mut store) = create_test_store();
        store.add("1", "A", "2025-01-20", "").unwrap();
        store.add("1", "A", "2025-01-10", "").unwrap();

        let range = store.filter_by_date_range("2025-01-01", "2025-01-31").unwrap();
        assert_eq!(ids(&range), vec![1, 2]);
    }

    #[test]
    fn test_filter_by_date_range_errors() {
        let (_temp_dir, mut store) = create_test_store();
        seed(&mut store);

        let err = store
            .filter_by_date_range("2025-01-14", "2025-01-13")
            .unwrap_err();
        assert!(matches!(
            err.validation_kind(),
            Some(ValidationError::InvalidRange { .. })
        ));

        let err = store.filter_by_date_range("2025-01-01", "soon").unwrap_err();
        assert!(matches!(
            err.validation_kind(),
            Some(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_filter_by_month() {
        let (_temp_dir, mut store) = create_test_store();
        seed(&mut store);
        store.add("80", "Food", "2025-02-01", "").unwrap();

        let jan = store.filter_by_month(Month::new(2025, 1).unwrap());
        assert_eq!(ids(&jan), vec![1, 2, 3]);
        let feb = store.filter_by_month(Month::new(2025, 2).unwrap());
        assert_eq!(ids(&feb), vec![4]);
    }
}
