//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Path of the temp file used while writing `path`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Open a CSV file for reading, returning `None` if the file doesn't exist
///
/// The reader is flexible about field counts so that a short or long row can
/// be reported and skipped by the caller instead of failing the whole read.
pub fn open_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Option<csv::Reader<BufReader<File>>>, ExpenseError> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ExpenseError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    Ok(Some(reader))
}

/// Write CSV rows to a file atomically (write to temp, then rename)
///
/// The header is written once at the top. The file is either completely
/// replaced or not modified at all.
pub fn write_csv_atomic<P, H, HT, I, R, T>(
    path: P,
    header: H,
    rows: I,
) -> Result<(), ExpenseError>
where
    P: AsRef<Path>,
    H: IntoIterator<Item = HT>,
    HT: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let result = write_csv_file(&temp_path, header, rows).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| ExpenseError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_csv_file<H, HT, I, R, T>(path: &Path, header: H, rows: I) -> Result<(), ExpenseError>
where
    H: IntoIterator<Item = HT>,
    HT: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let file = File::create(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(header)
        .map_err(|e| ExpenseError::Storage(format!("Failed to write header: {}", e)))?;

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| ExpenseError::Storage(format!("Failed to write row: {}", e)))?;
    }

    let mut file = writer
        .into_inner()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    file.flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}
