//! Tabular export of store records.
//!
//! Any serde record (holdings rows, watchlist snapshots, growth schedules,
//! category totals) can be written as CSV or JSON and read back from CSV.
//! Unavailable figures (`None`) become empty CSV cells and JSON `null`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Write records as CSV with a header row.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render records as a CSV string.
pub fn to_csv_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Write records to a CSV file, replacing it.
pub fn write_csv_file<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_csv(File::create(path)?, rows)?;
    tracing::debug!("Exported {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Read records from CSV with a header row.
pub fn read_csv<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Read records from a CSV file.
pub fn read_csv_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    read_csv(File::open(path)?)
}

/// Render records as a pretty JSON array.
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
