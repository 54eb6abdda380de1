//! CSV result writer.
//!
//! Writes a `date` column followed by one column per asset, in table order.
//! Converged entries are written with Rust's shortest round-trip float
//! formatting; undefined entries (warm-up, non-convergent, failed) are empty
//! cells.
use std::{fs::File, io::Write, path::Path};

use ::csv::Writer;

use crate::{
    distance::core::outcome::ResultTable,
    io::errors::{IoError, IoResult},
};

/// Header of the date column in written tables.
pub const DATE_HEADER: &str = "date";

/// Write a result table to any sink.
///
/// # Errors
/// `IoError::Csv` if a record cannot be written or flushed.
pub fn write_results<W: Write>(sink: W, table: &ResultTable) -> IoResult<()> {
    let mut writer = Writer::from_writer(sink);
    let mut header = vec![DATE_HEADER.to_string()];
    header.extend(table.asset_ids().map(str::to_string));
    writer.write_record(&header)?;

    for (row, date) in table.dates.iter().enumerate() {
        let mut record = Vec::with_capacity(table.columns.len() + 1);
        record.push(date.format("%Y-%m-%d").to_string());
        for column in &table.columns {
            let cell = column.outcomes.get(row).and_then(|o| o.value());
            record.push(cell.map(|h| h.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a result table to a file, creating parent-less paths as given.
///
/// # Errors
/// `IoError::File` if the file cannot be created, otherwise as
/// [`write_results`].
pub fn write_results_path(path: &Path, table: &ResultTable) -> IoResult<()> {
    let file = File::create(path).map_err(|e| IoError::file(path, &e))?;
    write_results(file, table)
}
