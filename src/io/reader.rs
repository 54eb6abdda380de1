//! CSV panel reader.
//!
//! Layout: a header row; the first column holds the date (`YYYY-MM-DD`,
//! also `MM/DD/YYYY` and `YYYY/MM/DD`); one column, named by `rate_column`,
//! holds the risk-free rate; every other column is an asset's price series.
//! Empty cells and `NaN`/`NA` markers parse as `NaN`. Rates are used as given.
use std::{fs::File, io::Read, path::Path};

use ::csv::{ReaderBuilder, StringRecord, Trim};
use chrono::NaiveDate;

use crate::{
    distance::{
        core::panel::{AssetSeries, Panel},
        errors::PanelError,
    },
    io::errors::{IoError, IoResult},
};

/// Rate column of the reference dataset (3-month Treasury yield).
pub const DEFAULT_RATE_COLUMN: &str = "DGS3MO";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const MISSING_MARKERS: [&str; 4] = ["nan", "NaN", "NA", "N/A"];

/// Read a panel from any CSV source.
///
/// # Errors
/// - `IoError::Csv` for malformed or ragged records.
/// - `IoError::MissingDateColumn` for an empty header.
/// - `IoError::Panel` for a missing rate column, unparsable cells, or a
///   panel that fails validation (dates, duplicate ids).
pub fn read_panel<R: Read>(source: R, rate_column: &str) -> IoResult<Panel> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IoError::MissingDateColumn);
    }
    let rate_idx = headers
        .iter()
        .skip(1)
        .position(|h| h == rate_column)
        .map(|i| i + 1)
        .ok_or_else(|| PanelError::MissingRateColumn { column: rate_column.to_string() })?;
    let asset_idx: Vec<usize> = (1..headers.len()).filter(|&i| i != rate_idx).collect();

    let mut dates = Vec::new();
    let mut rate = Vec::new();
    let mut prices: Vec<Vec<f64>> = vec![Vec::new(); asset_idx.len()];
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let line = idx + 2;
        let date_text = record.get(0).unwrap_or_default();
        let date = parse_date(date_text)
            .ok_or_else(|| PanelError::InvalidDate { row: line, text: date_text.to_string() })?;
        dates.push(date);
        rate.push(parse_cell(&record, &headers, rate_idx, line)?);
        for (column, &i) in prices.iter_mut().zip(&asset_idx) {
            column.push(parse_cell(&record, &headers, i, line)?);
        }
    }

    let assets = asset_idx.iter().zip(prices).map(|(&i, p)| AssetSeries::new(&headers[i], p)).collect();
    Ok(Panel::new(dates, rate, assets)?)
}

/// Read a panel from a CSV file.
///
/// # Errors
/// `IoError::File` if the file cannot be opened, otherwise as [`read_panel`].
pub fn read_panel_path(path: &Path, rate_column: &str) -> IoResult<Panel> {
    let file = File::open(path).map_err(|e| IoError::file(path, &e))?;
    read_panel(file, rate_column)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn parse_cell(
    record: &StringRecord, headers: &StringRecord, idx: usize, line: usize,
) -> Result<f64, PanelError> {
    let text = record.get(idx).unwrap_or_default();
    if text.is_empty() || MISSING_MARKERS.contains(&text) {
        return Ok(f64::NAN);
    }
    text.parse::<f64>().map_err(|_| PanelError::InvalidNumber {
        row: line,
        column: headers[idx].to_string(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The rate column is split off wherever it sits; other columns become
    // assets in header order and empty cells become NaN.
    fn read_panel_splits_rate_and_assets() {
        let text = "Date,usdt,DGS3MO,bit\n\
                    2024-01-01,1.0,5.2,42000\n\
                    01/02/2024,,5.3,43000\n";

        let panel = read_panel(text.as_bytes(), DEFAULT_RATE_COLUMN).unwrap();

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.asset_ids().collect::<Vec<_>>(), vec!["usdt", "bit"]);
        assert_eq!(panel.rate().to_vec(), vec![5.2, 5.3]);
        assert!(panel.asset("usdt").unwrap().prices[1].is_nan());
        assert_eq!(panel.dates()[1], NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Missing rate column and bad cells are reported with context.
    fn read_panel_reports_bad_input() {
        let no_rate = "Date,usdt\n2024-01-01,1.0\n";
        let bad_number = "Date,usdt,DGS3MO\n2024-01-01,abc,5.0\n";
        let bad_date = "Date,usdt,DGS3MO\nyesterday,1.0,5.0\n";

        let no_rate = read_panel(no_rate.as_bytes(), DEFAULT_RATE_COLUMN).unwrap_err();
        let bad_number = read_panel(bad_number.as_bytes(), DEFAULT_RATE_COLUMN).unwrap_err();
        let bad_date = read_panel(bad_date.as_bytes(), DEFAULT_RATE_COLUMN).unwrap_err();

        assert_eq!(
            no_rate,
            IoError::Panel(PanelError::MissingRateColumn { column: "DGS3MO".to_string() })
        );
        assert!(matches!(
            bad_number,
            IoError::Panel(PanelError::InvalidNumber { row: 2, ref column, .. }) if column == "usdt"
        ));
        assert!(matches!(bad_date, IoError::Panel(PanelError::InvalidDate { row: 2, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Out-of-order dates fail panel validation.
    fn read_panel_rejects_unsorted_dates() {
        let text = "Date,usdt,DGS3MO\n2024-01-02,1.0,5.0\n2024-01-01,1.0,5.0\n";

        let err = read_panel(text.as_bytes(), DEFAULT_RATE_COLUMN).unwrap_err();

        assert_eq!(err, IoError::Panel(PanelError::NonIncreasingDates { index: 1 }));
    }
}
