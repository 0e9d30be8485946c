//! Reading records back from uploaded sheets
//!
//! Import works on display strings: the reader turns every cell of a row
//! into text (numbers without a trailing `.0`, date cells as their serial
//! day) and hands the row to [`ImportRecord::from_row`]. Cell positions are
//! the exported column order, so a sheet written by the exporter imports
//! back to the same records.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::catalog::parse_loose_date;

/// Day zero of Excel's 1900 date system (serial 1 is 1900-01-01, with the
/// phantom 1900-02-29 folded in)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Date shapes typed into uploaded sheets, tried in order after the dump
/// shapes. Slash dates are read month first.
const UPLOAD_DATE_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%d-%b-%y",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%Y.%m.%d",
    "%b %d, %Y",
    "%b %d, %y",
    "%m/%d/%y",
];

/// Why one row could not be imported
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid date '{value}' in {field}")]
    InvalidDate { field: &'static str, value: String },
}

/// A record that can be rebuilt from one row of an uploaded sheet
pub trait ImportRecord: Sized {
    /// Non-empty cells a row needs before it is parsed at all
    const MIN_COLUMNS: usize;

    /// Build the record from a row's cells, in exported column order
    ///
    /// `cells` may be shorter than the column count; absent cells read as
    /// empty.
    fn from_row(cells: &[String]) -> Result<Self, RowError>;
}

/// Trimmed cell at `index`; `None` when absent or blank
pub fn cell(cells: &[String], index: usize) -> Option<String> {
    cells
        .get(index)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Date of an Excel serial day number
pub fn excel_serial_date(serial: i64) -> Option<NaiveDate> {
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    let days = u64::try_from(serial).ok().filter(|n| *n > 0)?;
    epoch.checked_add_days(Days::new(days))
}

/// Parse a date cell of an uploaded sheet
///
/// Blank is `Ok(None)`. An integer is a serial day; anything else must
/// match one of the dump or upload date shapes.
pub fn parse_cell_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, RowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let invalid = || RowError::InvalidDate {
        field,
        value: raw.to_string(),
    };

    if let Ok(serial) = raw.parse::<i64>() {
        return excel_serial_date(serial).map(Some).ok_or_else(invalid);
    }
    if let Some(date) = parse_loose_date(raw) {
        return Ok(Some(date));
    }
    UPLOAD_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or_else(invalid)
}

/// Optional date cell at `index`
pub fn date_at(
    cells: &[String],
    index: usize,
    field: &'static str,
) -> Result<Option<NaiveDate>, RowError> {
    cells
        .get(index)
        .map_or(Ok(None), |raw| parse_cell_date(raw, field))
}
