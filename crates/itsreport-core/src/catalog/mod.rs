//! Back-office entity catalog
//!
//! Serde models for the row dumps produced by the document, information,
//! activity, project and timeline services. Tabular entities implement
//! [`ExportRecord`](crate::ExportRecord); calendar entities implement
//! [`CalendarEvent`](crate::CalendarEvent). Tabular entities also implement
//! [`ImportRecord`](crate::ImportRecord) so uploaded sheets can be read back.
//!
//! Field names follow the services' JSON tags (`no_surat`, `allDay`,
//! `bgColor`, ...), so a dump can be deserialized as-is.

mod documents;
mod events;
mod meetings;
mod projects;

pub use documents::{
    Arsip, BeritaAcara, Letter, Memo, Perdin, Sk, Surat, SuratKeluar, SuratMasuk,
};
pub use events::{
    AgendaEvent, BookingRapat, JadwalCuti, JadwalRapat, Resource, TimelineData, TimelineDesktop,
    TimelineEntry, TimelineProject,
};
pub use meetings::{
    hari_indonesia, meeting_status_styles, meeting_styles, Meeting, MeetingSchedule,
    MEETING_STATUSES, SCHEDULE_STATUS_COLUMN,
};
pub use projects::{parse_amount, Project, ANGGARAN_COLUMN};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::CellValue;

/// Substring of a reference number that marks a SAG document
pub const SAG_MARKER: &str = "ITS-SAG";

/// Category of a document, derived from its reference number
pub fn category_of(reference: Option<&str>) -> &'static str {
    match reference {
        Some(r) if r.contains(SAG_MARKER) => "SAG",
        _ => "ISO",
    }
}

/// Render an optional date as `YYYY-MM-DD` (empty when absent)
pub(crate) fn date_cell(date: Option<NaiveDate>) -> CellValue {
    date.map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string()))
        .unwrap_or(CellValue::Empty)
}

/// Render an optional string, treating `None` as an empty cell
pub(crate) fn text_cell(value: &Option<String>) -> CellValue {
    value.as_deref().map(CellValue::from).unwrap_or(CellValue::Empty)
}

/// Parse the date shapes found in service dumps
///
/// Accepts `YYYY-MM-DD`, any RFC 3339 timestamp (its calendar date is kept
/// as written) and the `MM/YY` month shorthand used for project months.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Some((month, year)) = raw.split_once('/') {
        let month: u32 = month.trim().parse().ok()?;
        let year: i32 = year.trim().parse().ok()?;
        let year = if year < 100 { 2000 + year } else { year };
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    None
}

/// Serde adapter for optional dates stored as strings
///
/// `null`, a missing field and `""` all map to `None`; an unparseable string
/// is a deserialization error.
pub(crate) fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_loose_date(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", s))),
    }
}
