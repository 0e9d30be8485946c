//! Event instants in the anchor time zone
//!
//! All calendar comparisons happen at day granularity in Asia/Jakarta
//! (UTC+07:00, no daylight saving). Stored event times arrive as strings in
//! one of three shapes:
//!
//! - `2024-02-10` (all-day events, midnight in the anchor zone)
//! - `2024-02-10T09:00:00+07:00` (RFC 3339, any offset)
//! - `2024-02-10 09:00:00` (wall-clock time in the anchor zone)

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

/// Zone all calendar dates are compared in
pub const ANCHOR_ZONE: &str = "Asia/Jakarta";

const ANCHOR_OFFSET_SECONDS: i32 = 7 * 3600;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Failure to resolve an event time
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventTimeError {
    #[error("missing {0} time")]
    Missing(&'static str),

    #[error("unrecognized time '{0}'")]
    Unrecognized(String),

    #[error("cannot resolve time zone {0}")]
    Zone(&'static str),
}

/// Fixed offset of the anchor zone
pub fn anchor_offset() -> Result<FixedOffset, EventTimeError> {
    FixedOffset::east_opt(ANCHOR_OFFSET_SECONDS).ok_or(EventTimeError::Zone(ANCHOR_ZONE))
}

/// Parse a stored event time
///
/// `field` names the value in error messages ("start" / "end").
pub fn parse_instant(raw: &str, field: &'static str) -> Result<DateTime<FixedOffset>, EventTimeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(EventTimeError::Missing(field));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed);
    }

    let zone = anchor_offset()?;
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return in_zone(&zone, naive, raw);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EventTimeError::Unrecognized(raw.to_string()))?;
        return in_zone(&zone, midnight, raw);
    }

    Err(EventTimeError::Unrecognized(raw.to_string()))
}

fn in_zone(
    zone: &FixedOffset,
    naive: NaiveDateTime,
    raw: &str,
) -> Result<DateTime<FixedOffset>, EventTimeError> {
    zone.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| EventTimeError::Unrecognized(raw.to_string()))
}

/// Calendar date of an instant, seen from the anchor zone
pub fn anchor_date(instant: &DateTime<FixedOffset>, zone: &FixedOffset) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_plain_date_at_anchor_midnight() {
        let t = parse_instant("2024-02-10", "start").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 7 * 3600);
        assert_eq!((t.year(), t.month(), t.day()), (2024, 2, 10));
        assert_eq!(t.hour(), 0);
    }

    #[test]
    fn parses_rfc3339_keeping_offset() {
        let t = parse_instant("2024-03-01T22:30:00Z", "start").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 0);
        let zone = anchor_offset().unwrap();
        // 22:30 UTC is already the next day in Jakarta
        assert_eq!(anchor_date(&t, &zone), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn parses_wall_clock_in_anchor_zone() {
        let t = parse_instant("2024-05-06 13:45:00", "end").unwrap();
        assert_eq!((t.hour(), t.minute()), (13, 45));
        assert_eq!(t.offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn empty_value_is_missing() {
        assert_eq!(parse_instant("  ", "end"), Err(EventTimeError::Missing("end")));
    }

    #[test]
    fn garbage_is_unrecognized() {
        assert!(matches!(
            parse_instant("next tuesday", "start"),
            Err(EventTimeError::Unrecognized(_))
        ));
    }
}
