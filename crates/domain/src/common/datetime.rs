//! Timestamp parsing and formatting for stored records.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Parses a stored timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`, any offset) and naive ISO 8601
/// without an offset (`2024-01-15T10:30:00.123456`), which is read as UTC.
///
/// # Examples
///
/// ```
/// use charsheet_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
///
/// let naive = parse_datetime("2024-01-15T10:30:00.250000").unwrap();
/// assert_eq!(naive, dt + chrono::Duration::milliseconds(250));
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string matches neither form.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let s = s.trim();
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}

/// Formats a timestamp the way records store it: RFC 3339 with a `Z` suffix
/// and only as many fractional digits as needed to round-trip.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
