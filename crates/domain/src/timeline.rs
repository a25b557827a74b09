//! Chronological ordering of narrative events
//!
//! Event dates are free text typed by the author. `timeline_key` turns that
//! text into a sortable number plus a flag saying how much the number can be
//! trusted. It never fails: unreadable dates only degrade ordering.
//!
//! Recognized forms, first match wins:
//!
//! | Input          | Key                                   | Confidence    |
//! |----------------|---------------------------------------|---------------|
//! | `YYYY-MM-DD`   | Unix seconds at midnight UTC          | `Exact`       |
//! | `YYYY`         | Unix seconds at January 1             | `Exact`       |
//! | `MM/YYYY`      | Unix seconds at the first of the month| `Exact`       |
//! | any digits     | first integer as an age, in seconds   | `Approximate` |
//! | no digits      | `UNDATED_BASE - importance`           | `Undated`     |

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::entities::NarrativeEvent;

/// Key base for events without any number in their date.
///
/// Far above every dated key so undated events always sort last.
pub const UNDATED_BASE: f64 = 1e15;

/// Largest age taken from a date string; bigger numbers are clamped.
pub const MAX_AGE_YEARS: u64 = 1_000_000;

const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// How a `TimelineKey` was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyConfidence {
    /// Parsed from a calendar date
    Exact,
    /// Guessed from an age or other loose number
    Approximate,
    /// No number found; ordered by importance only
    Undated,
}

/// Sort key for one event.
#[derive(Debug, Clone, Copy)]
pub struct TimelineKey {
    value: f64,
    confidence: KeyConfidence,
}

impl TimelineKey {
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn confidence(&self) -> KeyConfidence {
        self.confidence
    }

    pub fn is_dated(&self) -> bool {
        self.confidence != KeyConfidence::Undated
    }
}

impl PartialEq for TimelineKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimelineKey {}

impl PartialOrd for TimelineKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimelineKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.confidence.cmp(&other.confidence))
    }
}

/// Compute the sort key for a free-text date.
///
/// # Example
///
/// ```
/// use charsheet_domain::timeline::{timeline_key, KeyConfidence};
///
/// assert!(timeline_key("2024-01-01", 5) < timeline_key("2024-06-01", 5));
/// assert_eq!(timeline_key("Age 10", 5).confidence(), KeyConfidence::Approximate);
/// assert!(timeline_key("", 9) < timeline_key("", 3));
/// ```
pub fn timeline_key(date: &str, importance: u8) -> TimelineKey {
    let date = date.trim();

    let calendar = parse_iso_date(date)
        .or_else(|| parse_year(date))
        .or_else(|| parse_month_year(date));
    if let Some(day) = calendar {
        return TimelineKey {
            value: unix_seconds(day),
            confidence: KeyConfidence::Exact,
        };
    }

    if let Some(age) = first_integer(date) {
        return TimelineKey {
            value: age as f64 * SECONDS_PER_YEAR,
            confidence: KeyConfidence::Approximate,
        };
    }

    TimelineKey {
        value: UNDATED_BASE - f64::from(importance),
        confidence: KeyConfidence::Undated,
    }
}

/// Stable sort into timeline order; equal keys keep their relative order.
pub fn sort_events(events: &mut [NarrativeEvent]) {
    events.sort_by_cached_key(NarrativeEvent::timeline_key);
}

/// Position at which an event with `key` goes into an already sorted list:
/// after the last event whose key is `<=` it.
pub fn insertion_index(events: &[NarrativeEvent], key: TimelineKey) -> usize {
    events.partition_point(|event| event.timeline_key() <= key)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || !is_digits(year, 4) || !is_digits(month, 2) || !is_digits(day, 2)
    {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_year(s: &str) -> Option<NaiveDate> {
    if !is_digits(s, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)
}

fn parse_month_year(s: &str) -> Option<NaiveDate> {
    let (month, year) = s.split_once('/')?;
    if !is_digits(month, 2) || !is_digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn unix_seconds(day: NaiveDate) -> f64 {
    // Midnight always exists
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp() as f64)
        .unwrap_or_default()
}

fn first_integer(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    // Overlong digit runs overflow u64; they clamp like any other huge age
    let age = rest[..end].parse::<u64>().unwrap_or(u64::MAX);
    Some(age.min(MAX_AGE_YEARS))
}
