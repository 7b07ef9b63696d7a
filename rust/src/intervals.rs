//! Date normalisation and the inclusive range-overlap test.
//!
//! Two granularities are in play and must not be mixed:
//! - time-off requests are compared as calendar days, taken from the date
//!   portion of the value exactly as written (no timezone shifting);
//! - schedule assignments are compared as instants.
//!
//! A night shift ending at 01:00 shares a calendar day with the next
//! morning's job without overlapping it, so collapsing the two changes
//! conflict outcomes at day boundaries.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// Naive timestamp layouts accepted by [`parse_instant`]; interpreted as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts that are not strict RFC 3339 (e.g. Postgres `+00`).
const OFFSET_TIMESTAMP_FORMATS: [&str; 2] =
    ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Inclusive ranges `[a_start, a_end]` and `[b_start, b_end]` overlap iff
/// `a_start <= b_end && b_start <= a_end`.
///
/// Works for calendar days and instants alike. Symmetric in its two ranges.
pub fn has_date_overlap<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Tuple form of [`has_date_overlap`].
pub fn intervals_overlap<T: PartialOrd + Copy>(a: (T, T), b: (T, T)) -> bool {
    has_date_overlap(a.0, a.1, b.0, b.1)
}

/// Normalise a raw date or timestamp to the calendar day it was written on.
///
/// Accepts `YYYY-MM-DD` or any timestamp whose first ten characters are
/// that date. Returns `None` for empty or unparseable input.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let day_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// Parse a raw timestamp into an offset-aware instant.
///
/// RFC 3339 first, then common offset-suffixed layouts, then naive layouts
/// which are assumed to be UTC. A bare date is not an instant.
pub fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }

    for fmt in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    let utc = FixedOffset::east_opt(0)?;
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| utc.from_utc_datetime(&naive))
}

/// Calendar day of an instant as seen in its own offset.
///
/// Equivalent to taking the date portion of the instant's ISO string.
pub fn calendar_day(instant: &DateTime<FixedOffset>) -> NaiveDate {
    instant.date_naive()
}

/// Hours from `earlier` to `later`; negative if `later` precedes `earlier`.
pub fn hours_between(earlier: &DateTime<FixedOffset>, later: &DateTime<FixedOffset>) -> f64 {
    (*later - *earlier).num_seconds() as f64 / 3600.0
}
