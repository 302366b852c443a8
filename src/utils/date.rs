//! UTC datetime parsing and formatting for `<lastmod>`.
//!
//! Accepts the loose set of inputs a page description may carry and
//! always emits one shape: ISO 8601 with millisecond precision and a `Z`
//! suffix.
//!
//! # Accepted strings
//!
//! | Form                          | Example                          |
//! |-------------------------------|----------------------------------|
//! | RFC 3339                      | `2011-10-05T14:48:00.000+02:00`  |
//! | ISO date-time without offset  | `2011-10-05T14:48:00` (UTC)      |
//! | ISO date                      | `2011-10-05` (midnight UTC)      |
//! | ISO year-month / year         | `2011-10`, `2011` (first day)    |
//! | RFC 2822                      | `Wed, 05 Oct 2011 14:48:00 GMT`  |
//! | `Date.prototype.toString`     | `Wed Oct 05 2011 16:48:00 GMT+0200 (CEST)` |
//! | Day month year                | `05 October 2011 14:48 UTC`      |
//!
//! Timestamps are limited to what chrono represents (years -262143 to
//! 262142), which is narrower than the ±8.64e15 ms accepted for numbers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Largest distance from the epoch, in milliseconds, that a timestamp may have.
const MAX_MILLIS: f64 = 8.64e15;

/// Naive date-time layouts, tried in order after zone suffixes are stripped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%a, %d %b %Y %H:%M:%S",
    "%a, %d %b %Y %H:%M",
    "%a %b %d %Y %H:%M:%S",
];

/// `Date.prototype.toString` with a numeric offset, once the zone name is cut.
const OFFSET_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Naive date layouts, interpreted as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %B %Y", "%B %d, %Y", "%Y/%m/%d"];

/// Trailing zone designators equivalent to UTC.
const UTC_SUFFIXES: &[&str] = &[" UTC", " GMT", " UT", "Z"];

/// Parse a date string into a UTC timestamp.
///
/// Returns `None` when no supported form matches or the date does not exist
/// (e.g. `2023-02-29`).
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let s = strip_zone_name(s);
    if let Ok(dt) = DateTime::parse_from_str(s, OFFSET_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = strip_utc_suffix(s);

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
        }
    }

    parse_year_month(naive)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// `YYYY` or `YYYY-MM`, on the first day of the period.
fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let (year, month) = match s.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (s, None),
    };

    let month = match month {
        Some(month) if is_digits(month, 2) => month.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    if !is_digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Convert milliseconds since the epoch to a UTC timestamp.
///
/// The fractional part is truncated. Non-finite values and values beyond
/// ±8.64e15 ms, or outside the range chrono can represent, yield `None`.
#[allow(clippy::cast_possible_truncation)] // Range checked above
pub fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// Format as ISO 8601 with milliseconds: `YYYY-MM-DDTHH:MM:SS.sssZ`
///
/// Years outside 0..=9999 use the expanded form with a sign and six digits
/// (`+010000-01-01T00:00:00.000Z`).
pub fn to_iso_millis(dt: &DateTime<Utc>) -> String {
    let year = dt.year();
    let rest = dt.format("-%m-%dT%H:%M:%S%.3fZ");
    if (0..=9999).contains(&year) {
        format!("{year:04}{rest}")
    } else {
        format!("{year:+07}{rest}")
    }
}

/// Drop a trailing `(zone name)`.
fn strip_zone_name(s: &str) -> &str {
    match s.strip_suffix(')').and_then(|rest| rest.rfind(" (")) {
        Some(at) => s[..at].trim_end(),
        None => s,
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_utc_suffix(s: &str) -> &str {
    UTC_SUFFIXES
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .map_or(s, str::trim_end)
}
