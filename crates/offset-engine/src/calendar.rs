//! Calendar primitives shared by the resolver and the dataset index.
//!
//! Field arithmetic follows calendar semantics, not fixed-length durations:
//!
//! - years and months move the calendar month and clamp the day of month
//!   (Jan 31 + 1 month = Feb 28/29, Feb 29 + 1 year = Feb 28)
//! - days move the calendar date and keep the wall-clock time
//! - hours and minutes add elapsed time
//!
//! Every wall-clock time is read in the dataset timezone through [`localize`],
//! which resolves DST gaps and overlaps deterministically.

use chrono::{DateTime, Months, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{OffsetError, Result};

/// Map a local wall-clock time onto the timeline of `tz`.
///
/// An ambiguous time (DST fall back) resolves to the later instant, the one in
/// standard time. A time
/// inside a DST gap (spring forward) is read with the offset in force before
/// the gap, which lands it after the gap by the gap's width.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Some(dt),
        chrono::LocalResult::Ambiguous(_, latest) => Some(latest),
        chrono::LocalResult::None => {
            let probe = naive.checked_sub_signed(chrono::Duration::days(1))?;
            let before = tz.offset_from_utc_datetime(&probe).fix();
            let utc = naive
                .checked_sub_signed(chrono::Duration::seconds(before.local_minus_utc() as i64))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// Shift by whole calendar months, clamping the day of month.
pub fn add_months(dt: DateTime<Tz>, months: i32) -> Option<DateTime<Tz>> {
    if months == 0 {
        return Some(dt);
    }
    let date = dt.date_naive();
    let shifted = if months > 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))?
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))?
    };
    localize(&dt.timezone(), shifted.and_time(dt.time()))
}

/// Shift by whole calendar years. Feb 29 lands on Feb 28 in a common year.
pub fn add_years(dt: DateTime<Tz>, years: i32) -> Option<DateTime<Tz>> {
    add_months(dt, years.checked_mul(12)?)
}

/// Shift by calendar days, keeping the wall-clock time.
pub fn add_days(dt: DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    if days == 0 {
        return Some(dt);
    }
    let date = dt
        .date_naive()
        .checked_add_signed(chrono::Duration::try_days(days)?)?;
    localize(&dt.timezone(), date.and_time(dt.time()))
}

/// Shift by elapsed minutes.
pub fn add_minutes(dt: DateTime<Tz>, minutes: i64) -> Option<DateTime<Tz>> {
    dt.checked_add_signed(chrono::Duration::try_minutes(minutes)?)
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| OffsetError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| OffsetError::InvalidTimezone(format!("'{}'", s)))
}

/// Render an instant the way coordinator instance values are printed:
/// UTC, minute precision, e.g. `2026-02-18T09:00Z`.
pub fn format_instance_time(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%MZ").to_string()
}
