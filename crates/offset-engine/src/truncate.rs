//! Truncation boundaries and their reset cascade.
//!
//! Truncating to a coarser boundary also resets every finer field beneath
//! it. The cascade is spelled out in [`TruncationLevel::resets`] rather than
//! left to control flow, so `YEAR` can never drift apart from `MONTH` + `DAY`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveTime};
use chrono_tz::Tz;

use crate::calendar::localize;
use crate::error::{OffsetError, Result};

/// How much of the calendar position is reset before deltas are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruncationLevel {
    None,
    Day,
    Month,
    Year,
}

/// A calendar field cleared by truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarField {
    /// Month of year, reset to January.
    Month,
    /// Day of month, reset to 1.
    DayOfMonth,
    /// Hour, minute, second and sub-second, reset to midnight.
    TimeOfDay,
}

impl TruncationLevel {
    /// Fields cleared by this level, coarsest first.
    pub fn resets(self) -> &'static [CalendarField] {
        match self {
            TruncationLevel::Year => &[
                CalendarField::Month,
                CalendarField::DayOfMonth,
                CalendarField::TimeOfDay,
            ],
            TruncationLevel::Month => &[CalendarField::DayOfMonth, CalendarField::TimeOfDay],
            TruncationLevel::Day => &[CalendarField::TimeOfDay],
            TruncationLevel::None => &[],
        }
    }

    /// Decode a boundary from its ordinal in the coordinator's boundary table
    /// (`NONE`, `DAY`, `MONTH`, `QUARTER`, `YEAR`).
    ///
    /// # Errors
    ///
    /// `QUARTER` (3) has no defined reset semantics and, like any code outside
    /// the table, yields [`OffsetError::UnsupportedTruncation`].
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(TruncationLevel::None),
            1 => Ok(TruncationLevel::Day),
            2 => Ok(TruncationLevel::Month),
            4 => Ok(TruncationLevel::Year),
            3 => Err(OffsetError::UnsupportedTruncation("QUARTER".to_string())),
            other => Err(OffsetError::UnsupportedTruncation(format!("#{other}"))),
        }
    }

    /// Apply the reset cascade to `dt`, reading fields in its timezone.
    pub fn truncate(self, dt: DateTime<Tz>) -> Result<DateTime<Tz>> {
        let fields = self.resets();
        if fields.is_empty() {
            return Ok(dt);
        }

        let mut date = dt.date_naive();
        let mut time = dt.time();
        for field in fields {
            match field {
                CalendarField::Month => {
                    date = date.with_month(1).ok_or_else(|| out_of_range(&dt))?;
                }
                CalendarField::DayOfMonth => {
                    date = date.with_day(1).ok_or_else(|| out_of_range(&dt))?;
                }
                CalendarField::TimeOfDay => time = NaiveTime::MIN,
            }
        }

        localize(&dt.timezone(), date.and_time(time)).ok_or_else(|| out_of_range(&dt))
    }
}

fn out_of_range(dt: &DateTime<Tz>) -> OffsetError {
    OffsetError::OutOfRange(format!("cannot truncate {}", dt.to_rfc3339()))
}

impl fmt::Display for TruncationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TruncationLevel::None => "NONE",
            TruncationLevel::Day => "DAY",
            TruncationLevel::Month => "MONTH",
            TruncationLevel::Year => "YEAR",
        };
        f.write_str(name)
    }
}

impl FromStr for TruncationLevel {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(TruncationLevel::None),
            "DAY" => Ok(TruncationLevel::Day),
            "MONTH" => Ok(TruncationLevel::Month),
            "YEAR" => Ok(TruncationLevel::Year),
            _ => Err(OffsetError::UnsupportedTruncation(s.trim().to_string())),
        }
    }
}
