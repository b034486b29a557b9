//! Relative reference → signed dataset instance offset.
//!
//! The reference time is derived from the action's nominal time:
//!
//! ```text
//! reference = truncate(nominal + offset_minutes) + year + month + day + hour + minute
//! ```
//!
//! All steps are evaluated in the dataset timezone, in exactly that order.
//! The offset is then the difference between the sequence numbers of the
//! instances covering `reference` and `nominal`.
//!
//! When no instance can be located (no nominal time, or either time falls
//! before the dataset's initial instance) the result is `Ok(None)`.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::calendar::{add_days, add_minutes, add_months, add_years};
use crate::coordinator::Coordinator;
use crate::error::{OffsetError, Result};
use crate::truncate::TruncationLevel;

/// Signed calendar field adjustments applied after truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldDelta {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
}

impl FieldDelta {
    /// Only hour and minute set; the shape used by `now`, `today` and `yesterday`.
    pub fn time_of_day(hour: i32, minute: i32) -> Self {
        FieldDelta {
            hour,
            minute,
            ..Default::default()
        }
    }
}

/// Compute the reference time for `nominal` without consulting any dataset.
///
/// # Errors
///
/// Returns [`OffsetError::OutOfRange`] if the arithmetic leaves the range
/// chrono can represent.
pub fn reference_time(
    nominal: DateTime<Utc>,
    tz: Tz,
    level: TruncationLevel,
    delta: FieldDelta,
    offset_minutes: i32,
) -> Result<DateTime<Tz>> {
    let start = nominal.with_timezone(&tz);
    let overflow = || {
        OffsetError::OutOfRange(format!(
            "{} shifted by {:?} at {} boundary",
            start.to_rfc3339(),
            delta,
            level
        ))
    };

    let shifted = add_minutes(start, offset_minutes as i64).ok_or_else(overflow)?;
    let truncated = level.truncate(shifted)?;

    let reference = add_years(truncated, delta.year)
        .and_then(|dt| add_months(dt, delta.month))
        .and_then(|dt| add_days(dt, delta.day as i64))
        .and_then(|dt| add_minutes(dt, delta.hour as i64 * 60))
        .and_then(|dt| add_minutes(dt, delta.minute as i64))
        .ok_or_else(overflow)?;

    Ok(reference)
}

/// Resolve a relative reference to a signed instance offset from the nominal
/// instance: negative means earlier, zero the same instance, positive later.
///
/// Returns `Ok(None)` when no offset can be computed yet.
///
/// # Errors
///
/// Returns [`OffsetError::OutOfRange`] if the reference time cannot be
/// represented.
pub fn resolve_offset(
    coord: &dyn Coordinator,
    level: TruncationLevel,
    delta: FieldDelta,
    offset_minutes: i32,
) -> Result<Option<i64>> {
    let Some(nominal) = coord.nominal_time() else {
        warn!(
            "no nominal time: the dataset's initial instance is later than the nominal time, \
             so no data is available at the requested instance"
        );
        return Ok(None);
    };

    let reference = reference_time(
        nominal,
        coord.dataset_timezone(),
        level,
        delta,
        offset_minutes,
    )?;
    debug!(
        nominal = %nominal.to_rfc3339(),
        reference = %reference.to_rfc3339(),
        boundary = %level,
        "computed reference time"
    );

    let Some(computed) = coord.covering_instance(reference.with_timezone(&Utc)) else {
        debug!(reference = %reference.to_rfc3339(), "reference time precedes the dataset");
        return Ok(None);
    };
    let Some(current) = coord.covering_instance(nominal) else {
        debug!(nominal = %nominal.to_rfc3339(), "nominal time precedes the dataset");
        return Ok(None);
    };

    let offset = computed.sequence - current.sequence;
    debug!(offset, "resolved instance offset");
    Ok(Some(offset))
}

/// Like [`resolve_offset`], with the boundary given as a raw ordinal.
///
/// # Errors
///
/// Returns [`OffsetError::UnsupportedTruncation`] for `QUARTER` or any
/// unknown code, before anything is computed.
pub fn resolve_offset_by_code(
    coord: &dyn Coordinator,
    code: u8,
    delta: FieldDelta,
    offset_minutes: i32,
) -> Result<Option<i64>> {
    let level = TruncationLevel::from_code(code)?;
    resolve_offset(coord, level, delta, offset_minutes)
}
