//! Second-pass relative-time functions.
//!
//! Every function resolves a [`RelativeRef`] against the action's nominal
//! time. The plain form materializes the instance value through the
//! coordinator; the `_inst` form stops at the `coord:current(n)` expression.
//! Both return `""` when no instance is available yet.
//!
//! | Reference | Boundary | years | months | days |
//! |---|---|---|---|---|
//! | now | NONE | 0 | 0 | 0 |
//! | today | DAY | 0 | 0 | 0 |
//! | yesterday | DAY | 0 | 0 | −1 |
//! | currentMonth | MONTH | 0 | 0 | day |
//! | lastMonth | MONTH | 0 | −1 | day |
//! | currentYear | YEAR | 0 | month | day |
//! | lastYear | YEAR | −1 | month | day |
//!
//! Hour and minute arguments are passed through as hour and minute deltas.

use crate::coordinator::Coordinator;
use crate::current::{instance_expression, resolve_instance_expression};
use crate::error::Result;
use crate::resolver::{resolve_offset, FieldDelta};
use crate::truncate::TruncationLevel;

/// A symbolic reference relative to the nominal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeRef {
    Now { hour: i32, minute: i32 },
    Today { hour: i32, minute: i32 },
    Yesterday { hour: i32, minute: i32 },
    CurrentMonth { day: i32, hour: i32, minute: i32 },
    LastMonth { day: i32, hour: i32, minute: i32 },
    CurrentYear { month: i32, day: i32, hour: i32, minute: i32 },
    LastYear { month: i32, day: i32, hour: i32, minute: i32 },
}

impl RelativeRef {
    pub fn boundary(&self) -> TruncationLevel {
        match self {
            RelativeRef::Now { .. } => TruncationLevel::None,
            RelativeRef::Today { .. } | RelativeRef::Yesterday { .. } => TruncationLevel::Day,
            RelativeRef::CurrentMonth { .. } | RelativeRef::LastMonth { .. } => {
                TruncationLevel::Month
            }
            RelativeRef::CurrentYear { .. } | RelativeRef::LastYear { .. } => TruncationLevel::Year,
        }
    }

    pub fn delta(&self) -> FieldDelta {
        match *self {
            RelativeRef::Now { hour, minute } | RelativeRef::Today { hour, minute } => {
                FieldDelta::time_of_day(hour, minute)
            }
            RelativeRef::Yesterday { hour, minute } => FieldDelta {
                day: -1,
                ..FieldDelta::time_of_day(hour, minute)
            },
            RelativeRef::CurrentMonth { day, hour, minute } => FieldDelta {
                day,
                ..FieldDelta::time_of_day(hour, minute)
            },
            RelativeRef::LastMonth { day, hour, minute } => FieldDelta {
                month: -1,
                day,
                ..FieldDelta::time_of_day(hour, minute)
            },
            RelativeRef::CurrentYear {
                month,
                day,
                hour,
                minute,
            } => FieldDelta {
                month,
                day,
                ..FieldDelta::time_of_day(hour, minute)
            },
            RelativeRef::LastYear {
                month,
                day,
                hour,
                minute,
            } => FieldDelta {
                year: -1,
                month,
                day,
                hour,
                minute,
            },
        }
    }

    /// Signed instance offset of this reference, `None` when unavailable.
    pub fn resolve(&self, coord: &dyn Coordinator, offset_minutes: i32) -> Result<Option<i64>> {
        resolve_offset(coord, self.boundary(), self.delta(), offset_minutes)
    }

    /// `coord:current(n)` for this reference, or `""`.
    pub fn instance(&self, coord: &dyn Coordinator, offset_minutes: i32) -> Result<String> {
        Ok(instance_expression(self.resolve(coord, offset_minutes)?))
    }

    /// Materialized value of this reference, or `""`.
    pub fn evaluate(&self, coord: &dyn Coordinator, offset_minutes: i32) -> Result<String> {
        resolve_instance_expression(coord, self.resolve(coord, offset_minutes)?)
    }
}

// ── instance expressions ────────────────────────────────────────────────────

/// The nominal time shifted by `hr` hours and `min` minutes, untruncated, as a `coord:current(n)`
/// expression.
pub fn now_inst(coord: &dyn Coordinator, hr: i32, min: i32) -> Result<String> {
    RelativeRef::Now { hour: hr, minute: min }.instance(coord, 0)
}

/// Start of the nominal day plus `hr`:`min`, as a `coord:current(n)` expression.
pub fn today_inst(coord: &dyn Coordinator, hr: i32, min: i32) -> Result<String> {
    RelativeRef::Today { hour: hr, minute: min }.instance(coord, 0)
}

/// Like [`today_inst`], with the nominal time first shifted by `offset_min` minutes.
pub fn today_with_offset_inst(
    coord: &dyn Coordinator,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::Today { hour: hr, minute: min }.instance(coord, offset_min)
}

/// Start of the day before the nominal day plus `hr`:`min`, as a `coord:current(n)` expression.
pub fn yesterday_inst(coord: &dyn Coordinator, hr: i32, min: i32) -> Result<String> {
    RelativeRef::Yesterday { hour: hr, minute: min }.instance(coord, 0)
}

/// Like [`yesterday_inst`], with the nominal time first shifted by `offset_min` minutes.
pub fn yesterday_with_offset_inst(
    coord: &dyn Coordinator,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::Yesterday { hour: hr, minute: min }.instance(coord, offset_min)
}

/// Start of the nominal month plus `day` days and `hr`:`min`, as a `coord:current(n)` expression.
pub fn current_month_inst(coord: &dyn Coordinator, day: i32, hr: i32, min: i32) -> Result<String> {
    current_month_with_offset_inst(coord, day, hr, min, 0)
}

/// Like [`current_month_inst`], with the nominal time first shifted by `offset_min` minutes.
pub fn current_month_with_offset_inst(
    coord: &dyn Coordinator,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::CurrentMonth {
        day,
        hour: hr,
        minute: min,
    }
    .instance(coord, offset_min)
}

/// Start of the previous month plus `day` days and `hr`:`min`, as a `coord:current(n)` expression.
pub fn last_month_inst(coord: &dyn Coordinator, day: i32, hr: i32, min: i32) -> Result<String> {
    last_month_with_offset_inst(coord, day, hr, min, 0)
}

/// Like [`last_month_inst`], with the nominal time first shifted by `offset_min` minutes.
pub fn last_month_with_offset_inst(
    coord: &dyn Coordinator,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::LastMonth {
        day,
        hour: hr,
        minute: min,
    }
    .instance(coord, offset_min)
}

/// Start of the nominal year plus `month` months, `day` days and `hr`:`min`, as a
/// `coord:current(n)` expression.
pub fn current_year_inst(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
) -> Result<String> {
    current_year_with_offset_inst(coord, month, day, hr, min, 0)
}

/// Like [`current_year_inst`], with the nominal time first shifted by `offset_min` minutes.
pub fn current_year_with_offset_inst(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::CurrentYear {
        month,
        day,
        hour: hr,
        minute: min,
    }
    .instance(coord, offset_min)
}

/// Start of the previous year plus `month` months, `day` days and `hr`:`min`, as a
/// `coord:current(n)` expression.
pub fn last_year_inst(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
) -> Result<String> {
    last_year_with_offset_inst(coord, month, day, hr, min, 0)
}

/// Like [`last_year_inst`], with the nominal time first shifted by `offset_min` minutes.
pub fn last_year_with_offset_inst(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::LastYear {
        month,
        day,
        hour: hr,
        minute: min,
    }
    .instance(coord, offset_min)
}

// ── materialized values ─────────────────────────────────────────────────────

/// The nominal time shifted by `hr` hours and `min` minutes, untruncated, as the instance value.
pub fn now(coord: &dyn Coordinator, hr: i32, min: i32) -> Result<String> {
    RelativeRef::Now { hour: hr, minute: min }.evaluate(coord, 0)
}

/// Start of the nominal day plus `hr`:`min`, as the instance value.
pub fn today(coord: &dyn Coordinator, hr: i32, min: i32) -> Result<String> {
    today_with_offset(coord, hr, min, 0)
}

/// Like [`today`], with the nominal time first shifted by `offset_min` minutes.
pub fn today_with_offset(
    coord: &dyn Coordinator,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::Today { hour: hr, minute: min }.evaluate(coord, offset_min)
}

/// Start of the day before the nominal day plus `hr`:`min`, as the instance value.
pub fn yesterday(coord: &dyn Coordinator, hr: i32, min: i32) -> Result<String> {
    yesterday_with_offset(coord, hr, min, 0)
}

/// Like [`yesterday`], with the nominal time first shifted by `offset_min` minutes.
pub fn yesterday_with_offset(
    coord: &dyn Coordinator,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::Yesterday { hour: hr, minute: min }.evaluate(coord, offset_min)
}

/// Start of the nominal month plus `day` days and `hr`:`min`, as the instance value.
pub fn current_month(coord: &dyn Coordinator, day: i32, hr: i32, min: i32) -> Result<String> {
    current_month_with_offset(coord, day, hr, min, 0)
}

/// Like [`current_month`], with the nominal time first shifted by `offset_min` minutes.
pub fn current_month_with_offset(
    coord: &dyn Coordinator,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::CurrentMonth {
        day,
        hour: hr,
        minute: min,
    }
    .evaluate(coord, offset_min)
}

/// Start of the previous month plus `day` days and `hr`:`min`, as the instance value.
pub fn last_month(coord: &dyn Coordinator, day: i32, hr: i32, min: i32) -> Result<String> {
    last_month_with_offset(coord, day, hr, min, 0)
}

/// Like [`last_month`], with the nominal time first shifted by `offset_min` minutes.
pub fn last_month_with_offset(
    coord: &dyn Coordinator,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::LastMonth {
        day,
        hour: hr,
        minute: min,
    }
    .evaluate(coord, offset_min)
}

/// Start of the nominal year plus `month` months, `day` days and `hr`:`min`, as the instance value.
pub fn current_year(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
) -> Result<String> {
    current_year_with_offset(coord, month, day, hr, min, 0)
}

/// Like [`current_year`], with the nominal time first shifted by `offset_min` minutes.
pub fn current_year_with_offset(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::CurrentYear {
        month,
        day,
        hour: hr,
        minute: min,
    }
    .evaluate(coord, offset_min)
}

/// Start of the previous year plus `month` months, `day` days and `hr`:`min`, as the instance
/// value.
pub fn last_year(coord: &dyn Coordinator, month: i32, day: i32, hr: i32, min: i32) -> Result<String> {
    last_year_with_offset(coord, month, day, hr, min, 0)
}

/// Like [`last_year`], with the nominal time first shifted by `offset_min` minutes.
pub fn last_year_with_offset(
    coord: &dyn Coordinator,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> Result<String> {
    RelativeRef::LastYear {
        month,
        day,
        hour: hr,
        minute: min,
    }
    .evaluate(coord, offset_min)
}
