//! Dispatch of parsed calls to the echo and resolve functions by name.
//!
//! Names are the expression-language names (`today`, `lastMonth`, ...). Any
//! namespace prefix (`elext:`) is ignored, so a first-pass placeholder can be
//! fed straight back into [`resolve_call`]. `currentMonth`, `lastMonth`,
//! `currentYear` and `lastYear` take one extra trailing argument for the
//! minute offset, under either the base name or the `WithOffset` name.

use crate::args::{Arg, Call};
use crate::context::EvalContext;
use crate::coordinator::Coordinator;
use crate::data_in::data_in;
use crate::echo;
use crate::error::{OffsetError, Result};
use crate::functions::RelativeRef;

/// Names of every function this crate answers to.
pub const FUNCTION_NAMES: &[&str] = &[
    "now",
    "today",
    "todayWithOffset",
    "yesterday",
    "yesterdayWithOffset",
    "currentMonth",
    "currentMonthWithOffset",
    "lastMonth",
    "lastMonthWithOffset",
    "currentYear",
    "currentYearWithOffset",
    "lastYear",
    "lastYearWithOffset",
    "dataIn",
];

/// First pass: render the placeholder for `call`.
pub fn echo_call(ctx: &mut EvalContext, call: &Call) -> Result<String> {
    if call.local_name() == "dataIn" {
        let (name, partition) = data_in_args(call)?;
        return echo::data_in_echo(ctx, name, partition);
    }

    let (r, offset) = relative_ref(call)?;
    let out = match (r, offset) {
        (RelativeRef::Now { hour, minute }, _) => echo::now_echo(ctx, hour, minute),
        (RelativeRef::Today { hour, minute }, None) => echo::today_echo(ctx, hour, minute),
        (RelativeRef::Today { hour, minute }, Some(o)) => {
            echo::today_with_offset_echo(ctx, hour, minute, o)
        }
        (RelativeRef::Yesterday { hour, minute }, None) => echo::yesterday_echo(ctx, hour, minute),
        (RelativeRef::Yesterday { hour, minute }, Some(o)) => {
            echo::yesterday_with_offset_echo(ctx, hour, minute, o)
        }
        (RelativeRef::CurrentMonth { day, hour, minute }, None) => {
            echo::current_month_echo(ctx, day, hour, minute)
        }
        (RelativeRef::CurrentMonth { day, hour, minute }, Some(o)) => {
            echo::current_month_with_offset_echo(ctx, day, hour, minute, o)
        }
        (RelativeRef::LastMonth { day, hour, minute }, None) => {
            echo::last_month_echo(ctx, day, hour, minute)
        }
        (RelativeRef::LastMonth { day, hour, minute }, Some(o)) => {
            echo::last_month_with_offset_echo(ctx, day, hour, minute, o)
        }
        (
            RelativeRef::CurrentYear {
                month,
                day,
                hour,
                minute,
            },
            None,
        ) => echo::current_year_echo(ctx, month, day, hour, minute),
        (
            RelativeRef::CurrentYear {
                month,
                day,
                hour,
                minute,
            },
            Some(o),
        ) => echo::current_year_with_offset_echo(ctx, month, day, hour, minute, o),
        (
            RelativeRef::LastYear {
                month,
                day,
                hour,
                minute,
            },
            None,
        ) => echo::last_year_echo(ctx, month, day, hour, minute),
        (
            RelativeRef::LastYear {
                month,
                day,
                hour,
                minute,
            },
            Some(o),
        ) => echo::last_year_with_offset_echo(ctx, month, day, hour, minute, o),
    };
    Ok(out)
}

/// Second pass: the materialized value of `call`, or `""` when unavailable.
pub fn resolve_call(ctx: &EvalContext, coord: &dyn Coordinator, call: &Call) -> Result<String> {
    if call.local_name() == "dataIn" {
        let (name, partition) = data_in_args(call)?;
        return data_in(ctx, name, partition);
    }
    let (r, offset) = relative_ref(call)?;
    r.evaluate(coord, offset.unwrap_or(0))
}

/// Second pass, stopping at the `coord:current(n)` expression.
pub fn instance_call(coord: &dyn Coordinator, call: &Call) -> Result<String> {
    let (r, offset) = relative_ref(call)?;
    r.instance(coord, offset.unwrap_or(0))
}

fn data_in_args(call: &Call) -> Result<(&str, &str)> {
    match call.args.as_slice() {
        [Arg::Text(name), Arg::Text(partition)] => Ok((name.as_str(), partition.as_str())),
        _ => Err(OffsetError::InvalidArgument(format!(
            "{} expects (name, partition) string arguments",
            call.name
        ))),
    }
}

/// Decode a relative-time call into its reference and optional minute offset.
fn relative_ref(call: &Call) -> Result<(RelativeRef, Option<i32>)> {
    let name = call.local_name();
    if !FUNCTION_NAMES.contains(&name) || name == "dataIn" {
        return Err(OffsetError::UnknownFunction(call.name.clone()));
    }

    let args = call
        .int_args()?
        .into_iter()
        .map(|n| {
            i32::try_from(n).map_err(|_| {
                OffsetError::InvalidArgument(format!("{n} is out of range in {}", call.name))
            })
        })
        .collect::<Result<Vec<i32>>>()?;

    let decoded = match (name, args.as_slice()) {
        ("now", &[hour, minute]) => (RelativeRef::Now { hour, minute }, None),
        ("today", &[hour, minute]) => (RelativeRef::Today { hour, minute }, None),
        ("todayWithOffset", &[hour, minute, o]) => (RelativeRef::Today { hour, minute }, Some(o)),
        ("yesterday", &[hour, minute]) => (RelativeRef::Yesterday { hour, minute }, None),
        ("yesterdayWithOffset", &[hour, minute, o]) => {
            (RelativeRef::Yesterday { hour, minute }, Some(o))
        }
        ("currentMonth", &[day, hour, minute]) => {
            (RelativeRef::CurrentMonth { day, hour, minute }, None)
        }
        ("currentMonth" | "currentMonthWithOffset", &[day, hour, minute, o]) => {
            (RelativeRef::CurrentMonth { day, hour, minute }, Some(o))
        }
        ("lastMonth", &[day, hour, minute]) => (RelativeRef::LastMonth { day, hour, minute }, None),
        ("lastMonth" | "lastMonthWithOffset", &[day, hour, minute, o]) => {
            (RelativeRef::LastMonth { day, hour, minute }, Some(o))
        }
        ("currentYear", &[month, day, hour, minute]) => (
            RelativeRef::CurrentYear {
                month,
                day,
                hour,
                minute,
            },
            None,
        ),
        ("currentYear" | "currentYearWithOffset", &[month, day, hour, minute, o]) => (
            RelativeRef::CurrentYear {
                month,
                day,
                hour,
                minute,
            },
            Some(o),
        ),
        ("lastYear", &[month, day, hour, minute]) => (
            RelativeRef::LastYear {
                month,
                day,
                hour,
                minute,
            },
            None,
        ),
        ("lastYear" | "lastYearWithOffset", &[month, day, hour, minute, o]) => (
            RelativeRef::LastYear {
                month,
                day,
                hour,
                minute,
            },
            Some(o),
        ),
        _ => {
            return Err(OffsetError::InvalidArgument(format!(
                "{} does not take {} argument(s)",
                call.name,
                args.len()
            )))
        }
    };
    Ok(decoded)
}
