//! First-pass placeholders.
//!
//! Before an action has a nominal time, relative references cannot be
//! resolved. Each function here renders the call back as an `elext:`
//! placeholder and marks the context so the evaluator wraps the expression
//! for a second pass. Arguments are formatted as given.

use tracing::error;

use crate::context::EvalContext;
use crate::error::{OffsetError, Result};

/// Namespace prefix of every placeholder.
pub const PREFIX: &str = "elext:";

fn placeholder(ctx: &mut EvalContext, call: String) -> String {
    ctx.require_wrap();
    format!("{PREFIX}{call}")
}

/// `elext:now(hr,min)`, rendered without a space after the comma.
pub fn now_echo(ctx: &mut EvalContext, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("now({hr},{min})"))
}

/// `elext:today(hr, min)`.
pub fn today_echo(ctx: &mut EvalContext, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("today({hr}, {min})"))
}

/// `elext:todayWithOffset(hr, min, offset)`.
pub fn today_with_offset_echo(ctx: &mut EvalContext, hr: i32, min: i32, offset_min: i32) -> String {
    placeholder(ctx, format!("todayWithOffset({hr}, {min}, {offset_min})"))
}

/// `elext:yesterday(hr, min)`.
pub fn yesterday_echo(ctx: &mut EvalContext, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("yesterday({hr}, {min})"))
}

/// `elext:yesterdayWithOffset(hr, min, offset)`.
pub fn yesterday_with_offset_echo(
    ctx: &mut EvalContext,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> String {
    placeholder(ctx, format!("yesterdayWithOffset({hr}, {min}, {offset_min})"))
}

/// `elext:currentMonth(day, hr, min)`.
pub fn current_month_echo(ctx: &mut EvalContext, day: i32, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("currentMonth({day}, {hr}, {min})"))
}

// The month and year offset variants keep the base name; arity tells them apart.

/// `elext:currentMonth(day, hr, min, offset)`.
pub fn current_month_with_offset_echo(
    ctx: &mut EvalContext,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> String {
    placeholder(ctx, format!("currentMonth({day}, {hr}, {min}, {offset_min})"))
}

/// `elext:lastMonth(day, hr, min)`.
pub fn last_month_echo(ctx: &mut EvalContext, day: i32, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("lastMonth({day}, {hr}, {min})"))
}

/// `elext:lastMonth(day, hr, min, offset)`.
pub fn last_month_with_offset_echo(
    ctx: &mut EvalContext,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> String {
    placeholder(ctx, format!("lastMonth({day}, {hr}, {min}, {offset_min})"))
}

/// `elext:currentYear(month, day, hr, min)`.
pub fn current_year_echo(ctx: &mut EvalContext, month: i32, day: i32, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("currentYear({month}, {day}, {hr}, {min})"))
}

/// `elext:currentYear(month, day, hr, min, offset)`.
pub fn current_year_with_offset_echo(
    ctx: &mut EvalContext,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> String {
    placeholder(
        ctx,
        format!("currentYear({month}, {day}, {hr}, {min}, {offset_min})"),
    )
}

/// `elext:lastYear(month, day, hr, min)`.
pub fn last_year_echo(ctx: &mut EvalContext, month: i32, day: i32, hr: i32, min: i32) -> String {
    placeholder(ctx, format!("lastYear({month}, {day}, {hr}, {min})"))
}

/// `elext:lastYear(month, day, hr, min, offset)`.
pub fn last_year_with_offset_echo(
    ctx: &mut EvalContext,
    month: i32,
    day: i32,
    hr: i32,
    min: i32,
    offset_min: i32,
) -> String {
    placeholder(
        ctx,
        format!("lastYear({month}, {day}, {hr}, {min}, {offset_min})"),
    )
}

/// Placeholder for a partitioned data-input reference.
///
/// # Errors
///
/// Returns [`OffsetError::InvalidDataIn`] if `name` is not a registered
/// data-input.
pub fn data_in_echo(ctx: &EvalContext, name: &str, partition: &str) -> Result<String> {
    if !ctx.is_data_in(name) {
        error!(data_in = %name, "data_in_name is not valid");
        return Err(OffsetError::InvalidDataIn(name.to_string()));
    }
    Ok(format!("{PREFIX}dataIn('{name}', '{partition}')"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_echo_has_no_space() {
        let mut ctx = EvalContext::new();
        assert_eq!(now_echo(&mut ctx, 5, -10), "elext:now(5,-10)");
        assert!(ctx.wrap_required());
    }

    #[test]
    fn test_day_echoes() {
        let mut ctx = EvalContext::new();
        assert_eq!(today_echo(&mut ctx, 1, 2), "elext:today(1, 2)");
        assert_eq!(
            today_with_offset_echo(&mut ctx, 1, 2, -30),
            "elext:todayWithOffset(1, 2, -30)"
        );
        assert_eq!(yesterday_echo(&mut ctx, 0, 0), "elext:yesterday(0, 0)");
        assert_eq!(
            yesterday_with_offset_echo(&mut ctx, 23, 59, 60),
            "elext:yesterdayWithOffset(23, 59, 60)"
        );
    }

    #[test]
    fn test_month_echoes() {
        let mut ctx = EvalContext::new();
        assert_eq!(
            current_month_echo(&mut ctx, 0, 0, 0),
            "elext:currentMonth(0, 0, 0)"
        );
        assert_eq!(
            current_month_with_offset_echo(&mut ctx, 3, 4, 5, 6),
            "elext:currentMonth(3, 4, 5, 6)"
        );
        assert_eq!(last_month_echo(&mut ctx, -1, 0, 0), "elext:lastMonth(-1, 0, 0)");
        assert_eq!(
            last_month_with_offset_echo(&mut ctx, 1, 2, 3, 4),
            "elext:lastMonth(1, 2, 3, 4)"
        );
    }

    #[test]
    fn test_year_echoes() {
        let mut ctx = EvalContext::new();
        assert_eq!(
            current_year_echo(&mut ctx, 2, 3, 4, 5),
            "elext:currentYear(2, 3, 4, 5)"
        );
        assert_eq!(
            current_year_with_offset_echo(&mut ctx, 2, 3, 4, 5, 6),
            "elext:currentYear(2, 3, 4, 5, 6)"
        );
        assert_eq!(last_year_echo(&mut ctx, 0, 0, 0, 0), "elext:lastYear(0, 0, 0, 0)");
        assert_eq!(
            last_year_with_offset_echo(&mut ctx, 11, 30, 0, 0, -5),
            "elext:lastYear(11, 30, 0, 0, -5)"
        );
    }

    #[test]
    fn test_echo_does_not_validate_ranges() {
        let mut ctx = EvalContext::new();
        assert_eq!(today_echo(&mut ctx, 99, -99), "elext:today(99, -99)");
    }

    #[test]
    fn test_data_in_echo_registered() {
        let mut ctx = EvalContext::new();
        ctx.register_data_in("logs");
        assert_eq!(
            data_in_echo(&ctx, "logs", "region=us").unwrap(),
            "elext:dataIn('logs', 'region=us')"
        );
        assert!(!ctx.wrap_required());
    }

    #[test]
    fn test_data_in_echo_unregistered_fails() {
        let ctx = EvalContext::new();
        let err = data_in_echo(&ctx, "ghost", "p").unwrap_err();
        assert_eq!(err, OffsetError::InvalidDataIn("ghost".to_string()));
        assert_eq!(err.to_string(), "data_in_name ghost is not valid");
    }
}
