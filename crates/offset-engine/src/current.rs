//! Turning a resolved offset into the coordinator's current-instance value.

use crate::args::parse_single_int_arg;
use crate::coordinator::Coordinator;
use crate::error::Result;

/// Name of the coordinator function addressing instances relative to the
/// nominal instance.
pub const COORD_CURRENT: &str = "coord:current";

/// `coord:current(n)` for a resolved offset, or `""` when unavailable.
pub fn instance_expression(offset: Option<i64>) -> String {
    match offset {
        Some(n) => format!("{COORD_CURRENT}({n})"),
        None => String::new(),
    }
}

/// Evaluate a `coord:current(n)` expression against `coord`.
///
/// An empty expression evaluates to an empty value without touching the
/// coordinator.
///
/// # Errors
///
/// Returns [`crate::OffsetError::InvalidArgument`] if `expr` is not a
/// one-argument call, or whatever the coordinator reports while materializing.
pub fn evaluate_current(coord: &dyn Coordinator, expr: &str) -> Result<String> {
    if expr.is_empty() {
        return Ok(String::new());
    }
    let n = parse_single_int_arg(expr)?;
    coord.current(n)
}

/// [`instance_expression`] followed by [`evaluate_current`].
pub fn resolve_instance_expression(coord: &dyn Coordinator, offset: Option<i64>) -> Result<String> {
    evaluate_current(coord, &instance_expression(offset))
}
