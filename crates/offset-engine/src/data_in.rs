//! Partitioned views of a data-input's resolved locations.

use crate::context::EvalContext;
use crate::error::{OffsetError, Result};

/// Append `/<partition>` to every non-blank location in a comma-separated list.
///
/// Blank entries are dropped and order is preserved. An empty list or an
/// empty partition returns `uris` unchanged.
///
/// # Examples
///
/// ```
/// use offset_engine::data_in::map_partition;
///
/// assert_eq!(map_partition("a,b,,c", "p"), "a/p,b/p,c/p");
/// assert_eq!(map_partition("a,b,,c", ""), "a,b,,c");
/// ```
pub fn map_partition(uris: &str, partition: &str) -> String {
    if uris.is_empty() || partition.is_empty() {
        return uris.to_string();
    }
    uris.split(',')
        .filter(|uri| !uri.trim().is_empty())
        .map(|uri| format!("{uri}/{partition}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Partitioned locations of the data-input `name` bound in `ctx`.
///
/// An unbound data-input maps as an empty list.
///
/// # Errors
///
/// Returns [`OffsetError::UnresolvedInstances`] if the binding still contains
/// unresolved instances.
pub fn data_in(ctx: &EvalContext, name: &str, partition: &str) -> Result<String> {
    let uris = ctx.data_in_uris(name).unwrap_or_default();
    if ctx.has_unresolved_instances(name) {
        return Err(OffsetError::UnresolvedInstances(uris.to_string()));
    }
    Ok(map_partition(uris, partition))
}
