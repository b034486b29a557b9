//! Per-evaluation variable bindings.
//!
//! An [`EvalContext`] lives for exactly one evaluation pass. It is created by
//! the caller, threaded through every function that reads or writes it, and
//! dropped when the pass ends. Nothing is shared between passes.

use std::collections::HashMap;

const DATA_IN_MARKER: &str = "data-in";

fn data_name_key(name: &str) -> String {
    format!("oozie.dataname.{name}")
}

fn data_in_key(name: &str) -> String {
    format!(".datain.{name}")
}

fn unresolved_key(name: &str) -> String {
    format!(".datain.{name}.unresolved")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalContext {
    variables: HashMap<String, String>,
    wrap_required: bool,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Declare `name` as a data-input of the action.
    pub fn register_data_in(&mut self, name: &str) {
        self.set_variable(data_name_key(name), DATA_IN_MARKER);
    }

    pub fn is_data_in(&self, name: &str) -> bool {
        self.variable(&data_name_key(name)) == Some(DATA_IN_MARKER)
    }

    /// Bind the resolved, comma-separated locations of a data-input.
    /// `unresolved` marks lists that still contain unresolved instances.
    pub fn bind_data_in(&mut self, name: &str, uris: impl Into<String>, unresolved: bool) {
        self.set_variable(data_in_key(name), uris);
        self.set_variable(unresolved_key(name), unresolved.to_string());
    }

    pub fn data_in_uris(&self, name: &str) -> Option<&str> {
        self.variable(&data_in_key(name))
    }

    pub fn has_unresolved_instances(&self, name: &str) -> bool {
        self.variable(&unresolved_key(name)) == Some("true")
    }

    /// Mark the expression as needing a second resolution pass.
    pub fn require_wrap(&mut self) {
        self.wrap_required = true;
    }

    pub fn wrap_required(&self) -> bool {
        self.wrap_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_in_registration() {
        let mut ctx = EvalContext::new();
        assert!(!ctx.is_data_in("raw"));
        ctx.register_data_in("raw");
        assert!(ctx.is_data_in("raw"));
        assert!(!ctx.is_data_in("other"));
    }

    #[test]
    fn test_data_name_with_other_marker_is_not_data_in() {
        let mut ctx = EvalContext::new();
        ctx.set_variable("oozie.dataname.out", "data-out");
        assert!(!ctx.is_data_in("out"));
    }

    #[test]
    fn test_bind_data_in() {
        let mut ctx = EvalContext::new();
        ctx.bind_data_in("raw", "hdfs://a,hdfs://b", false);
        assert_eq!(ctx.data_in_uris("raw"), Some("hdfs://a,hdfs://b"));
        assert!(!ctx.has_unresolved_instances("raw"));

        ctx.bind_data_in("raw", "hdfs://a", true);
        assert!(ctx.has_unresolved_instances("raw"));
    }

    #[test]
    fn test_wrap_flag() {
        let mut ctx = EvalContext::new();
        assert!(!ctx.wrap_required());
        ctx.require_wrap();
        assert!(ctx.wrap_required());
    }
}
