//! # offset-engine
//!
//! Relative-time resolution for scheduled coordinator actions.
//!
//! A coordinator action runs at a nominal time and consumes instances of
//! periodic datasets. Expressions such as `yesterday(6, 0)` or
//! `lastMonth(0, 0, 0)` name a dataset instance relative to that nominal
//! time. This crate turns such references into a signed instance offset and
//! then into the instance's value. Calendar arithmetic is done
//! deterministically in the dataset's timezone.
//!
//! Evaluation happens in two passes. The first pass runs before a nominal
//! time exists and renders placeholders ([`echo`]). The second pass resolves
//! them ([`functions`]).
//!
//! ## Modules
//!
//! - [`echo`] - First-pass placeholders and the wrap flag
//! - [`resolver`] - Truncate, shift and count instances: the offset core
//! - [`truncate`] - Truncation boundaries and their reset cascade
//! - [`calendar`] - Calendar-normalizing field arithmetic in a timezone
//! - [`current`] - `coord:current(n)` expressions and their evaluation
//! - [`functions`] - The named relative-time functions
//! - [`data_in`] - Partitioned data-input locations
//! - [`registry`] - Dispatch of parsed calls by function name
//! - [`args`] - Parsing of single call strings
//! - [`context`] - Per-evaluation variable bindings
//! - [`coordinator`] - The collaborator seam to the coordination engine
//! - [`dataset`] - Reference instance index for fixed-frequency datasets
//! - [`config`] - Serializable dataset definitions
//! - [`error`] - Error types

pub mod args;
pub mod calendar;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod current;
pub mod data_in;
pub mod dataset;
pub mod echo;
pub mod error;
pub mod functions;
pub mod registry;
pub mod resolver;
pub mod truncate;

pub use args::{parse_call, parse_single_int_arg, Arg, Call};
pub use config::DatasetConfig;
pub use context::EvalContext;
pub use coordinator::{Coordinator, DatasetInstance};
pub use current::{evaluate_current, instance_expression, resolve_instance_expression};
pub use data_in::{data_in, map_partition};
pub use dataset::{ActionContext, Frequency, PeriodicDataset};
pub use error::{OffsetError, Result};
pub use functions::RelativeRef;
pub use registry::{echo_call, instance_call, resolve_call};
pub use resolver::{reference_time, resolve_offset, resolve_offset_by_code, FieldDelta};
pub use truncate::{CalendarField, TruncationLevel};
