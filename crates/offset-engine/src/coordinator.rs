//! The collaborator seam between the resolver and the coordination engine.
//!
//! The resolver never owns a dataset or a clock. Everything it needs to know
//! about the running action and its dataset comes through [`Coordinator`].

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::Result;

/// One periodic occurrence of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetInstance {
    /// When the instance occurs.
    pub at: DateTime<Utc>,
    /// 0-based ordinal counted from the dataset's initial instance.
    pub sequence: i64,
}

/// Read-only view of a coordinator action and the dataset it consumes.
pub trait Coordinator {
    /// Nominal time of the action, or `None` when the dataset's initial
    /// instance is later than the action (no data can exist yet).
    fn nominal_time(&self) -> Option<DateTime<Utc>>;

    /// Timezone in which the dataset's calendar is read.
    fn dataset_timezone(&self) -> Tz;

    /// The latest dataset instance at or before `at`, if any.
    fn covering_instance(&self, at: DateTime<Utc>) -> Option<DatasetInstance>;

    /// Materialize the value of the instance `n` steps away from the nominal
    /// instance. An empty string means no such instance exists.
    fn current(&self, n: i64) -> Result<String>;
}
