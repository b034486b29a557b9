//! Serializable dataset definitions.
//!
//! ```json
//! {
//!   "initial_instance": "2020-01-01T00:00:00Z",
//!   "frequency": { "unit": "days", "value": 1 },
//!   "timezone": "America/Los_Angeles"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calendar::{parse_rfc3339, parse_timezone};
use crate::dataset::{Frequency, PeriodicDataset};
use crate::error::{OffsetError, Result};

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Dataset definition as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// RFC 3339 timestamp of the first instance.
    pub initial_instance: String,
    pub frequency: Frequency,
    /// IANA timezone name; defaults to `UTC`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl DatasetConfig {
    /// Parse a dataset definition from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| OffsetError::InvalidArgument(format!("dataset definition: {e}")))
    }

    /// Validate the definition into a [`PeriodicDataset`].
    ///
    /// # Errors
    ///
    /// Returns [`OffsetError::InvalidDatetime`], [`OffsetError::InvalidTimezone`]
    /// or [`OffsetError::InvalidFrequency`] for the corresponding bad field.
    pub fn build(&self) -> Result<PeriodicDataset> {
        let initial = parse_rfc3339(&self.initial_instance)?;
        let tz = parse_timezone(&self.timezone)?;
        PeriodicDataset::new(initial, self.frequency, tz)
    }
}
