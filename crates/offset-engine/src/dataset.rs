//! Reference instance index for synchronous (fixed-frequency) datasets.
//!
//! A dataset produces one instance every `frequency`, starting at its initial
//! instance. Minute and hour frequencies step in elapsed time. Day and month
//! frequencies step on the dataset's calendar and keep the initial instance's
//! wall-clock time, so a daily dataset at local midnight stays at local
//! midnight across DST transitions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::{format_instance_time, localize};
use crate::coordinator::{Coordinator, DatasetInstance};
use crate::error::{OffsetError, Result};

/// How often a dataset produces an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Frequency {
    Minutes(u32),
    Hours(u32),
    Days(u32),
    Months(u32),
}

impl Frequency {
    fn value(self) -> u32 {
        match self {
            Frequency::Minutes(n)
            | Frequency::Hours(n)
            | Frequency::Days(n)
            | Frequency::Months(n) => n,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Minutes(n) => write!(f, "{n}min"),
            Frequency::Hours(n) => write!(f, "{n}h"),
            Frequency::Days(n) => write!(f, "{n}d"),
            Frequency::Months(n) => write!(f, "{n}mon"),
        }
    }
}

/// Parses `<n><unit>` where unit is `min`, `h`, `d` or `mon` (e.g. `15min`, `1d`).
impl FromStr for Frequency {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| OffsetError::InvalidFrequency(format!("missing unit in '{s}'")))?;
        let (digits, unit) = s.split_at(split);
        let n: u32 = digits
            .parse()
            .map_err(|_| OffsetError::InvalidFrequency(format!("invalid number in '{s}'")))?;

        let freq = match unit {
            "min" | "mins" | "minutes" => Frequency::Minutes(n),
            "h" | "hours" => Frequency::Hours(n),
            "d" | "days" => Frequency::Days(n),
            "mon" | "months" => Frequency::Months(n),
            _ => {
                return Err(OffsetError::InvalidFrequency(format!(
                    "unknown unit '{unit}' in '{s}'"
                )))
            }
        };
        if n == 0 {
            return Err(OffsetError::InvalidFrequency(format!(
                "frequency must be positive: '{s}'"
            )));
        }
        Ok(freq)
    }
}

/// A fixed-frequency dataset anchored at its initial instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicDataset {
    initial: DateTime<Utc>,
    frequency: Frequency,
    timezone: Tz,
}

impl PeriodicDataset {
    /// # Errors
    ///
    /// Returns [`OffsetError::InvalidFrequency`] for a zero frequency.
    pub fn new(initial: DateTime<Utc>, frequency: Frequency, timezone: Tz) -> Result<Self> {
        if frequency.value() == 0 {
            return Err(OffsetError::InvalidFrequency(format!(
                "frequency must be positive: {frequency}"
            )));
        }
        Ok(Self {
            initial,
            frequency,
            timezone,
        })
    }

    pub fn initial_instance(&self) -> DateTime<Utc> {
        self.initial
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The instance with the given sequence number, if it exists and is
    /// representable. Negative sequences precede the dataset.
    pub fn instance_at(&self, sequence: i64) -> Option<DateTime<Utc>> {
        if sequence < 0 {
            return None;
        }
        let steps = sequence.checked_mul(self.frequency.value() as i64)?;
        match self.frequency {
            Frequency::Minutes(_) => self
                .initial
                .checked_add_signed(chrono::Duration::try_minutes(steps)?),
            Frequency::Hours(_) => self
                .initial
                .checked_add_signed(chrono::Duration::try_hours(steps)?),
            Frequency::Days(_) => {
                let local = self.initial.with_timezone(&self.timezone);
                let date = local
                    .date_naive()
                    .checked_add_signed(chrono::Duration::try_days(steps)?)?;
                localize(&self.timezone, date.and_time(local.time())).map(|dt| dt.to_utc())
            }
            Frequency::Months(_) => {
                let local = self.initial.with_timezone(&self.timezone);
                let months = u32::try_from(steps).ok()?;
                let date = local.date_naive().checked_add_months(Months::new(months))?;
                localize(&self.timezone, date.and_time(local.time())).map(|dt| dt.to_utc())
            }
        }
    }

    /// The latest instance at or before `at`, or `None` before the initial instance.
    pub fn covering_instance(&self, at: DateTime<Utc>) -> Option<DatasetInstance> {
        if at < self.initial {
            return None;
        }

        let n = self.frequency.value() as i64;
        let estimate = match self.frequency {
            Frequency::Minutes(_) => (at - self.initial).num_minutes() / n,
            Frequency::Hours(_) => (at - self.initial).num_minutes() / (60 * n),
            Frequency::Days(_) => {
                let from = self.initial.with_timezone(&self.timezone).date_naive();
                let to = at.with_timezone(&self.timezone).date_naive();
                (to - from).num_days() / n
            }
            Frequency::Months(_) => {
                let from = self.initial.with_timezone(&self.timezone);
                let to = at.with_timezone(&self.timezone);
                (month_index(&to) - month_index(&from)) / n
            }
        };

        // Calendar steps keep the initial wall-clock time, so the estimate can
        // overshoot by one instance on the day or month `at` falls in.
        let mut sequence = estimate.max(0);
        loop {
            let instance = self.instance_at(sequence)?;
            if instance <= at {
                return Some(DatasetInstance {
                    at: instance,
                    sequence,
                });
            }
            if sequence == 0 {
                return None;
            }
            sequence -= 1;
        }
    }
}

fn month_index<T: Datelike>(d: &T) -> i64 {
    d.year() as i64 * 12 + d.month0() as i64
}

/// A coordinator action bound to one input dataset.
#[derive(Debug, Clone)]
pub struct ActionContext {
    dataset: PeriodicDataset,
    nominal_time: Option<DateTime<Utc>>,
}

impl ActionContext {
    pub fn new(dataset: PeriodicDataset, nominal_time: Option<DateTime<Utc>>) -> Self {
        Self {
            dataset,
            nominal_time,
        }
    }

    pub fn dataset(&self) -> &PeriodicDataset {
        &self.dataset
    }
}

impl Coordinator for ActionContext {
    fn nominal_time(&self) -> Option<DateTime<Utc>> {
        self.nominal_time
    }

    fn dataset_timezone(&self) -> Tz {
        self.dataset.timezone()
    }

    fn covering_instance(&self, at: DateTime<Utc>) -> Option<DatasetInstance> {
        self.dataset.covering_instance(at)
    }

    /// The instance `n` steps from the one covering the nominal time, printed
    /// as `YYYY-MM-DDTHH:MMZ`. Empty when that instance precedes the dataset.
    fn current(&self, n: i64) -> Result<String> {
        let Some(nominal) = self.nominal_time else {
            return Ok(String::new());
        };
        let Some(base) = self.dataset.covering_instance(nominal) else {
            return Ok(String::new());
        };
        let target = base.sequence.checked_add(n).ok_or_else(|| {
            OffsetError::OutOfRange(format!("instance {} + {}", base.sequence, n))
        })?;
        Ok(self
            .dataset
            .instance_at(target)
            .map(|at| format_instance_time(&at))
            .unwrap_or_default())
    }
}
