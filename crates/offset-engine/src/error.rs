//! Error types for offset-engine operations.
//!
//! Only faults live here. "No instance available yet" is not an error: the
//! resolver reports it as `Ok(None)` and the string-valued operations as an
//! empty string.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    #[error("data_in_name {0} is not valid")]
    InvalidDataIn(String),

    #[error("There are unresolved instances in {0}")]
    UnresolvedInstances(String),

    #[error("Truncation boundary {0} is not supported")]
    UnsupportedTruncation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Datetime out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
}

pub type Result<T> = std::result::Result<T, OffsetError>;
