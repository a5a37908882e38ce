//! Error types for the indicator engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input series errors.
///
/// Any of these is fatal for a whole engine call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Series is empty")]
    Empty,

    #[error("Dates not strictly increasing at index {index}: {previous} followed by {current}")]
    OutOfOrder {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Malformed record on {date}: {reason}")]
    MalformedRecord { date: NaiveDate, reason: String },
}

/// Indicator parameter and calculation errors.
///
/// Scoped to a single indicator; the engine records them next to the
/// indicators that did compute.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl IndicatorError {
    /// Shorthand for [`IndicatorError::InvalidParameter`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

/// Non-fatal warning: the series is shorter than an indicator's warm-up.
///
/// The indicator still computes; its output simply stays undefined for
/// longer (or entirely).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("Insufficient data: need {required} points for a full warm-up, have {available}")]
pub struct InsufficientData {
    pub required: usize,
    pub available: usize,
}

/// History source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
