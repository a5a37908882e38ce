//! Core data types for the indicator engine.

mod indicator_series;
mod kind;
mod ohlcv;

pub use indicator_series::{IndicatorOutput, IndicatorPoint, IndicatorSeries};
pub use kind::IndicatorKind;
pub use ohlcv::{OhlcvRecord, OhlcvSeries};
