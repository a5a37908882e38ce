//! Core types and traits for the indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - Price history types (OhlcvRecord, OhlcvSeries)
//! - Indicator output types (IndicatorSeries, IndicatorKind)
//! - Core traits for indicators and history sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DataError, IndicatorError, InsufficientData, SeriesError};
pub use types::*;
pub use traits::*;
