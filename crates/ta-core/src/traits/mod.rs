//! Core traits for the indicator engine.

mod data_source;
mod indicator;

pub use data_source::HistorySource;
pub use indicator::{check_window, Indicator};
