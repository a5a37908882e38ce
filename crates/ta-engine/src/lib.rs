//! Indicator engine: runs the configured calculators over one series and
//! collects their outputs into a bundle.

mod bundle;
mod config;
mod engine;

pub use bundle::IndicatorBundle;
pub use config::EngineConfig;
pub use engine::{EngineError, IndicatorEngine};
