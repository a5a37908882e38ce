//! Indicator trait definitions.

use crate::error::{IndicatorError, InsufficientData};
use crate::types::{IndicatorKind, IndicatorOutput, OhlcvSeries};

/// Trait for technical indicators computed over a whole price history.
///
/// Implementations are pure: `calculate` reads the series and returns newly
/// allocated output, with one entry per input date in every named series.
pub trait Indicator: Send + Sync {
    /// Which indicator this is.
    fn kind(&self) -> IndicatorKind;

    /// Number of input points needed before every output series is defined.
    fn warm_up(&self) -> usize;

    /// Check the parameters against a series of `available` points.
    fn validate(&self, available: usize) -> Result<(), IndicatorError>;

    /// Calculate the named output series.
    ///
    /// # Arguments
    /// * `series` - Validated, date-ordered price history
    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput;

    /// Report when the series is too short for a full warm-up.
    fn check_warm_up(&self, available: usize) -> Result<(), InsufficientData> {
        if available < self.warm_up() {
            return Err(InsufficientData {
                required: self.warm_up(),
                available,
            });
        }
        Ok(())
    }
}

/// Check a single window or period parameter.
pub fn check_window(name: &str, window: usize, available: usize) -> Result<(), IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::invalid(format!(
            "{} must be greater than 0",
            name
        )));
    }
    if window > available {
        return Err(IndicatorError::invalid(format!(
            "{} {} exceeds series length {}",
            name, window, available
        )));
    }
    Ok(())
}
