//! History source trait definitions.

use crate::error::DataError;
use crate::types::OhlcvSeries;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for daily price history providers.
///
/// This is the only place the engine's callers may suspend: indicators
/// themselves never perform I/O.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch daily history.
    ///
    /// # Arguments
    /// * `ticker` - The ticker to fetch
    /// * `start` - First date to include (open when `None`)
    /// * `end` - Last date to include (open when `None`)
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn daily_history(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<OhlcvSeries, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
