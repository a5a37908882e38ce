//! Daily price history sources.

mod csv_source;

pub use csv_source::{parse_date, read_series, CsvDataSource};

use chrono::NaiveDate;
use std::path::Path;
use ta_core::error::DataError;
use ta_core::traits::HistorySource;
use ta_core::types::OhlcvSeries;

/// Load a daily series from a CSV file.
pub async fn load_csv(
    path: impl AsRef<Path>,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<OhlcvSeries, DataError> {
    let source = CsvDataSource::new(path)?;
    source.daily_history(ticker, start, end).await
}
