//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use ta_core::error::DataError;
use ta_core::traits::HistorySource;
use ta_core::types::{OhlcvRecord, OhlcvSeries};
use tracing::{debug, info};

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "DATE", alias = "Datetime")]
    date: String,
    #[serde(alias = "Open", alias = "OPEN")]
    open: f64,
    #[serde(alias = "High", alias = "HIGH")]
    high: f64,
    #[serde(alias = "Low", alias = "LOW")]
    low: f64,
    #[serde(alias = "Close", alias = "CLOSE", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", alias = "adj_close", alias = "Adj_Close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "VOLUME", default)]
    volume: Option<f64>,
}

impl CsvRecord {
    fn into_record(self) -> Result<OhlcvRecord, DataError> {
        let date = parse_date(&self.date)?;

        let close = self.close.or(self.adj_close).ok_or_else(|| {
            DataError::ParseError(format!("Missing close price on {}", date))
        })?;

        let volume = self.volume.unwrap_or(0.0);
        if !volume.is_finite() || volume < 0.0 {
            return Err(DataError::ParseError(format!(
                "Invalid volume on {}: {}",
                date, volume
            )));
        }

        Ok(OhlcvRecord::new(
            date,
            self.open,
            self.high,
            self.low,
            close,
            volume.round() as u64,
        ))
    }
}

/// Parse a daily date in any accepted layout.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let date_str = date_str.trim();

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, DATETIME_FORMAT) {
        return Ok(dt.date());
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

/// Read a daily series from CSV text.
///
/// Rows are sorted by date. Duplicate dates are kept so that series
/// validation reports them.
pub fn read_series<R: Read>(reader: R, ticker: &str) -> Result<OhlcvSeries, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        records.push(row.into_record()?);
    }

    // Sort by date
    records.sort_by_key(|r| r.date());

    Ok(OhlcvSeries::from_records(ticker, records))
}

/// CSV data source for daily history.
///
/// One file holds one ticker's history.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistorySource for CsvDataSource {
    async fn daily_history(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<OhlcvSeries, DataError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let mut series = read_series(bytes.as_slice(), ticker)?;
        debug!("Read {} rows from {}", series.len(), self.path.display());

        series.retain_between(start, end);
        if series.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        info!(
            "Loaded {} daily records for {} from {}",
            series.len(),
            ticker,
            self.path.display()
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
