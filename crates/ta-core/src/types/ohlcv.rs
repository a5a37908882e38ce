//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// One trading day of price history.
///
/// Prices are `f64` for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl OhlcvRecord {
    /// Create a new record.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Trading day.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Opening price.
    #[inline]
    pub fn open(&self) -> f64 {
        self.open
    }

    /// Highest price.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Lowest price.
    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Closing price.
    #[inline]
    pub fn close(&self) -> f64 {
        self.close
    }

    /// Traded volume.
    #[inline]
    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Calculate the day's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check that prices are finite, positive and consistent with the range.
    pub fn check(&self) -> Result<(), SeriesError> {
        let malformed = |reason: &str| SeriesError::MalformedRecord {
            date: self.date,
            reason: reason.to_string(),
        };

        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(malformed("prices must be finite"));
        }
        if prices.iter().any(|&p| p <= 0.0) {
            return Err(malformed("prices must be positive"));
        }
        if self.low > self.high {
            return Err(malformed("low is above high"));
        }
        let within = |p: f64| self.low <= p && p <= self.high;
        if !within(self.open) || !within(self.close) {
            return Err(malformed("open and close must lie within [low, high]"));
        }
        Ok(())
    }
}

/// Daily price history for one ticker, oldest first.
///
/// The series is a plain container: ordering and record sanity are checked
/// by [`OhlcvSeries::validate`], which the engine runs before computing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcvSeries {
    /// Ticker symbol
    pub ticker: String,
    records: Vec<OhlcvRecord>,
}

impl OhlcvSeries {
    /// Create a new empty series.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            records: Vec::new(),
        }
    }

    /// Create a series from existing records.
    pub fn from_records(ticker: impl Into<String>, records: Vec<OhlcvRecord>) -> Self {
        Self {
            ticker: ticker.into(),
            records,
        }
    }

    /// Push a new record.
    pub fn push(&mut self, record: OhlcvRecord) {
        self.records.push(record);
    }

    /// Push multiple records.
    pub fn extend(&mut self, records: impl IntoIterator<Item = OhlcvRecord>) {
        self.records.extend(records);
    }

    /// Get the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get all records as a slice.
    pub fn records(&self) -> &[OhlcvRecord] {
        &self.records
    }

    /// Get a record by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&OhlcvRecord> {
        self.records.get(index)
    }

    /// Get the first record.
    pub fn first(&self) -> Option<&OhlcvRecord> {
        self.records.first()
    }

    /// Get the last record.
    pub fn last(&self) -> Option<&OhlcvRecord> {
        self.records.last()
    }

    /// Keep only records dated within `[start, end]`; either bound may be open.
    pub fn retain_between(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.records.retain(|r| {
            start.map_or(true, |s| r.date >= s) && end.map_or(true, |e| r.date <= e)
        });
    }

    /// Check the input contract: non-empty, strictly increasing dates,
    /// well-formed records.
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.records.is_empty() {
            return Err(SeriesError::Empty);
        }

        for record in &self.records {
            record.check()?;
        }

        for (i, pair) in self.records.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    index: i + 1,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }

        Ok(())
    }

    /// Extract dates as a vector.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    /// Extract open prices as a vector.
    pub fn opens(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.open).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.volume).collect()
    }

    /// Get an iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &OhlcvRecord> {
        self.records.iter()
    }
}

impl FromIterator<OhlcvRecord> for OhlcvSeries {
    fn from_iter<T: IntoIterator<Item = OhlcvRecord>>(iter: T) -> Self {
        Self {
            ticker: String::new(),
            records: iter.into_iter().collect(),
        }
    }
}
