//! Indicator result bundle and its text report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ta_core::{
    IndicatorError, IndicatorKind, IndicatorOutput, IndicatorSeries, InsufficientData,
    OhlcvSeries,
};

/// Everything one engine call produced.
///
/// `indicators` holds one entry per indicator that computed, each series
/// aligned with the input dates. Indicators rejected for their parameters
/// appear only in `errors`; a moving average with some rejected windows
/// appears in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    /// Ticker of the input series
    pub ticker: String,
    /// Number of input points
    pub length: usize,
    /// First input date
    pub start: Option<NaiveDate>,
    /// Last input date
    pub end: Option<NaiveDate>,
    /// Computed outputs
    pub indicators: BTreeMap<IndicatorKind, IndicatorOutput>,
    /// Parameter and calculation errors
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<IndicatorKind, Vec<IndicatorError>>,
    /// Indicators computed on less data than their warm-up
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: BTreeMap<IndicatorKind, InsufficientData>,
}

impl IndicatorBundle {
    /// Empty bundle describing `series`.
    pub fn new(series: &OhlcvSeries) -> Self {
        Self {
            ticker: series.ticker.clone(),
            length: series.len(),
            start: series.first().map(|r| r.date()),
            end: series.last().map(|r| r.date()),
            indicators: BTreeMap::new(),
            errors: BTreeMap::new(),
            warnings: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kind: IndicatorKind, output: IndicatorOutput) {
        self.indicators.insert(kind, output);
    }

    pub fn push_error(&mut self, kind: IndicatorKind, error: IndicatorError) {
        self.errors.entry(kind).or_default().push(error);
    }

    pub fn push_warning(&mut self, kind: IndicatorKind, warning: InsufficientData) {
        self.warnings.insert(kind, warning);
    }

    /// Output of one indicator.
    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorOutput> {
        self.indicators.get(&kind)
    }

    /// One named series of one indicator.
    pub fn series(&self, kind: IndicatorKind, name: &str) -> Option<&IndicatorSeries> {
        self.indicators.get(&kind)?.get(name)
    }

    /// True when no indicator reported an error.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Generate a text summary.
    ///
    /// Shows the latest defined value of every series.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     INDICATOR REPORT                       \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("SERIES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Ticker:              {}\n", self.ticker));
        s.push_str(&format!("  Data Points:         {}\n", self.length));
        if let (Some(start), Some(end)) = (self.start, self.end) {
            s.push_str(&format!("  Date Range:          {} to {}\n", start, end));
        }
        s.push('\n');

        for (kind, output) in &self.indicators {
            s.push_str(&format!("{}\n", kind.title().to_uppercase()));
            s.push_str("───────────────────────────────────────────────────────────\n");
            for (name, series) in output {
                let latest = match series.last_defined() {
                    Some(point) => format!(
                        "{:>12.4}  ({})",
                        point.value.unwrap_or(f64::NAN),
                        point.date
                    ),
                    None => format!("{:>12}", "n/a"),
                };
                s.push_str(&format!(
                    "  {:<20} {}  [{} of {} defined]\n",
                    format!("{}:", name),
                    latest,
                    series.defined_count(),
                    series.len()
                ));
            }
            s.push('\n');
        }

        if !self.warnings.is_empty() {
            s.push_str("WARNINGS\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for (kind, warning) in &self.warnings {
                s.push_str(&format!("  {}: {}\n", kind, warning));
            }
            s.push('\n');
        }

        if !self.errors.is_empty() {
            s.push_str("ERRORS\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for (kind, errors) in &self.errors {
                for error in errors {
                    s.push_str(&format!("  {}: {}\n", kind, error));
                }
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
