//! Date-aligned indicator output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One output position: `value` is `None` during warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A derived series aligned 1:1 with the input dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Pair each input date with its computed value.
    pub fn from_values(dates: &[NaiveDate], values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(dates.len(), values.len(), "indicator output must align with input");
        let points = dates
            .iter()
            .zip(values)
            .map(|(&date, value)| IndicatorPoint { date, value })
            .collect();
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    /// Value at `index`; `None` when out of range or undefined.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    /// All values in date order.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.points.iter().position(|p| p.value.is_some())
    }

    /// Number of defined values.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Most recent defined point.
    pub fn last_defined(&self) -> Option<IndicatorPoint> {
        self.points.iter().rev().find(|p| p.value.is_some()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorPoint> {
        self.points.iter()
    }
}

/// Named series produced by one indicator (e.g. `upper`, `middle`, `lower`).
pub type IndicatorOutput = BTreeMap<String, IndicatorSeries>;
