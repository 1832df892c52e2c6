//! Dated series: a date-indexed column of optional values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A column of values indexed by strictly ascending dates.
///
/// `None` marks an undefined observation (warmup rows, missing constituents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatedSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl DatedSeries {
    /// Build a series from parallel date/value columns.
    ///
    /// Panics if the columns differ in length.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Self {
        assert_eq!(
            dates.len(),
            values.len(),
            "dated series columns must have equal length"
        );
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Value at `date`, flattening "date missing" and "value undefined".
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .and_then(|i| self.values[i])
    }

    /// Last value of the series (which may itself be undefined).
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// Only the defined observations, in date order.
    pub fn defined(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
