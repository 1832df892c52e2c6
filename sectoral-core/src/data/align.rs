//! Multi-series time alignment.
//!
//! Given dated series for several instruments or sectors, align them to a
//! common timeline. Dates missing from a series become `None`; nothing is
//! forward-filled.

use crate::domain::DatedSeries;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Series aligned on a common date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    /// Union of all input dates, sorted ascending.
    pub dates: Vec<NaiveDate>,
    /// One column per input series, in input order. Each has `dates.len()` entries.
    pub columns: Vec<Vec<Option<f64>>>,
}

impl AlignedSeries {
    /// Values of every column at row `i`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.columns.iter().map(move |c| c[i])
    }
}

/// Align series on the union of their dates.
pub fn align_union(series: &[&DatedSeries]) -> AlignedSeries {
    let all_dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|s| s.dates.iter().copied())
        .collect();
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

    let columns = series.iter().map(|s| reindex(s, &dates)).collect();

    AlignedSeries { dates, columns }
}

/// Reindex one series onto a sorted date axis that contains all of its dates.
fn reindex(series: &DatedSeries, dates: &[NaiveDate]) -> Vec<Option<f64>> {
    let mut out = vec![None; dates.len()];
    // Both axes are ascending, so a single forward cursor suffices.
    let mut cursor = 0;
    for (date, value) in series.iter() {
        while cursor < dates.len() && dates[cursor] < date {
            cursor += 1;
        }
        if cursor < dates.len() && dates[cursor] == date {
            out[cursor] = value;
        }
    }
    out
}
