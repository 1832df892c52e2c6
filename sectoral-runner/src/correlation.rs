//! Cross-sector correlation of daily returns.

use serde::{Deserialize, Serialize};

use sectoral_core::data::align_union;
use sectoral_core::domain::DatedSeries;
use sectoral_core::indicators::stats::pearson_pairwise;

use crate::sector::SectorAggregate;

/// Square, symmetric correlation table labelled by sector name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// `values[i][j]`; the diagonal is 1.0, undefined pairs are `None`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Off-diagonal pairs `(i, j)` with `i < j`, in row-major order.
    pub fn upper_pairs(&self) -> impl Iterator<Item = (usize, usize, Option<f64>)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.values[i][j])))
    }
}

/// Pairwise-complete Pearson correlation between every pair of sectors.
pub fn correlation_matrix(aggregates: &[SectorAggregate]) -> CorrelationMatrix {
    let n = aggregates.len();
    let series: Vec<&DatedSeries> = aggregates.iter().map(|a| &a.daily_returns).collect();
    let aligned = align_union(&series);

    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson_pairwise(&aligned.columns[i], &aligned.columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: aggregates.iter().map(|a| a.name.clone()).collect(),
        values,
    }
}
