//! Simple and compounded returns.

use super::Indicator;
use crate::domain::Bar;

/// Percent change between consecutive values.
///
/// The first row has no predecessor and is `None`; so is any row whose
/// previous value is zero or either value is non-finite.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    for w in values.windows(2) {
        let (prev, curr) = (w[0], w[1]);
        if prev.is_finite() && curr.is_finite() && prev != 0.0 {
            out.push(Some(curr / prev - 1.0));
        } else {
            out.push(None);
        }
    }
    out
}

/// Compounded return from a column of simple returns: `prod(1 + r) - 1`.
///
/// Undefined rows stay undefined but do not reset the running product, so
/// each defined row satisfies `cum[t] = (1 + cum[prev]) * (1 + r[t]) - 1`
/// where `prev` is the previous defined row.
pub fn cumulative_return(returns: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut growth = 1.0;
    returns
        .iter()
        .map(|r| {
            r.map(|r| {
                growth *= 1.0 + r;
                growth - 1.0
            })
        })
        .collect()
}

/// Daily percent change of the close.
#[derive(Debug, Clone, Default)]
pub struct DailyReturn;

impl DailyReturn {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for DailyReturn {
    fn name(&self) -> &str {
        "daily_return"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        pct_change(&closes)
    }
}

/// Compounded return since the first bar.
#[derive(Debug, Clone, Default)]
pub struct CumulativeReturn;

impl CumulativeReturn {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for CumulativeReturn {
    fn name(&self) -> &str {
        "cumulative_return"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        cumulative_return(&DailyReturn.compute(bars))
    }
}
