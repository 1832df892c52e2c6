//! Rolling annualized volatility of daily close-to-close returns.
//!
//! Lookback: `window` bars (the first return needs a previous close, so the
//! first full window of returns ends at index `window`).

use super::returns::pct_change;
use super::rolling::rolling_std;
use super::stats::annualize_volatility;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct RollingVolatility {
    window: usize,
    name: String,
}

impl RollingVolatility {
    pub fn new(window: usize) -> Self {
        assert!(window >= 2, "volatility window must be >= 2");
        Self {
            window,
            name: format!("volatility_{window}d"),
        }
    }

    /// Annualized rolling volatility of an already computed return column.
    pub fn over_returns(&self, returns: &[Option<f64>]) -> Vec<Option<f64>> {
        rolling_std(returns, self.window)
            .into_iter()
            .map(|s| s.map(annualize_volatility))
            .collect()
    }
}

impl Indicator for RollingVolatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        self.over_returns(&pct_change(&closes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, stats::sample_std};

    #[test]
    fn first_value_after_full_window_of_returns() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i % 3) as f64).collect();
        let bars = make_bars(&closes);
        let vol = RollingVolatility::new(30).compute(&bars);
        assert_eq!(vol.len(), 40);
        assert!(vol[..30].iter().all(|v| v.is_none()));
        assert!(vol[30].is_some());
    }

    #[test]
    fn value_is_annualized_sample_std() {
        let bars = make_bars(&[100.0, 101.0, 99.0, 102.0]);
        let vol = RollingVolatility::new(3).compute(&bars);
        let r = [0.01, 99.0 / 101.0 - 1.0, 102.0 / 99.0 - 1.0];
        let expected = sample_std(&r).unwrap() * 252.0_f64.sqrt();
        assert_approx(vol[3], expected, 1e-12);
    }

    #[test]
    fn constant_prices_have_zero_volatility() {
        let bars = make_bars(&[50.0; 10]);
        let vol = RollingVolatility::new(5).compute(&bars);
        assert_approx(vol[9], 0.0, 1e-15);
    }

    #[test]
    fn name_follows_window() {
        assert_eq!(RollingVolatility::new(30).name(), "volatility_30d");
    }
}
