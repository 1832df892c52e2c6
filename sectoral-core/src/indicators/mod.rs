//! Per-instrument indicators and the statistics behind them.
//!
//! Every indicator implements [`Indicator`]: a pure function from a bar
//! series to a column of the same length. Leading warmup rows are `None`
//! and undefined values propagate as `None`; nothing here returns NaN.
//!
//! The free functions in [`returns`], [`rolling`] and [`stats`] work on plain
//! columns so sector-level series (which have no bars) reuse the same math.

pub mod returns;
pub mod rolling;
pub mod sma;
pub mod stats;
pub mod volatility;

pub use returns::{CumulativeReturn, DailyReturn};
pub use sma::Sma;
pub use volatility::RollingVolatility;

use crate::domain::Bar;

/// Trading days used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// A column computed from a bar series.
///
/// # Contract
/// `compute` returns exactly one value per bar. The first `lookback()` values
/// are `None`. No value at bar t may depend on bars after t.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "ma_20", "volatility_30d").
    fn name(&self) -> &str;

    /// Number of leading bars that can never produce a value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for first bar), high/low bracket open and
/// close by 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
                adj_close: close,
            }
        })
        .collect()
}

/// Assert an optional value is defined and approximately equal to `expected`.
#[cfg(test)]
pub fn assert_approx(actual: Option<f64>, expected: f64, epsilon: f64) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got None"));
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
