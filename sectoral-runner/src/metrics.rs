//! Per-instrument metrics: pure functions from a price history to a table.
//!
//! Every row carries its bar plus the derived columns. Undefined values
//! (warmup rows, missing predecessors) are `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sectoral_core::domain::{DatedSeries, PriceHistory};
use sectoral_core::indicators::{
    CumulativeReturn, DailyReturn, Indicator, RollingVolatility, Sma,
};

/// Rolling volatility window in trading days.
pub const VOLATILITY_WINDOW: usize = 30;
/// Short moving average period.
pub const MA_SHORT: usize = 20;
/// Long moving average period.
pub const MA_LONG: usize = 50;

/// One bar with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub daily_return: Option<f64>,
    pub cumulative_return: Option<f64>,
    pub volatility_30d: Option<f64>,
    pub ma_20: Option<f64>,
    pub ma_50: Option<f64>,
}

/// Metrics table for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMetrics {
    pub symbol: String,
    pub rows: Vec<MetricRow>,
}

impl InstrumentMetrics {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The daily return column keyed by date.
    pub fn daily_returns(&self) -> DatedSeries {
        DatedSeries::new(
            self.rows.iter().map(|r| r.date).collect(),
            self.rows.iter().map(|r| r.daily_return).collect(),
        )
    }
}

/// Compute every derived column for one instrument.
pub fn compute_instrument_metrics(history: &PriceHistory) -> InstrumentMetrics {
    let bars = &history.bars;

    let daily = DailyReturn.compute(bars);
    let cumulative = CumulativeReturn.compute(bars);
    let volatility = RollingVolatility::new(VOLATILITY_WINDOW).over_returns(&daily);
    let ma_short = Sma::new(MA_SHORT).compute(bars);
    let ma_long = Sma::new(MA_LONG).compute(bars);

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| MetricRow {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            daily_return: daily[i],
            cumulative_return: cumulative[i],
            volatility_30d: volatility[i],
            ma_20: ma_short[i],
            ma_50: ma_long[i],
        })
        .collect();

    InstrumentMetrics {
        symbol: history.symbol.clone(),
        rows,
    }
}

/// Compute metrics for every history, preserving order.
pub fn compute_all(histories: &[PriceHistory]) -> Vec<InstrumentMetrics> {
    histories.iter().map(compute_instrument_metrics).collect()
}
