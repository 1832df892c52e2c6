//! Sectoral Core: domain types, market data providers, sector universe, indicators.
//!
//! This crate holds everything that does not depend on how a run is wired:
//! - Domain types (bars, price histories, dated series)
//! - Data providers (Yahoo Finance, CSV directory, in-memory) and canonicalization
//! - The sector universe and its TOML form
//! - Per-instrument indicators and the statistics behind them

pub mod data;
pub mod domain;
pub mod indicators;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types can cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceHistory>();
        require_sync::<domain::PriceHistory>();
        require_send::<domain::DatedSeries>();
        require_sync::<domain::DatedSeries>();

        require_send::<data::Universe>();
        require_sync::<data::Universe>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::CsvProvider>();
        require_sync::<data::CsvProvider>();

        require_send::<indicators::Sma>();
        require_sync::<indicators::Sma>();
        require_send::<indicators::RollingVolatility>();
        require_sync::<indicators::RollingVolatility>();
    }

    /// Every indicator is usable as a trait object.
    #[test]
    fn indicators_are_object_safe() {
        let all: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::DailyReturn),
            Box::new(indicators::CumulativeReturn),
            Box::new(indicators::RollingVolatility::new(30)),
            Box::new(indicators::Sma::new(20)),
        ];
        let names: Vec<&str> = all.iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec!["daily_return", "cumulative_return", "volatility_30d", "ma_20"]
        );
    }
}
