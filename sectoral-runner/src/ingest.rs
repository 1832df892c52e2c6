//! Universe ingestion: fetch every symbol once, keep what arrives.
//!
//! A symbol that errors or canonicalizes to nothing is logged, reported to
//! the progress callback, and skipped. Ingestion itself never fails.

use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{info, warn};

use sectoral_core::data::{canonicalize, DataError, DataProvider, DownloadProgress};
use sectoral_core::domain::PriceHistory;

/// Everything ingestion produced.
#[derive(Debug, Default)]
pub struct IngestedData {
    /// Histories in the order their symbols were requested.
    pub histories: Vec<PriceHistory>,
    /// Symbols that were skipped, with the reason.
    pub failures: Vec<(String, DataError)>,
}

impl IngestedData {
    pub fn get(&self, symbol: &str) -> Option<&PriceHistory> {
        self.histories.iter().find(|h| h.symbol == symbol)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.histories.iter().map(|h| h.symbol.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

/// Fetch and canonicalize each symbol sequentially.
///
/// Duplicate symbols are fetched once, at their first position.
pub fn ingest_universe(
    provider: &dyn DataProvider,
    symbols: &[&str],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn DownloadProgress,
) -> IngestedData {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = symbols.iter().copied().filter(|s| seen.insert(*s)).collect();
    let total = unique.len();

    info!(
        provider = provider.name(),
        symbols = total,
        %start,
        %end,
        "ingesting universe"
    );

    let mut data = IngestedData::default();

    for (i, symbol) in unique.iter().enumerate() {
        progress.on_start(symbol, i, total);

        match fetch_single(provider, symbol, start, end) {
            Ok(history) => {
                progress.on_complete(symbol, i, total, Ok(history.len()));
                data.histories.push(history);
            }
            Err(e) => {
                warn!(%symbol, error = %e, "skipping symbol");
                progress.on_complete(symbol, i, total, Err(&e));
                data.failures.push((symbol.to_string(), e));
            }
        }
    }

    progress.on_batch_complete(data.histories.len(), data.failures.len(), total);
    info!(
        succeeded = data.histories.len(),
        failed = data.failures.len(),
        "ingestion complete"
    );
    data
}

fn fetch_single(
    provider: &dyn DataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceHistory, DataError> {
    let fetched = provider.fetch(symbol, start, end)?;
    let bars = canonicalize(symbol, fetched.bars);
    if bars.is_empty() {
        return Err(DataError::EmptyHistory {
            symbol: symbol.to_string(),
            start,
            end,
        });
    }
    Ok(PriceHistory::new(symbol, bars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectoral_core::data::{NoProgress, RawBar, StaticProvider};
    use std::cell::RefCell;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn raw(day: u32, close: f64) -> RawBar {
        RawBar {
            date: d(day),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1,
            adj_close: f64::NAN,
        }
    }

    fn provider() -> StaticProvider {
        StaticProvider::new()
            .with_symbol("AAA", vec![raw(2, 10.0), raw(3, 11.0)])
            .with_symbol("BBB", vec![raw(2, 20.0)])
            .with_symbol("VOID", vec![raw(2, f64::NAN)])
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl DownloadProgress for Recorder {
        fn on_start(&self, symbol: &str, _index: usize, _total: usize) {
            self.events.borrow_mut().push(format!("start {symbol}"));
        }

        fn on_complete(
            &self,
            symbol: &str,
            _index: usize,
            _total: usize,
            result: Result<usize, &DataError>,
        ) {
            let status = match result {
                Ok(n) => format!("ok {n}"),
                Err(_) => "fail".to_string(),
            };
            self.events.borrow_mut().push(format!("{symbol} {status}"));
        }

        fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
            self.events
                .borrow_mut()
                .push(format!("done {succeeded}/{failed}/{total}"));
        }
    }

    #[test]
    fn keeps_order_and_skips_failures() {
        let data = ingest_universe(
            &provider(),
            &["BBB", "MISSING", "AAA", "VOID"],
            d(1),
            d(31),
            &NoProgress,
        );
        assert_eq!(data.symbols(), vec!["BBB", "AAA"]);
        assert_eq!(data.failures.len(), 2);
        assert_eq!(data.failures[0].0, "MISSING");
        assert!(matches!(data.failures[1].1, DataError::EmptyHistory { .. }));
        assert_eq!(data.get("AAA").unwrap().len(), 2);
        assert!(data.get("MISSING").is_none());
    }

    #[test]
    fn duplicates_fetched_once() {
        let data = ingest_universe(&provider(), &["AAA", "BBB", "AAA"], d(1), d(31), &NoProgress);
        assert_eq!(data.symbols(), vec!["AAA", "BBB"]);
    }

    #[test]
    fn reports_progress_per_symbol() {
        let recorder = Recorder::default();
        ingest_universe(&provider(), &["AAA", "MISSING"], d(1), d(31), &recorder);
        assert_eq!(
            recorder.events.into_inner(),
            vec![
                "start AAA",
                "AAA ok 2",
                "start MISSING",
                "MISSING fail",
                "done 1/1/2",
            ]
        );
    }

    #[test]
    fn all_failures_is_empty_not_error() {
        let data = ingest_universe(&provider(), &["X", "Y"], d(1), d(31), &NoProgress);
        assert!(data.is_empty());
        assert_eq!(data.failures.len(), 2);
    }
}
