//! CSV directory data provider.
//!
//! Reads `{dir}/{SYMBOL}.csv` files with a `date,open,high,low,close,volume`
//! header and an optional `adj_close` column. Header names are matched
//! case-insensitively against the common spellings.
//!
//! Unparseable price cells (empty, `null`) become NaN so that only the
//! affected bar is dropped during canonicalization.

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE")]
    date: String,
    #[serde(alias = "Open", alias = "OPEN", deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(alias = "High", alias = "HIGH", deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "LOW", deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "CLOSE", deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(
        alias = "Volume",
        alias = "VOLUME",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    volume: Option<f64>,
    #[serde(
        alias = "Adj Close",
        alias = "Adj_Close",
        alias = "adjclose",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    adj_close: Option<f64>,
}

/// Provider backed by a directory of per-symbol CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn read_bars(&self, symbol: &str, path: &Path) -> Result<Vec<RawBar>, DataError> {
        let csv_err = |message: String| DataError::CsvImport {
            symbol: symbol.to_string(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| csv_err(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| csv_err(format!("row {}: {e}", line + 1)))?;
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                .map_err(|e| csv_err(format!("row {}: bad date '{}': {e}", line + 1, row.date)))?;
            bars.push(RawBar {
                date,
                open: row.open.unwrap_or(f64::NAN),
                high: row.high.unwrap_or(f64::NAN),
                low: row.low.unwrap_or(f64::NAN),
                close: row.close.unwrap_or(f64::NAN),
                volume: match row.volume {
                    Some(v) if v.is_finite() && v > 0.0 => v as u64,
                    _ => 0,
                },
                adj_close: row.adj_close.unwrap_or(f64::NAN),
            });
        }
        Ok(bars)
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.symbol_path(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let bars: Vec<RawBar> = self
            .read_bars(symbol, &path)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();

        if bars.is_empty() {
            return Err(DataError::EmptyHistory {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}
