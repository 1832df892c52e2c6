//! CSV export of the three run artifacts.
//!
//! - `sectoral_raw_data.csv`: every instrument row with its derived columns
//! - `sectoral_metrics.csv`: one summary row per sector
//! - `sectoral_correlations.csv`: the sector correlation matrix
//!
//! Undefined values are empty cells. Floats use the shortest representation
//! that parses back to the same `f64`. Files are written atomically: write to
//! `.tmp`, then rename into place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::correlation::CorrelationMatrix;
use crate::metrics::InstrumentMetrics;
use crate::sector::SectorAggregate;

pub const RAW_DATA_FILE: &str = "sectoral_raw_data.csv";
pub const METRICS_FILE: &str = "sectoral_metrics.csv";
pub const CORRELATIONS_FILE: &str = "sectoral_correlations.csv";

const RAW_DATA_HEADER: [&str; 12] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Daily_Return",
    "Cumulative_Return",
    "Volatility_30d",
    "MA_20",
    "MA_50",
    "Symbol",
];

const METRICS_HEADER: [&str; 4] = ["Sector", "Total_Return_1Y", "Volatility_1Y", "Sharpe_Ratio"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One row of `sectoral_metrics.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMetricsRecord {
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Total_Return_1Y")]
    pub total_return_1y: Option<f64>,
    #[serde(rename = "Volatility_1Y")]
    pub volatility_1y: Option<f64>,
    #[serde(rename = "Sharpe_Ratio")]
    pub sharpe_ratio: Option<f64>,
}

impl From<&SectorAggregate> for SectorMetricsRecord {
    fn from(a: &SectorAggregate) -> Self {
        Self {
            sector: a.name.clone(),
            total_return_1y: a.summary.total_return_1y,
            volatility_1y: a.summary.volatility_1y,
            sharpe_ratio: a.summary.sharpe_ratio,
        }
    }
}

/// Paths of the files written by [`save_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub raw_data: PathBuf,
    pub metrics: PathBuf,
    pub correlations: PathBuf,
}

impl OutputFiles {
    pub fn all(&self) -> [&Path; 3] {
        [&self.raw_data, &self.metrics, &self.correlations]
    }
}

// ─── Cell formatting ────────────────────────────────────────────────

fn fmt_f64(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        String::new()
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(fmt_f64).unwrap_or_default()
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(data)?)
}

// ─── CSV rendering ──────────────────────────────────────────────────

/// Render all instrument rows, concatenated in the given order.
pub fn export_raw_data_csv(metrics: &[InstrumentMetrics]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(RAW_DATA_HEADER)?;

    for instrument in metrics {
        for r in &instrument.rows {
            wtr.write_record([
                r.date.format("%Y-%m-%d").to_string(),
                fmt_f64(r.open),
                fmt_f64(r.high),
                fmt_f64(r.low),
                fmt_f64(r.close),
                r.volume.to_string(),
                fmt_opt(r.daily_return),
                fmt_opt(r.cumulative_return),
                fmt_opt(r.volatility_30d),
                fmt_opt(r.ma_20),
                fmt_opt(r.ma_50),
                instrument.symbol.clone(),
            ])?;
        }
    }

    finish(wtr)
}

/// Render one summary row per sector.
pub fn export_sector_metrics_csv(aggregates: &[SectorAggregate]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(METRICS_HEADER)?;

    for a in aggregates {
        wtr.write_record([
            a.name.clone(),
            fmt_opt(a.summary.total_return_1y),
            fmt_opt(a.summary.volatility_1y),
            fmt_opt(a.summary.sharpe_ratio),
        ])?;
    }

    finish(wtr)
}

/// Render the correlation matrix with sector names as header and first column.
pub fn export_correlations_csv(matrix: &CorrelationMatrix) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let header = std::iter::once("Sector").chain(matrix.labels.iter().map(String::as_str));
    wtr.write_record(header)?;

    for (label, row) in matrix.labels.iter().zip(&matrix.values) {
        let cells = std::iter::once(label.clone()).chain(row.iter().map(|v| fmt_opt(*v)));
        wtr.write_record(cells)?;
    }

    finish(wtr)
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write `contents` to `path` via a temp file and rename.
///
/// On failure the temp file is removed and any existing `path` is untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ExportError> {
    let tmp_path = path.with_extension("csv.tmp");
    fs::write(&tmp_path, contents).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ExportError::io(&tmp_path, e)
    })?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ExportError::io(path, e)
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Render and write all three artifacts into `output_dir`.
///
/// Every file is rendered before any is written, so a rendering error leaves
/// the directory as it was.
pub fn save_outputs(
    output_dir: &Path,
    metrics: &[InstrumentMetrics],
    aggregates: &[SectorAggregate],
    matrix: &CorrelationMatrix,
) -> Result<OutputFiles, ExportError> {
    fs::create_dir_all(output_dir).map_err(|e| ExportError::io(output_dir, e))?;

    let raw = export_raw_data_csv(metrics)?;
    let sector_metrics = export_sector_metrics_csv(aggregates)?;
    let correlations = export_correlations_csv(matrix)?;

    let files = OutputFiles {
        raw_data: output_dir.join(RAW_DATA_FILE),
        metrics: output_dir.join(METRICS_FILE),
        correlations: output_dir.join(CORRELATIONS_FILE),
    };

    write_atomic(&files.raw_data, &raw)?;
    write_atomic(&files.metrics, &sector_metrics)?;
    write_atomic(&files.correlations, &correlations)?;

    info!(dir = %output_dir.display(), "exported results");
    Ok(files)
}

/// Read `sectoral_metrics.csv` back into records.
pub fn read_sector_metrics_csv(path: &Path) -> Result<Vec<SectorMetricsRecord>, ExportError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<SectorMetricsRecord>, csv::Error>>()?;
    Ok(records)
}
