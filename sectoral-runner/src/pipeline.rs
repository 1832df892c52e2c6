//! Pipeline runner: wires ingestion, metrics, aggregation, correlation, insights and export.
//!
//! Two entry points:
//! - `run_pipeline()`: fetches data through a provider, analyzes, writes files. Used by the CLI.
//! - `analyze()`: takes already ingested data, no I/O. Used by tests and offline callers.

use thiserror::Error;
use tracing::info;

use sectoral_core::data::{DataProvider, DownloadProgress, Universe};

use crate::config::{ConfigError, PipelineConfig};
use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::ingest::{ingest_universe, IngestedData};
use crate::insights::{extract_insights, Insights};
use crate::metrics::{compute_all, InstrumentMetrics};
use crate::reporting::{save_outputs, ExportError, OutputFiles};
use crate::sector::{aggregate_sectors, SectorAggregate};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("no sector has any ingested constituent ({failed} symbols failed)")]
    NoSectorData { failed: usize },
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// In-memory results of stages 2 to 5.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub metrics: Vec<InstrumentMetrics>,
    pub aggregates: Vec<SectorAggregate>,
    pub correlations: CorrelationMatrix,
    pub insights: Insights,
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    pub ingested: IngestedData,
    pub analysis: Analysis,
    pub files: OutputFiles,
}

/// Compute metrics, sector aggregates, correlations and insights. No I/O.
///
/// Fails with `NoSectorData` when no sector has a single ingested constituent.
pub fn analyze(universe: &Universe, ingested: &IngestedData) -> Result<Analysis, RunError> {
    let metrics = compute_all(&ingested.histories);
    info!(instruments = metrics.len(), "computed instrument metrics");

    let aggregates = aggregate_sectors(universe, &metrics);
    if aggregates.is_empty() {
        return Err(RunError::NoSectorData {
            failed: ingested.failures.len(),
        });
    }
    info!(sectors = aggregates.len(), "aggregated sectors");

    let correlations = correlation_matrix(&aggregates);
    info!(size = correlations.len(), "computed correlation matrix");

    let insights = extract_insights(&aggregates, &correlations);
    info!("extracted insights");

    Ok(Analysis {
        metrics,
        aggregates,
        correlations,
        insights,
    })
}

/// Run every stage for `config` and write the three CSV files.
pub fn run_pipeline(
    config: &PipelineConfig,
    provider: &dyn DataProvider,
    progress: &dyn DownloadProgress,
) -> Result<PipelineOutput, RunError> {
    config.validate()?;

    let tickers = config.universe.all_tickers();
    let ingested = ingest_universe(provider, &tickers, config.start()?, config.end, progress);

    let analysis = analyze(&config.universe, &ingested)?;

    let files = save_outputs(
        &config.output_dir,
        &analysis.metrics,
        &analysis.aggregates,
        &analysis.correlations,
    )?;

    Ok(PipelineOutput {
        ingested,
        analysis,
        files,
    })
}
