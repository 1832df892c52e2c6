//! Sectoral Runner: pipeline orchestration on top of `sectoral-core`.
//!
//! This crate provides:
//! - Layered configuration (defaults, TOML file, CLI overrides)
//! - Universe ingestion with per-symbol failure isolation
//! - Per-instrument metrics and equal-weight sector aggregation
//! - Sector correlation matrix and ranking insights
//! - CSV export and the console summary

pub mod config;
pub mod correlation;
pub mod ingest;
pub mod insights;
pub mod metrics;
pub mod pipeline;
pub mod reporting;
pub mod sector;

pub use config::{ConfigError, ConfigFile, ConfigOverrides, PipelineConfig};
pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use ingest::{ingest_universe, IngestedData};
pub use insights::{extract_insights, CorrelatedPair, Insights, RankedSector};
pub use metrics::{compute_instrument_metrics, InstrumentMetrics, MetricRow};
pub use pipeline::{analyze, run_pipeline, Analysis, PipelineOutput, RunError};
pub use reporting::{format_summary, read_sector_metrics_csv, save_outputs, ExportError, OutputFiles};
pub use sector::{aggregate_sectors, SectorAggregate, SectorSummary};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn pipeline_config_is_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
    }

    #[test]
    fn analysis_is_send_sync() {
        assert_send::<Analysis>();
        assert_sync::<Analysis>();
        assert_send::<InstrumentMetrics>();
        assert_sync::<InstrumentMetrics>();
        assert_send::<SectorAggregate>();
        assert_sync::<SectorAggregate>();
        assert_send::<CorrelationMatrix>();
        assert_sync::<CorrelationMatrix>();
        assert_send::<Insights>();
        assert_sync::<Insights>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
        assert_send::<ExportError>();
        assert_sync::<ExportError>();
    }
}
