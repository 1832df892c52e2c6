//! Reporting: CSV export and the console summary.

pub mod export;
pub mod summary;

pub use export::{
    export_correlations_csv, export_raw_data_csv, export_sector_metrics_csv,
    read_sector_metrics_csv, save_outputs, ExportError, OutputFiles, SectorMetricsRecord,
    CORRELATIONS_FILE, METRICS_FILE, RAW_DATA_FILE,
};
pub use summary::format_summary;
