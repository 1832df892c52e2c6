//! Market data: providers, canonicalization, alignment, and the sector universe.

pub mod align;
pub mod canonicalize;
pub mod csv_import;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use align::{align_union, AlignedSeries};
pub use canonicalize::{canonicalize, canonicalize_with_stats, CanonicalStats};
pub use csv_import::CsvProvider;
pub use provider::{
    DataError, DataProvider, DataSource, DownloadProgress, FetchResult, NoProgress, RawBar,
    StaticProvider, StdoutProgress,
};
pub use universe::{Sector, Universe, UniverseError};
pub use yahoo::YahooProvider;
