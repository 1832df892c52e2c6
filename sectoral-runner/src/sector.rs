//! Sector aggregation: equal-weight sector return series and summary statistics.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sectoral_core::data::{align_union, Universe};
use sectoral_core::domain::DatedSeries;
use sectoral_core::indicators::returns::cumulative_return;
use sectoral_core::indicators::stats::{annualized_volatility, mean, sharpe_ratio};
use sectoral_core::indicators::RollingVolatility;

use crate::metrics::{InstrumentMetrics, VOLATILITY_WINDOW};

/// One-year summary of a sector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub total_return_1y: Option<f64>,
    pub volatility_1y: Option<f64>,
    pub sharpe_ratio: Option<f64>,
}

/// Aggregated view of one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAggregate {
    pub name: String,
    /// Constituents that were actually ingested, in universe order.
    pub constituents: Vec<String>,
    pub daily_returns: DatedSeries,
    pub cumulative_returns: DatedSeries,
    pub rolling_volatility: DatedSeries,
    pub summary: SectorSummary,
}

/// Aggregate one sector from the metrics of its present constituents.
///
/// Returns `None` when no constituent is present.
pub fn aggregate_sector(name: &str, members: &[&InstrumentMetrics]) -> Option<SectorAggregate> {
    if members.is_empty() {
        return None;
    }

    let returns: Vec<DatedSeries> = members.iter().map(|m| m.daily_returns()).collect();
    let refs: Vec<&DatedSeries> = returns.iter().collect();
    let aligned = align_union(&refs);

    let sector_returns: Vec<Option<f64>> = (0..aligned.dates.len())
        .map(|i| {
            let defined: Vec<f64> = aligned.row(i).flatten().collect();
            mean(&defined)
        })
        .collect();

    let cumulative = cumulative_return(&sector_returns);
    let volatility = RollingVolatility::new(VOLATILITY_WINDOW).over_returns(&sector_returns);

    let daily_returns = DatedSeries::new(aligned.dates.clone(), sector_returns);
    let cumulative_returns = DatedSeries::new(aligned.dates.clone(), cumulative);
    let rolling_volatility = DatedSeries::new(aligned.dates, volatility);

    let defined = daily_returns.defined();
    let summary = SectorSummary {
        total_return_1y: cumulative_returns.last(),
        volatility_1y: annualized_volatility(&defined),
        sharpe_ratio: sharpe_ratio(&defined),
    };

    Some(SectorAggregate {
        name: name.to_string(),
        constituents: members.iter().map(|m| m.symbol.clone()).collect(),
        daily_returns,
        cumulative_returns,
        rolling_volatility,
        summary,
    })
}

/// Aggregate every sector of the universe, in universe order.
///
/// Sectors with no ingested constituent are dropped.
pub fn aggregate_sectors(universe: &Universe, metrics: &[InstrumentMetrics]) -> Vec<SectorAggregate> {
    universe
        .sectors
        .iter()
        .filter_map(|sector| {
            let members: Vec<&InstrumentMetrics> = sector
                .tickers
                .iter()
                .filter_map(|t| metrics.iter().find(|m| &m.symbol == t))
                .collect();
            let aggregate = aggregate_sector(&sector.name, &members);
            match &aggregate {
                Some(a) => debug!(
                    sector = %a.name,
                    constituents = a.constituents.len(),
                    days = a.daily_returns.len(),
                    "aggregated sector"
                ),
                None => warn!(sector = %sector.name, "no constituent data, sector dropped"),
            }
            aggregate
        })
        .collect()
}
