//! Insight extraction: rank sectors and correlated pairs.
//!
//! All rankings go through [`select_extreme`]: undefined values never win and
//! ties keep the first candidate in iteration order.

use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationMatrix;
use crate::sector::{SectorAggregate, SectorSummary};

/// A sector and the value it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSector {
    pub sector: String,
    pub value: f64,
}

/// Two distinct sectors and their correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedPair {
    pub first: String,
    pub second: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub top_performer: Option<RankedSector>,
    pub worst_performer: Option<RankedSector>,
    pub least_volatile: Option<RankedSector>,
    pub best_sharpe: Option<RankedSector>,
    pub highest_correlation: Option<CorrelatedPair>,
    pub lowest_correlation: Option<CorrelatedPair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Pick the candidate with the largest (or smallest) defined value.
///
/// Non-finite values count as undefined. Only a strictly better value
/// replaces the current pick, so the earliest candidate wins a tie.
pub fn select_extreme<T, I>(candidates: I, extreme: Extreme) -> Option<(T, f64)>
where
    I: IntoIterator<Item = (T, Option<f64>)>,
{
    let mut best: Option<(T, f64)> = None;
    for (item, value) in candidates {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((_, current)) => match extreme {
                Extreme::Max => v > *current,
                Extreme::Min => v < *current,
            },
        };
        if better {
            best = Some((item, v));
        }
    }
    best
}

fn rank_sectors(
    aggregates: &[SectorAggregate],
    field: fn(&SectorSummary) -> Option<f64>,
    extreme: Extreme,
) -> Option<RankedSector> {
    let candidates = aggregates.iter().map(|a| (a.name.as_str(), field(&a.summary)));
    select_extreme(candidates, extreme).map(|(sector, value)| RankedSector {
        sector: sector.to_string(),
        value,
    })
}

fn rank_pairs(matrix: &CorrelationMatrix, extreme: Extreme) -> Option<CorrelatedPair> {
    let candidates = matrix.upper_pairs().map(|(i, j, r)| ((i, j), r));
    select_extreme(candidates, extreme).map(|((i, j), correlation)| CorrelatedPair {
        first: matrix.labels[i].clone(),
        second: matrix.labels[j].clone(),
        correlation,
    })
}

/// Derive every insight from the sector aggregates and their correlation matrix.
pub fn extract_insights(aggregates: &[SectorAggregate], matrix: &CorrelationMatrix) -> Insights {
    Insights {
        top_performer: rank_sectors(aggregates, |s| s.total_return_1y, Extreme::Max),
        worst_performer: rank_sectors(aggregates, |s| s.total_return_1y, Extreme::Min),
        least_volatile: rank_sectors(aggregates, |s| s.volatility_1y, Extreme::Min),
        best_sharpe: rank_sectors(aggregates, |s| s.sharpe_ratio, Extreme::Max),
        highest_correlation: rank_pairs(matrix, Extreme::Max),
        lowest_correlation: rank_pairs(matrix, Extreme::Min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectoral_core::domain::DatedSeries;

    fn sector(name: &str, total: Option<f64>, vol: Option<f64>, sharpe: Option<f64>) -> SectorAggregate {
        SectorAggregate {
            name: name.into(),
            constituents: vec![],
            daily_returns: DatedSeries::default(),
            cumulative_returns: DatedSeries::default(),
            rolling_volatility: DatedSeries::default(),
            summary: SectorSummary {
                total_return_1y: total,
                volatility_1y: vol,
                sharpe_ratio: sharpe,
            },
        }
    }

    fn matrix(labels: &[&str], values: Vec<Vec<Option<f64>>>) -> CorrelationMatrix {
        CorrelationMatrix {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values,
        }
    }

    #[test]
    fn top_and_worst_performer() {
        let aggs = vec![
            sector("Technology", Some(0.30), None, None),
            sector("Healthcare", Some(0.10), None, None),
            sector("Energy", Some(-0.05), None, None),
        ];
        let insights = extract_insights(&aggs, &CorrelationMatrix::default());
        assert_eq!(insights.top_performer.unwrap().sector, "Technology");
        let worst = insights.worst_performer.unwrap();
        assert_eq!(worst.sector, "Energy");
        assert_eq!(worst.value, -0.05);
    }

    #[test]
    fn undefined_sharpe_never_wins() {
        let aggs = vec![sector("A", None, None, None), sector("B", None, None, Some(-0.5))];
        let insights = extract_insights(&aggs, &CorrelationMatrix::default());
        let best = insights.best_sharpe.unwrap();
        assert_eq!(best.sector, "B");
        assert_eq!(best.value, -0.5);
    }

    #[test]
    fn ties_go_to_first_sector() {
        let aggs = vec![
            sector("First", Some(0.1), Some(0.2), None),
            sector("Second", Some(0.1), Some(0.2), None),
        ];
        let insights = extract_insights(&aggs, &CorrelationMatrix::default());
        assert_eq!(insights.top_performer.unwrap().sector, "First");
        assert_eq!(insights.worst_performer.unwrap().sector, "First");
        assert_eq!(insights.least_volatile.unwrap().sector, "First");
    }

    #[test]
    fn all_undefined_gives_none() {
        let aggs = vec![sector("A", None, None, None)];
        let insights = extract_insights(&aggs, &CorrelationMatrix::default());
        assert_eq!(insights, Insights::default());
    }

    #[test]
    fn correlation_pairs_skip_undefined() {
        let m = matrix(
            &["A", "B", "C"],
            vec![
                vec![Some(1.0), Some(0.8), None],
                vec![Some(0.8), Some(1.0), Some(-0.3)],
                vec![None, Some(-0.3), Some(1.0)],
            ],
        );
        let insights = extract_insights(&[], &m);
        let high = insights.highest_correlation.unwrap();
        assert_eq!((high.first.as_str(), high.second.as_str()), ("A", "B"));
        assert_eq!(high.correlation, 0.8);
        let low = insights.lowest_correlation.unwrap();
        assert_eq!((low.first.as_str(), low.second.as_str()), ("B", "C"));
    }

    #[test]
    fn correlation_tie_goes_to_first_pair() {
        let m = matrix(
            &["A", "B", "C"],
            vec![
                vec![Some(1.0), Some(0.5), Some(0.5)],
                vec![Some(0.5), Some(1.0), Some(0.5)],
                vec![Some(0.5), Some(0.5), Some(1.0)],
            ],
        );
        let insights = extract_insights(&[], &m);
        let high = insights.highest_correlation.unwrap();
        assert_eq!((high.first.as_str(), high.second.as_str()), ("A", "B"));
        let low = insights.lowest_correlation.unwrap();
        assert_eq!((low.first.as_str(), low.second.as_str()), ("A", "B"));
    }

    #[test]
    fn single_sector_has_no_pairs() {
        let m = matrix(&["A"], vec![vec![Some(1.0)]]);
        let insights = extract_insights(&[sector("A", Some(0.1), None, None)], &m);
        assert!(insights.highest_correlation.is_none());
        assert!(insights.lowest_correlation.is_none());
        assert!(insights.top_performer.is_some());
    }

    #[test]
    fn select_extreme_ignores_nan() {
        let picked = select_extreme(vec![("a", Some(f64::NAN)), ("b", Some(1.0))], Extreme::Max);
        assert_eq!(picked, Some(("b", 1.0)));
    }
}
