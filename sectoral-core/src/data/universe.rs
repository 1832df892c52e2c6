//! Universe configuration: sector-organized ticker lists.
//!
//! Sectors keep their declaration order: every downstream ranking breaks ties
//! by that order. The universe can be loaded from TOML as a list of
//! `[[sectors]]` tables.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// A sector in the universe (e.g., Technology, Healthcare).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub tickers: Vec<String>,
}

impl Sector {
    pub fn new(name: impl Into<String>, tickers: &[&str]) -> Self {
        Self {
            name: name.into(),
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// The complete universe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    pub sectors: Vec<Sector>,
}

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse universe TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize universe: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("universe has no sectors")]
    Empty,

    #[error("sector #{index} has an empty name")]
    EmptySectorName { index: usize },

    #[error("duplicate sector name: {0}")]
    DuplicateSector(String),

    #[error("sector {0} has no tickers")]
    EmptySector(String),
}

impl Universe {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|source| UniverseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        let universe: Self = toml::from_str(content)?;
        universe.validate()?;
        Ok(universe)
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, UniverseError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check: at least one sector, unique non-empty names, no empty ticker lists.
    pub fn validate(&self) -> Result<(), UniverseError> {
        if self.sectors.is_empty() {
            return Err(UniverseError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, sector) in self.sectors.iter().enumerate() {
            let name = sector.name.trim();
            if name.is_empty() {
                return Err(UniverseError::EmptySectorName { index });
            }
            if !seen.insert(name) {
                return Err(UniverseError::DuplicateSector(name.to_string()));
            }
            if sector.tickers.iter().all(|t| t.trim().is_empty()) {
                return Err(UniverseError::EmptySector(name.to_string()));
            }
        }
        Ok(())
    }

    /// Every ticker across all sectors, deduplicated, in first-seen order.
    pub fn all_tickers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sectors
            .iter()
            .flat_map(|s| s.tickers.iter().map(|t| t.as_str()))
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Get tickers for a specific sector.
    pub fn sector_tickers(&self, sector: &str) -> Option<&[String]> {
        self.sectors
            .iter()
            .find(|s| s.name == sector)
            .map(|s| s.tickers.as_slice())
    }

    /// Sector names in declaration order.
    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total number of ticker slots (a ticker listed in two sectors counts twice).
    pub fn ticker_count(&self) -> usize {
        self.sectors.iter().map(|s| s.tickers.len()).sum()
    }

    /// The built-in five-sector US equity universe.
    pub fn sectoral_default() -> Self {
        Self::new(vec![
            Sector::new("Technology", &["AAPL", "MSFT", "GOOGL", "NVDA"]),
            Sector::new("Healthcare", &["JNJ", "PFE", "UNH", "ABBV"]),
            Sector::new("Finance", &["JPM", "BAC", "WFC", "GS"]),
            Sector::new("Energy", &["XOM", "CVX", "COP", "SLB"]),
            Sector::new("Consumer", &["AMZN", "TSLA", "HD", "MCD"]),
        ])
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::sectoral_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_universe_has_five_sectors_in_order() {
        let u = Universe::sectoral_default();
        assert_eq!(
            u.sector_names(),
            vec!["Technology", "Healthcare", "Finance", "Energy", "Consumer"]
        );
        assert_eq!(u.ticker_count(), 20);
        assert!(u.validate().is_ok());
    }

    #[test]
    fn toml_roundtrip_keeps_order() {
        let u = Universe::sectoral_default();
        let toml_str = u.to_toml().unwrap();
        let parsed = Universe::from_toml(&toml_str).unwrap();
        assert_eq!(u, parsed);
    }

    #[test]
    fn parses_sector_tables() {
        let u = Universe::from_toml(
            r#"
            [[sectors]]
            name = "Semis"
            tickers = ["NVDA", "AMD"]

            [[sectors]]
            name = "Banks"
            tickers = ["JPM"]
            "#,
        )
        .unwrap();
        assert_eq!(u.sector_names(), vec!["Semis", "Banks"]);
        assert_eq!(u.sector_tickers("Semis").unwrap().len(), 2);
        assert!(u.sector_tickers("Nope").is_none());
    }

    #[test]
    fn all_tickers_dedupes_in_order() {
        let u = Universe::new(vec![
            Sector::new("A", &["X", "Y"]),
            Sector::new("B", &["Y", "Z"]),
        ]);
        assert_eq!(u.all_tickers(), vec!["X", "Y", "Z"]);
        assert_eq!(u.ticker_count(), 4);
    }

    #[test]
    fn rejects_empty_universe() {
        assert!(matches!(
            Universe::new(vec![]).validate(),
            Err(UniverseError::Empty)
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let u = Universe::new(vec![Sector::new("A", &["X"]), Sector::new("A", &["Y"])]);
        assert!(matches!(u.validate(), Err(UniverseError::DuplicateSector(_))));
    }

    #[test]
    fn rejects_empty_ticker_list() {
        let u = Universe::new(vec![Sector::new("A", &[])]);
        assert!(matches!(u.validate(), Err(UniverseError::EmptySector(_))));
    }

    #[test]
    fn rejects_blank_name() {
        let u = Universe::new(vec![Sector::new("  ", &["X"])]);
        assert!(matches!(
            u.validate(),
            Err(UniverseError::EmptySectorName { index: 0 })
        ));
    }
}
