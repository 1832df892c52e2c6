//! Pipeline configuration.
//!
//! Built-in defaults, optionally overridden by a TOML file, then by CLI flags:
//!
//! ```toml
//! lookback_days = 365
//! output_dir = "out"
//!
//! [[sectors]]
//! name = "Technology"
//! tickers = ["AAPL", "MSFT"]
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use sectoral_core::data::{Sector, Universe, UniverseError};

/// Default trailing window in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid universe: {0}")]
    Universe(#[from] UniverseError),

    #[error("lookback_days must be positive")]
    ZeroLookback,

    #[error("lookback of {lookback_days} days before {end} is out of the calendar range")]
    LookbackTooLarge { lookback_days: u32, end: NaiveDate },
}

/// On-disk form; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub lookback_days: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub sectors: Option<Vec<Sector>>,
}

/// Command-line overrides applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub lookback_days: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub end: Option<NaiveDate>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub universe: Universe,
    pub lookback_days: u32,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
    pub output_dir: PathBuf,
}

impl PipelineConfig {
    /// Built-in defaults with the window ending on `end`.
    pub fn with_end(end: NaiveDate) -> Self {
        Self {
            universe: Universe::sectoral_default(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            end,
            output_dir: PathBuf::from("."),
        }
    }

    /// Resolve defaults, an optional config file, and CLI overrides, in that order.
    pub fn resolve(
        file: Option<&Path>,
        overrides: &ConfigOverrides,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        let file_cfg = match file {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let mut config = Self::with_end(overrides.end.unwrap_or(today));
        config.apply_file(file_cfg);
        if let Some(days) = overrides.lookback_days {
            config.lookback_days = days;
        }
        if let Some(dir) = &overrides.output_dir {
            config.output_dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(days) = file.lookback_days {
            self.lookback_days = days;
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(sectors) = file.sectors {
            self.universe = Universe::new(sectors);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_days == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        self.start()?;
        self.universe.validate()?;
        Ok(())
    }

    /// First day of the window (inclusive).
    pub fn start(&self) -> Result<NaiveDate, ConfigError> {
        self.end
            .checked_sub_signed(Duration::days(i64::from(self.lookback_days)))
            .ok_or(ConfigError::LookbackTooLarge {
                lookback_days: self.lookback_days,
                end: self.end,
            })
    }
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = PipelineConfig::resolve(None, &ConfigOverrides::default(), today()).unwrap();
        assert_eq!(cfg.lookback_days, 365);
        assert_eq!(cfg.end, today());
        assert_eq!(cfg.start().unwrap(), NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
        assert_eq!(cfg.output_dir, PathBuf::from("."));
        assert_eq!(cfg.universe.sectors.len(), 5);
    }

    #[test]
    fn file_overrides_defaults_and_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sectoral.toml");
        std::fs::write(
            &path,
            r#"
            lookback_days = 90
            output_dir = "from-file"

            [[sectors]]
            name = "Semis"
            tickers = ["NVDA", "AMD"]
            "#,
        )
        .unwrap();

        let cfg = PipelineConfig::resolve(Some(&path), &ConfigOverrides::default(), today())
            .unwrap();
        assert_eq!(cfg.lookback_days, 90);
        assert_eq!(cfg.output_dir, PathBuf::from("from-file"));
        assert_eq!(cfg.universe.sector_names(), vec!["Semis"]);

        let overrides = ConfigOverrides {
            lookback_days: Some(30),
            output_dir: Some(PathBuf::from("from-flag")),
            end: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let cfg = PipelineConfig::resolve(Some(&path), &overrides, today()).unwrap();
        assert_eq!(cfg.lookback_days, 30);
        assert_eq!(cfg.output_dir, PathBuf::from("from-flag"));
        assert_eq!(cfg.start().unwrap(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn rejects_zero_lookback() {
        let overrides = ConfigOverrides {
            lookback_days: Some(0),
            ..Default::default()
        };
        let err = PipelineConfig::resolve(None, &overrides, today()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroLookback));
    }

    #[test]
    fn rejects_lookback_past_calendar_start() {
        let overrides = ConfigOverrides {
            lookback_days: Some(u32::MAX),
            ..Default::default()
        };
        let err = PipelineConfig::resolve(None, &overrides, today()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::LookbackTooLarge { lookback_days: u32::MAX, .. }
        ));

        let mut cfg = PipelineConfig::with_end(today());
        cfg.lookback_days = u32::MAX;
        assert!(cfg.start().is_err());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ConfigFile::from_toml("lookback = 10").is_err());
    }

    #[test]
    fn rejects_empty_sector_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "sectors = []\n").unwrap();
        let err = PipelineConfig::resolve(Some(&path), &ConfigOverrides::default(), today())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Universe(UniverseError::Empty)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = PipelineConfig::resolve(
            Some(Path::new("/definitely/not/here.toml")),
            &ConfigOverrides::default(),
            today(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
