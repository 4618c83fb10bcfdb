use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anubis_elo::{IdRange, RatingSystem, WeightMode, DEFAULT_MAP};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for {name}: {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Options from one configuration source. Unset options fall through to the
/// next source.
///
/// As a TOML file:
///
/// ```toml
/// k = 24.0
/// init_rating = 1500.0
/// weight_mode = "sqrt"
/// weight_cap = 2.5
/// start_id = 150000
/// map = "anubis"
/// ```
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSettings {
    pub k: Option<f64>,
    pub init_rating: Option<f64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub weight_mode: Option<WeightMode>,
    pub weight_cap: Option<f64>,
    pub start_id: Option<i64>,
    pub end_id: Option<i64>,
    pub map: Option<String>,
}

impl PartialSettings {
    pub fn load(path: &Path) -> Result<PartialSettings, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Options set here win over options set in `lower`.
    #[must_use]
    pub fn merge(self, lower: PartialSettings) -> PartialSettings {
        PartialSettings {
            k: self.k.or(lower.k),
            init_rating: self.init_rating.or(lower.init_rating),
            weight_mode: self.weight_mode.or(lower.weight_mode),
            weight_cap: self.weight_cap.or(lower.weight_cap),
            start_id: self.start_id.or(lower.start_id),
            end_id: self.end_id.or(lower.end_id),
            map: self.map.or(lower.map),
        }
    }

    /// Fills in defaults for everything unset and validates the result.
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let defaults = Settings::default();
        let settings = Settings {
            k: self.k.unwrap_or(defaults.k),
            init_rating: self.init_rating.unwrap_or(defaults.init_rating),
            weight_mode: self.weight_mode.unwrap_or(defaults.weight_mode),
            weight_cap: self.weight_cap.unwrap_or(defaults.weight_cap),
            range: IdRange {
                start: self.start_id,
                end: self.end_id,
            },
            map: self.map.unwrap_or(defaults.map),
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Fully resolved options of a backtest run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub k: f64,
    pub init_rating: f64,
    pub weight_mode: WeightMode,
    pub weight_cap: f64,
    pub range: IdRange,
    pub map: String,
}

impl Default for Settings {
    fn default() -> Settings {
        let rating_system = RatingSystem::new();
        Settings {
            k: rating_system.k(),
            init_rating: rating_system.default_rating(),
            weight_mode: rating_system.weight_mode(),
            weight_cap: rating_system.weight_cap(),
            range: IdRange::UNBOUNDED,
            map: DEFAULT_MAP.to_owned(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name, value, reason| ConfigError::InvalidValue {
            name,
            value,
            reason,
        };
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(invalid("k", self.k, "must be finite and non-negative"));
        }
        if !self.init_rating.is_finite() {
            return Err(invalid("init_rating", self.init_rating, "must be finite"));
        }
        if !self.weight_cap.is_finite() || self.weight_cap < 1.0 {
            return Err(invalid(
                "weight_cap",
                self.weight_cap,
                "must be finite and at least 1",
            ));
        }
        Ok(())
    }

    pub fn rating_system(&self) -> RatingSystem {
        RatingSystem::builder()
            .k(self.k)
            .default_rating(self.init_rating)
            .weight_mode(self.weight_mode)
            .weight_cap(self.weight_cap)
            .build()
    }
}
