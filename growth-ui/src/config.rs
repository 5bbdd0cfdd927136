//! Optional TOML configuration for the survey.
//!
//! Every key may be omitted; missing keys fall back to the built-in
//! scenarios, a `£` currency symbol and a £350/mo service cost.

use std::fs;
use std::path::{Path, PathBuf};

use growth_core::{Scenario, ScenarioConfig, ScenarioConfigError, ScenarioKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Starting monthly price quoted in the call to action.
pub const SERVICE_COST_START: Decimal = Decimal::from_parts(350, 0, 0, false, 0);

pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scenario table: {0}")]
    Scenario(#[from] ScenarioConfigError),
}

/// Scenario table entry as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioEntry {
    label: Option<String>,
    multiplier: Option<Decimal>,
}

/// File layout before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    currency_symbol: Option<String>,
    service_cost: Option<Decimal>,
    months: Option<u32>,
    moderate: Option<ScenarioEntry>,
    average: Option<ScenarioEntry>,
    over_perform: Option<ScenarioEntry>,
}

impl ConfigFile {
    fn entry(
        &mut self,
        kind: ScenarioKind,
    ) -> Option<ScenarioEntry> {
        match kind {
            ScenarioKind::Moderate => self.moderate.take(),
            ScenarioKind::Average => self.average.take(),
            ScenarioKind::OverPerform => self.over_perform.take(),
        }
    }
}

/// Display settings for the terminal views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub service_cost: Decimal,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            service_cost: SERVICE_COST_START,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub scenarios: ScenarioConfig,
}

impl AppConfig {
    /// Parses TOML text and fills in defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut file: ConfigFile = toml::from_str(text)?;

        let mut scenarios = ScenarioConfig::default();
        if let Some(months) = file.months {
            scenarios.months = months;
        }
        for &kind in ScenarioKind::all() {
            if let Some(entry) = file.entry(kind) {
                let default = Scenario::default_for(kind);
                *scenarios.scenario_mut(kind) = Scenario {
                    label: entry.label.unwrap_or(default.label),
                    multiplier: entry.multiplier.unwrap_or(default.multiplier),
                };
            }
        }
        scenarios.validate()?;

        let defaults = DisplayConfig::default();
        let display = DisplayConfig {
            currency_symbol: file.currency_symbol.unwrap_or(defaults.currency_symbol),
            service_cost: file.service_cost.unwrap_or(defaults.service_cost),
        };

        Ok(Self { display, scenarios })
    }

    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
