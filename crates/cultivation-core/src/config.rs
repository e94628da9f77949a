//! Configuration loading and typed config structures for the cultivation
//! simulation.
//!
//! The canonical configuration lives in `cultivation-config.yaml`. This
//! module defines structs mirroring the YAML layout and a loader that reads
//! and parses it. Every key is optional; absent keys take the defaults
//! documented on each field.

use std::path::Path;

use cultivation_avatars::{CultivationConfig, ImpartConfig, ObservationRange};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, calendar, pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Impart action tuning.
    #[serde(default)]
    pub impart: ImpartConfig,

    /// Cultivation level-up tuning.
    #[serde(default)]
    pub cultivation: CultivationConfig,

    /// Observation range tuning.
    #[serde(default)]
    pub observation: ObservationRange,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Calendar year the simulation starts in.
    #[serde(default = "default_start_year")]
    pub start_year: u32,

    /// Number of months to simulate before stopping.
    #[serde(default = "default_months_to_run")]
    pub months_to_run: u32,

    /// Real-time milliseconds per simulated month.
    #[serde(default = "default_month_interval_ms")]
    pub month_interval_ms: u64,

    /// Impart attempts made per simulated month.
    #[serde(default = "default_imparts_per_month")]
    pub imparts_per_month: u32,

    /// Percentage chance (0--100) that a receiver accepts an impart.
    #[serde(default = "default_accept_chance_pct")]
    pub accept_chance_pct: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            start_year: default_start_year(),
            months_to_run: default_months_to_run(),
            month_interval_ms: default_month_interval_ms(),
            imparts_per_month: default_imparts_per_month(),
            accept_chance_pct: default_accept_chance_pct(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Azure Cloud Continent".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_start_year() -> u32 {
    100
}

const fn default_months_to_run() -> u32 {
    24
}

const fn default_month_interval_ms() -> u64 {
    200
}

const fn default_imparts_per_month() -> u32 {
    3
}

const fn default_accept_chance_pct() -> u32 {
    80
}

fn default_log_level() -> String {
    "info".to_owned()
}
