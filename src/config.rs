use std::{path::PathBuf, sync::OnceLock};

use config::{Config, File};
use thiserror::Error;

use crate::clock::{Clock, ClockDiscipline};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The configuration has already been initialized")]
    ConfigAlreadyInitialized,

    #[error("Unable to read the configuration file: {0}")]
    UnableToReadConfig(#[from] config::ConfigError),
}

/// Time control applied to new games.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ClockConfig {
    pub white_seconds: u32,
    pub black_seconds: u32,
    #[serde(default)]
    pub discipline: ClockDiscipline,
    /// Fischer increment or Bronstein delay, in seconds.
    #[serde(default)]
    pub increment_seconds: u32,
}

impl ClockConfig {
    pub fn build_clock(&self) -> Clock {
        Clock::new(self.white_seconds, self.black_seconds, self.discipline, self.increment_seconds)
    }
}

/// Configuration of the arbiter
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ArbiterConfig {
    /// Games are untimed when absent
    #[serde(default)]
    pub clock: Option<ClockConfig>,
}

static CONFIG: OnceLock<ArbiterConfig> = OnceLock::new();

/// Get the configuration, or the default (untimed) one if none was loaded.
pub fn get_config() -> &'static ArbiterConfig {
    CONFIG.get_or_init(ArbiterConfig::default)
}

/// Reads a configuration file without installing it.
pub fn load(path: PathBuf) -> Result<ArbiterConfig, ConfigError> {
    let settings = Config::builder().add_source(File::from(path)).build()?;
    Ok(settings.try_deserialize()?)
}

/// Initialize the process-wide configuration from a file
pub fn initialize(path: PathBuf) -> Result<(), ConfigError> {
    let config = load(path)?;
    CONFIG.set(config).map_err(|_| ConfigError::ConfigAlreadyInitialized)
}
