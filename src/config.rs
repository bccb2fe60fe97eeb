use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_INTERVAL_SECONDS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub interval_seconds: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
        }
    }
}

impl MonitorConfig {
    /// Sampling interval; a zero interval falls back to the default.
    pub fn interval(&self) -> Duration {
        if self.interval_seconds == 0 {
            Duration::from_secs(DEFAULT_INTERVAL_SECONDS)
        } else {
            Duration::from_secs(self.interval_seconds)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON-lines file receiving events; stdout when unset.
    pub path: Option<PathBuf>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("topinfo").join("config.toml"))
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Loads `explicit`, or the default config path when it exists. A missing or
/// malformed file yields defaults together with the error, so the caller can
/// report it once logging is up.
pub fn load_config(explicit: Option<&Path>) -> (Config, Option<ConfigError>) {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => config_path().filter(|p| p.exists()),
    };
    match path {
        Some(path) => match read_config(&path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        },
        None => (Config::default(), None),
    }
}
