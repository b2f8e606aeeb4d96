use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::source::DEFAULT_WINDOW_ROWS;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub api: ApiConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Connection URL of the writer-owned vitals database.
    pub database_url: String,
    /// Rows fetched per tick, shared across all patients.
    pub window_rows: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            api: ApiConfig::default(),
            refresh: RefreshConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            database_url: "sqlite://patient_monitoring.db".to_string(),
            window_rows: DEFAULT_WINDOW_ROWS,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig { interval_secs: 5 }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a YAML file. A missing file is not an error:
/// the defaults describe a local writer database and a 5 second cadence.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
}
