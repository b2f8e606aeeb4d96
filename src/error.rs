use std::fmt;

use crate::config::ConfigError;
use crate::source::SourceError;

/// Top-level error for the service wiring and the refresh loop.
///
/// Malformed rows never show up here: they are skipped and counted inside
/// a tick, not propagated.
#[derive(Debug)]
pub enum DashboardError {
    Config(ConfigError),
    Source(SourceError),
    Io(std::io::Error),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Config(err) => write!(f, "Config error: {}", err),
            DashboardError::Source(err) => write!(f, "Source error: {}", err),
            DashboardError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<ConfigError> for DashboardError {
    fn from(error: ConfigError) -> Self {
        DashboardError::Config(error)
    }
}

impl From<SourceError> for DashboardError {
    fn from(error: SourceError) -> Self {
        DashboardError::Source(error)
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(error: std::io::Error) -> Self {
        DashboardError::Io(error)
    }
}
