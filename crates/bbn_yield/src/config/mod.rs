//! Scenario files: a JSON [`InputParams`] record, any field may be omitted.
//!
//! Load from: env `BBN_YIELD_SCENARIO_PATH`, or `./config/scenario.json`, or `./scenario.json`.

use crate::params::InputParams;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const SCENARIO_PATH_ENV: &str = "BBN_YIELD_SCENARIO_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub struct ScenarioConfig;

impl ScenarioConfig {
    /// Read one scenario file.
    pub fn load_from_path(path: &Path) -> Result<InputParams, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded scenario");
        Ok(params)
    }

    /// First existing candidate file, if any.
    pub fn discover() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(SCENARIO_PATH_ENV) {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
            warn!(path = %p.display(), "{} points at a missing file", SCENARIO_PATH_ENV);
        }
        [
            Path::new("./config/scenario.json"),
            Path::new("./scenario.json"),
        ]
        .into_iter()
        .find(|p| p.exists())
        .map(Path::to_path_buf)
    }

    /// Discovered scenario, or defaults. An unreadable file falls back to defaults.
    pub fn load() -> InputParams {
        let Some(path) = Self::discover() else {
            return InputParams::default();
        };
        Self::load_from_path(&path).unwrap_or_else(|e| {
            warn!(error = %e, "using default scenario");
            InputParams::default()
        })
    }

    /// `explicit` when given (errors propagate), else [`ScenarioConfig::load`].
    pub fn resolve(explicit: Option<&Path>) -> Result<InputParams, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::load()),
        }
    }
}
