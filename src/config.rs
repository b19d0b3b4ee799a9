use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{Result, SchedulerError};

const APP_DIR: &str = "dayplan";
const DEFAULT_STORAGE_KEY: &str = "events";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the event file
    pub data_dir: PathBuf,

    /// Name of the stored collection; the file is `<storage_key>.json`
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file, `<config_dir>/dayplan/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Loads the config at `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults; an unreadable one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                debug!("No config directory available, using defaults");
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config: Config =
            serde_json::from_str(&raw).map_err(|e| SchedulerError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let key = self.storage_key.trim();
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(SchedulerError::ConfigError {
                message: format!("invalid storage_key '{}'", self.storage_key),
            });
        }
        Ok(())
    }

    /// Full path of the event file.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}
