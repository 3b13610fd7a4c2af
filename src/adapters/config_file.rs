//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a file holding a JSON array of zone
//! configs, as written by the setup flow.  Every zone is validated before
//! it is handed out.

use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ZoneConfig;
use crate::error::Error;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse and validate a JSON array of zones.
    pub fn parse(raw: &str) -> Result<Vec<ZoneConfig>, ConfigError> {
        let zones: Vec<ZoneConfig> =
            serde_json::from_str(raw).map_err(|_| ConfigError::Corrupted)?;
        if zones.is_empty() {
            return Err(ConfigError::NotFound);
        }
        for zone in &zones {
            zone.validate().map_err(|e| {
                warn!("JsonConfigFile: zone '{}' invalid: {}", zone.name, e);
                match e {
                    Error::Config(msg) => ConfigError::ValidationFailed(msg),
                    _ => ConfigError::ValidationFailed("invalid zone"),
                }
            })?;
        }
        Ok(zones)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<Vec<ZoneConfig>, ConfigError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let zones = Self::parse(&raw)?;
        info!(
            "JsonConfigFile: loaded {} zone(s) from {}",
            zones.len(),
            self.path.display()
        );
        Ok(zones)
    }
}
