use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::geocoder::DEFAULT_ENDPOINT;
use crate::lookup::LookupOptions;
use crate::matching::Thresholds;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub geocoder: GeocoderConfig,
    pub thresholds: Thresholds,
    pub nearest: NearestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub sites: PathBuf,
    pub operators: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NearestConfig {
    /// Drop nearest-mode sites at or beyond this distance (meters)
    pub max_distance: Option<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:5000".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sites: PathBuf::from("site_mobiles_gps.csv"),
            operators: PathBuf::from("french_mnc.csv"),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            thresholds: self.thresholds,
            nearest_max_distance: self.nearest.max_distance,
        }
    }
}
