//! Host configuration.
//!
//! Read from `<config dir>/mems-session/config.toml` when present. Every key
//! is optional:
//!
//! ```toml
//! run_duration_ms = 5000
//! tick_interval_ms = 10
//! gyroscope_rate_hz = 100.0
//! accelerometer_rate_hz = 100.0
//!
//! [session]
//! haptic_delay_ms = 2000
//! audio_delay_ms = 3000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use mems_session_core::SessionConfig;
use serde::Deserialize;

use crate::error::HostError;
use crate::simulated_sensor::validate_rate;

const APP_DIR: &str = "mems-session";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub session: SessionConfig,
    /// Where `mems.csv`, `info.json` and `session.zip` are written.
    pub document_dir: PathBuf,
    /// Where shared archives are copied.
    pub outbox_dir: PathBuf,
    /// How long the session runs before it is stopped.
    pub run_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub gyroscope_rate_hz: f64,
    pub accelerometer_rate_hz: f64,
    /// Simulate a device without a gyroscope.
    pub gyroscope_missing: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        let document_dir = dirs_next::document_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("MEMS Sessions");
        Self {
            session: SessionConfig::default(),
            outbox_dir: document_dir.join("outbox"),
            document_dir,
            run_duration_ms: 5000,
            tick_interval_ms: 10,
            gyroscope_rate_hz: 100.0,
            accelerometer_rate_hz: 100.0,
            gyroscope_missing: false,
        }
    }
}

impl HostConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location. A missing default file
    /// yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, HostError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| HostError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, HostError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| HostError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HostError> {
        self.session.validate().map_err(HostError::Config)?;
        if self.tick_interval_ms == 0 {
            return Err(HostError::Config("tick_interval_ms must be positive".into()));
        }
        validate_rate(self.gyroscope_rate_hz)
            .map_err(|e| HostError::Config(format!("gyroscope_rate_hz: {}", e)))?;
        validate_rate(self.accelerometer_rate_hz)
            .map_err(|e| HostError::Config(format!("accelerometer_rate_hz: {}", e)))?;
        Ok(())
    }
}
