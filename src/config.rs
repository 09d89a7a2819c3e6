//! Runtime configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below. A missing file is not an error.

use crate::display::Color;
use crate::geometry::Point;
use crate::raster::LineAlgorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "rasterpad.json";

const DEFAULT_MQTT_PORT: u16 = 1883;
const DEFAULT_MQTT_TOPIC: &str = "rasterpad";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Broker to subscribe to for remote transform commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttConfig {
    pub host: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    #[serde(default = "default_mqtt_topic")]
    pub topic: String,
}

fn default_mqtt_port() -> u16 {
    DEFAULT_MQTT_PORT
}

fn default_mqtt_topic() -> String {
    DEFAULT_MQTT_TOPIC.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    /// Inset of the clip viewport from every canvas edge
    pub margin: u32,
    pub background: Color,
    /// Initial drawing color
    pub color: Color,
    pub algorithm: LineAlgorithm,
    /// Tangent given to newly placed Hermite anchors
    pub hermite_tangent: Point,
    /// Degrees per keyboard rotation step
    pub rotate_step: f64,
    /// Factor per keyboard scale step
    pub scale_step: f64,
    pub wheel_scale_up: f64,
    pub wheel_scale_down: f64,
    pub shear_factor: f64,
    pub mqtt: Option<MqttConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            margin: crate::clip::DEFAULT_MARGIN,
            background: Color::WHITE,
            color: Color::BLUE,
            algorithm: LineAlgorithm::Dda,
            hermite_tangent: Point::new(0, 150),
            rotate_step: 15.0,
            scale_step: 1.25,
            wheel_scale_up: 1.1,
            wheel_scale_down: 0.9,
            shear_factor: 0.2,
            mqtt: None,
        }
    }
}

impl Config {
    /// Load from `path`, returning defaults if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self)
            .map_err(std::io::Error::from)
            .map_err(write_err)?;
        fs::write(path, json).map_err(write_err)
    }
}
