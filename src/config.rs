/// Window and timing configuration.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::Rgb;

/// Settings for the surface the driver creates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    pub title: String,
    pub background_color: Rgb,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Scene Experiment".to_string(),
            background_color: Rgb(30, 30, 30),
        }
    }
}

/// Frame timing for the main loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub fps: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub window: WindowSettings,
    pub timing: TimingSettings,
}

impl GameConfig {
    /// Load a configuration file.  Only TOML is understood.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
