//! Device Configuration
//!
//! Creation parameters for a [`Device`](super::Device). Every field has a
//! default, so a JSON file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::{ClickSettings, DEFAULT_CLICK_TOLERANCE_PX, DEFAULT_DOUBLE_CLICK_MS};

/// Video driver requested at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverType {
    /// Window plus OpenGL context
    OpenGl,
    /// No window, no-op driver
    Null,
    Direct3D8,
    Direct3D9,
    Software,
    BurningsVideo,
}

/// Where key events come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeySource {
    /// Character events. The typed codepoint is looked up as if it were a
    /// native key, every event is a press, and Shift/Control are only set
    /// when that modifier is held alone.
    #[default]
    Character,
    /// Physical key events. Presses and releases are both reported,
    /// modifiers are bit-tested, and no character is attached.
    PhysicalKey,
}

/// Device creation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Initial client area size in pixels
    pub window_size: [u32; 2],
    /// Colour depth, 16 or 32
    pub bits: u8,
    pub with_alpha_channel: bool,
    /// Depth buffer bits, 0 means 24
    pub z_buffer_bits: u8,
    pub stencil_buffer: bool,
    pub double_buffer: bool,
    pub stereo_buffer: bool,
    /// MSAA samples requested, 0 or 1 for none
    pub anti_alias: u8,
    pub fullscreen: bool,
    /// Skip event reporting altogether
    pub ignore_input: bool,
    pub driver_type: DriverType,
    pub caption: String,
    pub key_source: KeySource,
    pub double_click_time_ms: u32,
    pub click_tolerance_px: i32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            window_size: [800, 600],
            bits: 32,
            with_alpha_channel: false,
            z_buffer_bits: 24,
            stencil_buffer: true,
            double_buffer: true,
            stereo_buffer: false,
            anti_alias: 0,
            fullscreen: false,
            ignore_input: false,
            driver_type: DriverType::OpenGl,
            caption: "GLFW3 device window".to_string(),
            key_source: KeySource::Character,
            double_click_time_ms: DEFAULT_DOUBLE_CLICK_MS,
            click_tolerance_px: DEFAULT_CLICK_TOLERANCE_PX,
        }
    }
}

impl DeviceConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn click_settings(&self) -> ClickSettings {
        ClickSettings {
            time_window_ms: self.double_click_time_ms,
            tolerance_px: self.click_tolerance_px,
        }
    }
}

/// Errors that can occur while loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}
