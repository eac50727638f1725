use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scroll::Axis;

/// Default animation length in milliseconds
pub const DEFAULT_DURATION_MS: u64 = 500;

/// Default easing curve
pub const DEFAULT_TRANSITION: &str = "ease";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scroll: ScrollConfig,
}

/// Fallback values used when a scroll call leaves an option unset or invalid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Scroll axis: anything containing "x" is horizontal, everything else vertical
    #[serde(default = "default_axis")]
    pub axis: String,
    /// Animation length in milliseconds (0 falls back to 500)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Pixels added to every resolved target before clamping.
    /// Negative values overshoot a target, e.g. to clear a sticky header.
    #[serde(default)]
    pub offset_px: i64,
    /// Easing curve name
    #[serde(default = "default_transition")]
    pub transition: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axis: default_axis(),
            duration_ms: default_duration_ms(),
            offset_px: 0,
            transition: default_transition(),
        }
    }
}

fn default_axis() -> String {
    "y".to_string()
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_transition() -> String {
    DEFAULT_TRANSITION.to_string()
}

impl ScrollConfig {
    /// Configured axis
    pub fn axis(&self) -> Axis {
        Axis::parse(&self.axis)
    }

    /// Configured duration, with zero replaced by the built-in default
    pub fn duration_ms(&self) -> u64 {
        if self.duration_ms == 0 {
            DEFAULT_DURATION_MS
        } else {
            self.duration_ms
        }
    }
}

impl Config {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Load configuration from file or return defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize configuration as pretty TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
