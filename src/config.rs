//! Configuration file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::normalize::{PageSize, ResizeFilter};
use crate::partition::AxisMode;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default values used when a CLI flag is not given.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Page size tiles are stretched to when normalizing.
    #[serde(default)]
    pub page: PageSize,
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Which axes to split.
    pub mode: AxisMode,
    /// Tiles across the width.
    pub columns: u32,
    /// Tiles down the height.
    pub rows: u32,
    /// Output format name.
    pub format: String,
    /// Output directory; `<stem>_tiles` when unset.
    pub output_dir: Option<PathBuf>,
    /// Stretch every tile to the page size.
    pub normalize: bool,
    /// Resampling filter for normalization.
    pub filter: ResizeFilter,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: AxisMode::Both,
            columns: 1,
            rows: 1,
            format: "png".to_string(),
            output_dir: None,
            normalize: false,
            filter: ResizeFilter::Lanczos3,
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `RASTERBATE_CONFIG` environment variable
/// 3. `~/.config/rasterbate/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Ok(p) = std::env::var("RASTERBATE_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/rasterbate/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/rasterbate/config.toml")
    } else {
        PathBuf::from("rasterbate.toml")
    }
}
