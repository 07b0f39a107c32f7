//! Tool configuration.
//!
//! Configuration is optional. Without `--config` the stock defaults apply;
//! with it, the given TOML file is read and its values override the defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! filter = "catmullrom"   # nearest | triangle | catmullrom | gaussian | lanczos3
//!
//! [thumbnail]
//! filter = "catmullrom"
//! default_size = 128      # Bounding box when --size is omitted
//!
//! [output]
//! jpeg_quality = 75       # 1-100, JPEG output only
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{DEFAULT_THUMBNAIL_SIZE, OperationSettings, Quality, Resampling};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub resize: ResizeConfig,
    pub thumbnail: ThumbnailConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: Resampling,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailConfig {
    pub filter: Resampling,
    /// Bounding box used when `--size` is not given.
    pub default_size: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            filter: Resampling::default(),
            default_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::default().value() as u32,
        }
    }
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.thumbnail.default_size == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.default_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The operation settings this config describes.
    pub fn settings(&self) -> OperationSettings {
        OperationSettings {
            resize_filter: self.resize.filter,
            thumbnail_filter: self.thumbnail.filter,
            thumbnail_size: self.thumbnail.default_size,
            quality: Quality::new(self.output.jpeg_quality),
        }
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ToolConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path`, or the stock defaults when no path is given.
pub fn resolve_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ToolConfig::default()),
    }
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-tool configuration
# ========================
# Pass with: image-tool --config image-tool.toml <command> ...
# Every key is optional; omitted keys keep the values shown here.

[resize]
# Resampling filter for `resize`.
# One of: nearest, triangle, catmullrom, gaussian, lanczos3
filter = "catmullrom"

[thumbnail]
# Resampling filter for `thumbnail`.
filter = "catmullrom"
# Bounding box (pixels) used when --size is not given.
default_size = 128

[output]
# JPEG encoding quality, 1 (smallest) to 100 (best).
# Other output formats are lossless or use their encoder defaults.
jpeg_quality = 75
"##
}
