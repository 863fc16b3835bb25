//! Editor configuration.
//!
//! Everything has a default, and the defaults are what the tool does when run
//! with nothing but a folder argument. A TOML file passed with `--config`
//! overrides individual values:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [crop]
//! min_remaining = 50        # Pixels a crop must leave on each axis
//! edge_tolerance = 15       # Display pixels around a crop line that grab it
//!
//! [output]
//! quality = 95              # JPEG quality for saved images (1-100)
//!
//! [dates]
//! recent_capacity = 9       # Recent dates offered for quick select (1-9)
//!
//! [scan]
//! extensions = ["jpg", "jpeg", "png", "tiff", "tif", "bmp"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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

/// Editor configuration loaded from an optional TOML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Crop handle interaction and limits.
    pub crop: CropConfig,
    /// Encoding of saved images.
    pub output: OutputConfig,
    /// Recent-dates list.
    pub dates: DatesConfig,
    /// Which files in the folder are reviewed.
    pub scan: ScanConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if !(1..=9).contains(&self.dates.recent_capacity) {
            return Err(ConfigError::Validation(
                "dates.recent_capacity must be 1-9".into(),
            ));
        }
        if self.crop.min_remaining == 0 {
            return Err(ConfigError::Validation(
                "crop.min_remaining must be non-zero".into(),
            ));
        }
        if self.crop.edge_tolerance == 0 {
            return Err(ConfigError::Validation(
                "crop.edge_tolerance must be non-zero".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Minimum pixels a crop leaves on each axis.
    pub min_remaining: u32,
    /// Distance in display pixels within which a crop line can be grabbed.
    pub edge_tolerance: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_remaining: 50,
            edge_tolerance: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1-100).
    pub quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { quality: 95 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatesConfig {
    /// How many recently used dates are kept for quick select.
    pub recent_capacity: usize,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self { recent_capacity: 9 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (case-insensitive, no dot) treated as images.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "tiff", "tif", "bmp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ScanConfig {
    /// Whether `path` has one of the configured extensions.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Load config from `path`, or the stock defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let content = fs::read_to_string(path)?;
    let config: EditorConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented config file with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Review Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass this file with: photo-review <folder> --config photo-review.toml
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Crop handles
# ---------------------------------------------------------------------------
[crop]
# Pixels of the image a crop must leave on each axis.
min_remaining = 50

# How close (in screen pixels) the pointer must be to a crop line to grab it.
edge_tolerance = 15

# ---------------------------------------------------------------------------
# Saved images
# ---------------------------------------------------------------------------
[output]
# JPEG encoding quality (1 = worst, 100 = best).
quality = 95

# ---------------------------------------------------------------------------
# Dates
# ---------------------------------------------------------------------------
[dates]
# Recently used dates offered on keys 1-9.
recent_capacity = 9

# ---------------------------------------------------------------------------
# Folder scan
# ---------------------------------------------------------------------------
[scan]
# Extensions (case-insensitive) of files to review.
extensions = ["jpg", "jpeg", "png", "tiff", "tif", "bmp"]
"##
}
