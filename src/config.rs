//! Book configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives next
//! to the pages file and overrides the stock defaults key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [viewer]
//! settle_ms = 700           # Page-turn lock release (milliseconds)
//! spread_breakpoint = 1024  # Viewport width (px) from which spreads are shown
//! swipe_threshold = 50      # Minimum horizontal swipe distance (px)
//!
//! [frame]
//! aspect_ratio = [4, 3]     # Photo page frame, width:height
//! collage_aspect_ratio = [1, 1]
//! collage_max_photos = 5    # Photos shown on a collage page
//!
//! [images]
//! rewrite_drive_links = true  # Rewrite Drive sharing links to direct URLs
//! thumbnail_size = 400        # Width of Drive thumbnails (px)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! [viewer]
//! settle_ms = 500
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
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

/// Book configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Navigation timing and view-mode selection.
    pub viewer: ViewerConfig,
    /// Photo frame shapes.
    pub frame: FrameConfig,
    /// Image URL handling.
    pub images: ImagesConfig,
}

impl BookConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewer.settle_ms == 0 {
            return Err(ConfigError::Validation(
                "viewer.settle_ms must be greater than 0".into(),
            ));
        }
        if self.viewer.spread_breakpoint == 0 {
            return Err(ConfigError::Validation(
                "viewer.spread_breakpoint must be greater than 0".into(),
            ));
        }
        if !self.viewer.swipe_threshold.is_finite() || self.viewer.swipe_threshold < 0.0 {
            return Err(ConfigError::Validation(
                "viewer.swipe_threshold must be a non-negative number".into(),
            ));
        }
        for (key, ratio) in [
            ("frame.aspect_ratio", self.frame.aspect_ratio),
            ("frame.collage_aspect_ratio", self.frame.collage_aspect_ratio),
        ] {
            if ratio[0] == 0 || ratio[1] == 0 {
                return Err(ConfigError::Validation(format!(
                    "{key} values must be non-zero"
                )));
            }
        }
        if self.frame.collage_max_photos == 0 {
            return Err(ConfigError::Validation(
                "frame.collage_max_photos must be at least 1".into(),
            ));
        }
        if self.images.thumbnail_size == 0 {
            return Err(ConfigError::Validation(
                "images.thumbnail_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Viewer behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// How long a page turn holds the navigation lock, in milliseconds.
    pub settle_ms: u64,
    /// Viewport width in pixels at which two-page spreads are shown.
    pub spread_breakpoint: u32,
    /// Minimum horizontal swipe distance in pixels.
    pub swipe_threshold: f64,
}

impl ViewerConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            settle_ms: 700,
            spread_breakpoint: 1024,
            swipe_threshold: 50.0,
        }
    }
}

/// Photo frame shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Photo page frame as `[width, height]`.
    pub aspect_ratio: [u32; 2],
    /// Collage frame as `[width, height]`.
    pub collage_aspect_ratio: [u32; 2],
    /// Maximum photos shown on a collage page.
    pub collage_max_photos: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: [4, 3],
            collage_aspect_ratio: [1, 1],
            collage_max_photos: 5,
        }
    }
}

/// Image URL handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Rewrite Google Drive sharing links to direct image URLs.
    pub rewrite_drive_links: bool,
    /// Width of Drive thumbnails in pixels.
    pub thumbnail_size: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            rewrite_drive_links: true,
            thumbnail_size: 400,
        }
    }
}

/// Render an aspect ratio as a CSS `aspect-ratio` value, e.g. `4/3`.
pub fn aspect_ratio_css(ratio: [u32; 2]) -> String {
    format!("{}/{}", ratio[0], ratio[1])
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BookConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BookConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BookConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<BookConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Scrapbook Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to the pages file. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Viewer
# ---------------------------------------------------------------------------
[viewer]
# How long a page turn blocks further navigation, in milliseconds. The lock
# is released after this long even if the animation never reports back.
settle_ms = 700

# Viewport width (px) from which two pages are shown side by side.
spread_breakpoint = 1024

# Minimum horizontal swipe distance (px) that turns a page.
swipe_threshold = 50.0

# ---------------------------------------------------------------------------
# Photo frames
# ---------------------------------------------------------------------------
[frame]
# Frame of a single photo page as [width, height].
aspect_ratio = [4, 3]

# Frame of each collage photo as [width, height].
collage_aspect_ratio = [1, 1]

# Photos shown on a collage page; extra photos are skipped.
collage_max_photos = 5

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Rewrite Google Drive sharing links to direct image URLs.
rewrite_drive_links = true

# Width (px) of Drive thumbnails.
thumbnail_size = 400
"##
}
