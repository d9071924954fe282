//! Configuration types for kintree rendering and export.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining export settings and
//!   optional default styles.
//! - [`ExportConfig`] - Raster encoding and document padding settings.
//!
//! # Example
//!
//! ```
//! # use kintree::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.export().jpeg_quality(), 90);
//! assert!(config.style().is_none());
//! ```

use serde::Deserialize;

use kintree_core::family::StyleConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Styles applied to family data that carries none of its own.
    #[serde(default)]
    style: Option<StyleConfig>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    ///
    /// # Arguments
    ///
    /// * `export` - Export settings.
    /// * `style` - Default styles for data files without a `styles` section.
    pub fn new(export: ExportConfig, style: Option<StyleConfig>) -> Self {
        Self { export, style }
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the default styles, if configured.
    pub fn style(&self) -> Option<&StyleConfig> {
        self.style.as_ref()
    }
}

/// Settings for the export stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// JPEG quality, clamped to `1..=100`.
    jpeg_quality: u8,

    /// Space added around the content on every side of the document.
    padding: f32,

    /// Whether raster export loads the system font database.
    load_system_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            padding: 20.0,
            load_system_fonts: true,
        }
    }
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`].
    pub fn new(jpeg_quality: u8, padding: f32, load_system_fonts: bool) -> Self {
        Self {
            jpeg_quality,
            padding,
            load_system_fonts,
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }

    /// Padding around the content; negative values are treated as zero.
    pub fn padding(&self) -> f32 {
        self.padding.max(0.0)
    }

    pub fn load_system_fonts(&self) -> bool {
        self.load_system_fonts
    }
}
