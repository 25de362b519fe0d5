//! TOML configuration for the `region_map` CLI.
//!
//! Every section and key is optional. Missing values fall back to the
//! defaults below, and command-line flags override the file.
//!
//! ```toml
//! [columns]
//! name = "Municipio"
//! region = "Mesorregiao"
//!
//! [boundaries]
//! name_property = "name"
//!
//! [map]
//! zoom = 6
//! region_fill_opacity = 0.6
//! palette = ["#0066CC", "#009900", "#FFA95B"]
//!
//! [map.base_style]
//! fill_color = "lightgray"
//! stroke_color = "black"
//! weight = 0.5
//! fill_opacity = 0.2
//!
//! [export]
//! title = "Municípios por Mesorregião"
//! tooltip_label = "Município:"
//! ```

use std::path::Path;

use region_map_export::ExportOptions;
use region_map_loader::{DEFAULT_NAME_PROPERTY, LocalityColumns};
use region_map_theme::{DEFAULT_PALETTE, MapOptions};
use region_map_theme_models::{Color, LayerStyle};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Locality table column names.
    pub columns: LocalityColumns,
    /// Boundary file settings.
    pub boundaries: BoundariesConfig,
    /// Map theming.
    pub map: MapConfig,
    /// HTML page settings.
    pub export: ExportOptions,
}

impl Config {
    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses a TOML config string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the content is not valid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Boundary file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundariesConfig {
    /// Feature property holding the boundary name.
    pub name_property: String,
}

impl Default for BoundariesConfig {
    fn default() -> Self {
        Self {
            name_property: DEFAULT_NAME_PROPERTY.to_string(),
        }
    }
}

/// Map theming settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// Initial zoom level.
    pub zoom: u8,
    /// Region colors, assigned in order and cycled.
    pub palette: Vec<String>,
    /// Fill opacity for region layers.
    pub region_fill_opacity: f64,
    /// Style of the all-boundaries layer.
    pub base_style: BaseStyleConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: MapOptions::DEFAULT_ZOOM,
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            region_fill_opacity: MapOptions::DEFAULT_REGION_FILL_OPACITY,
            base_style: BaseStyleConfig::default(),
        }
    }
}

impl MapConfig {
    /// The configured palette as colors.
    #[must_use]
    pub fn palette(&self) -> Vec<Color> {
        self.palette.iter().map(|c| Color::new(c.as_str())).collect()
    }

    /// Builder options for this configuration.
    #[must_use]
    pub fn options(&self) -> MapOptions {
        MapOptions {
            zoom: self.zoom,
            base_style: LayerStyle {
                fill_color: Color::new(self.base_style.fill_color.as_str()),
                stroke_color: Color::new(self.base_style.stroke_color.as_str()),
                weight: self.base_style.weight,
                fill_opacity: self.base_style.fill_opacity,
            },
            region_fill_opacity: self.region_fill_opacity,
        }
    }
}

/// Style of the all-boundaries layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseStyleConfig {
    /// Fill color.
    pub fill_color: String,
    /// Outline color.
    pub stroke_color: String,
    /// Outline width in pixels.
    pub weight: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
}

impl Default for BaseStyleConfig {
    fn default() -> Self {
        let style = LayerStyle::default();
        Self {
            fill_color: style.fill_color.to_string(),
            stroke_color: style.stroke_color.to_string(),
            weight: style.weight,
            fill_opacity: style.fill_opacity,
        }
    }
}
