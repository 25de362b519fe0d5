#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone Leaflet HTML and themed `GeoJSON` export.
//!
//! Serializes a finished [`MapArtifact`] for display. The HTML output is a
//! single self-contained page (Leaflet and its fullscreen plugin load from
//! a CDN) with a togglable boundary layer and one togglable layer per
//! region. The `GeoJSON` output is a `FeatureCollection` of every matched
//! boundary tagged with its region and color.
//!
//! [`MapArtifact`]: region_map_theme_models::MapArtifact

pub mod geojson_export;
pub mod html;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use geojson_export::{to_feature_collection, write_feature_collection};
pub use html::{render_html, write_html};

/// Errors that can occur while exporting a map.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing map data failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Presentation settings for the HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    /// Page title.
    pub title: String,
    /// Layer control label for the all-boundaries layer.
    pub base_layer_name: String,
    /// Text shown before the boundary name in hover tooltips.
    pub tooltip_label: String,
    /// Slippy-map tile URL template.
    pub tiles_url: String,
    /// Attribution HTML for the tile layer.
    pub attribution: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Mapa de Cidades por Estado".to_string(),
            base_layer_name: "Estado".to_string(),
            tooltip_label: "Cidade:".to_string(),
            tiles_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
        }
    }
}
