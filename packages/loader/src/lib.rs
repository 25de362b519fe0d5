#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV/`.xlsx` locality table and `GeoJSON` boundary loading.
//!
//! Turns the two input files into [`LocalityRecord`]s and
//! [`GeometryFeature`]s. All format problems (missing columns, unnamed
//! features, non-polygon geometries) are reported here, before a render
//! pass starts.
//!
//! [`LocalityRecord`]: region_map_theme_models::LocalityRecord
//! [`GeometryFeature`]: region_map_theme_models::GeometryFeature

pub mod boundaries;
pub mod localities;
pub mod workbook;

use thiserror::Error;

pub use boundaries::{DEFAULT_NAME_PROPERTY, load_boundaries, load_boundaries_from_path};
pub use localities::{LocalityColumns, TableFormat, load_localities, load_localities_from_path};
pub use workbook::load_localities_xlsx;

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The locality table is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The locality table is not a readable `.xlsx` workbook.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// The locality workbook has no worksheets.
    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    /// The boundary file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A required column is absent from the locality table header.
    #[error("Column '{column}' not found in locality table (available: {})", .available.join(", "))]
    MissingColumn {
        /// The column that was looked up.
        column: String,
        /// Trimmed header names that were present.
        available: Vec<String>,
    },

    /// The boundary file is `GeoJSON` but not a `FeatureCollection`.
    #[error("Boundary file must be a GeoJSON FeatureCollection, found {found}")]
    NotFeatureCollection {
        /// What the document was instead.
        found: &'static str,
    },

    /// A boundary feature has no usable name property.
    #[error("Feature #{index} has no '{property}' property")]
    MissingName {
        /// Zero-based position in the collection.
        index: usize,
        /// The property that was looked up.
        property: String,
    },

    /// A boundary feature's geometry is absent or not a polygon.
    #[error("Feature '{name}' has unsupported geometry {kind} (expected Polygon or MultiPolygon)")]
    UnsupportedGeometry {
        /// Feature name.
        name: String,
        /// `GeoJSON` geometry type, or `"null"`.
        kind: String,
    },

    /// A coordinate has fewer than two components.
    #[error("Feature '{name}' has a coordinate with fewer than two components")]
    InvalidCoordinate {
        /// Feature name.
        name: String,
    },
}
