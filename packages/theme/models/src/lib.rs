#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Locality, boundary, and layered map artifact types.
//!
//! These types flow through a single render pass: locality rows and
//! boundary features come in, a [`MapArtifact`] comes out. None of them
//! are mutated after construction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `[longitude, latitude]` coordinate pair, in `GeoJSON` axis order.
pub type Position = [f64; 2];

/// An ordered sequence of vertices. Closing vertices are kept as given.
pub type Ring = Vec<Position>;

/// One row of the locality table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityRecord {
    /// Locality name as it appears in the table (join key).
    pub name: String,
    /// Grouping region label used for theming.
    pub region: String,
}

impl LocalityRecord {
    /// Creates a record from any string-like name and region.
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }
}

/// Polygon boundary geometry.
///
/// Ring nesting follows `GeoJSON`: a polygon is a list of rings (exterior
/// first, then holes) and a multipolygon is a list of polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum BoundaryGeometry {
    /// A single polygon.
    Polygon(Vec<Ring>),
    /// A collection of polygons.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl BoundaryGeometry {
    /// Returns the first ring of the first constituent polygon.
    ///
    /// For a polygon this is the exterior ring. For a multipolygon the
    /// remaining parts are ignored.
    #[must_use]
    pub fn first_ring(&self) -> Option<&Ring> {
        match self {
            Self::Polygon(rings) => rings.first(),
            Self::MultiPolygon(polygons) => polygons.first().and_then(|rings| rings.first()),
        }
    }

    /// `GeoJSON` geometry type name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// A named boundary from the geometry collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryFeature {
    /// Feature name as it appears in the collection (join key).
    pub name: String,
    /// Boundary geometry.
    pub geometry: BoundaryGeometry,
    /// All properties of the source feature, unmodified.
    #[serde(default)]
    pub raw_properties: serde_json::Map<String, serde_json::Value>,
}

impl GeometryFeature {
    /// Creates a feature with an empty property map.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: BoundaryGeometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            raw_properties: serde_json::Map::new(),
        }
    }
}

/// A representative point, in `(latitude, longitude)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A display color, stored exactly as configured (hex code or CSS name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    /// Creates a color from a hex code or CSS color name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the color string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fill and stroke styling for a polygon layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    /// Polygon fill color.
    pub fill_color: Color,
    /// Outline color.
    pub stroke_color: Color,
    /// Outline width in pixels.
    pub weight: f64,
    /// Fill opacity in `0.0..=1.0`.
    pub fill_opacity: f64,
}

impl LayerStyle {
    /// Outline color shared by every layer unless configured otherwise.
    pub const DEFAULT_STROKE: &'static str = "black";

    /// Outline width shared by every layer unless configured otherwise.
    pub const DEFAULT_WEIGHT: f64 = 0.5;
}

impl Default for LayerStyle {
    /// The low-opacity gray style used for the context layer.
    fn default() -> Self {
        Self {
            fill_color: Color::from("lightgray"),
            stroke_color: Color::from(Self::DEFAULT_STROKE),
            weight: Self::DEFAULT_WEIGHT,
            fill_opacity: 0.2,
        }
    }
}

/// All matched boundaries of one region, bound to the region's color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionGroup {
    /// Region label.
    pub region: String,
    /// Color resolved for this region when the group was built.
    pub color: Color,
    /// Matched features, in geometry-collection order.
    pub features: Vec<GeometryFeature>,
}

impl RegionGroup {
    /// Style for this group's polygons at the given fill opacity.
    #[must_use]
    pub fn style(&self, fill_opacity: f64) -> LayerStyle {
        LayerStyle {
            fill_color: self.color.clone(),
            stroke_color: Color::from(LayerStyle::DEFAULT_STROKE),
            weight: LayerStyle::DEFAULT_WEIGHT,
            fill_opacity,
        }
    }
}

/// The composed, render-ready map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapArtifact {
    /// Initial viewport center.
    pub center: Centroid,
    /// Initial zoom level.
    pub zoom: u8,
    /// Every input boundary, drawn underneath the region layers.
    pub base_layer: Vec<GeometryFeature>,
    /// Style for [`Self::base_layer`].
    pub base_style: LayerStyle,
    /// One layer per region, in first-seen order.
    pub region_layers: Vec<RegionGroup>,
    /// Fill opacity for region layers.
    pub region_fill_opacity: f64,
    /// Boundaries whose name matched no locality.
    pub unmatched_geometries: Vec<GeometryFeature>,
    /// Localities whose name matched no boundary.
    pub unmatched_localities: Vec<LocalityRecord>,
}

impl MapArtifact {
    /// Counts describing how well the join went.
    #[must_use]
    pub fn summary(&self) -> RenderSummary {
        let matched_features = self
            .region_layers
            .iter()
            .map(|group| group.features.len())
            .sum();

        RenderSummary {
            geometries: self.base_layer.len(),
            regions: self.region_layers.len(),
            matched_features,
            unmatched_geometries: self.unmatched_geometries.len(),
            unmatched_localities: self.unmatched_localities.len(),
        }
    }
}

/// Join and layer counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSummary {
    /// Number of input boundaries.
    pub geometries: usize,
    /// Number of region layers.
    pub regions: usize,
    /// Boundaries placed in a region layer.
    pub matched_features: usize,
    /// Boundaries with no locality.
    pub unmatched_geometries: usize,
    /// Localities with no boundary.
    pub unmatched_localities: usize,
}

impl fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} boundaries, {} matched into {} regions, {} unmatched boundaries, {} unmatched localities",
            self.geometries,
            self.matched_features,
            self.regions,
            self.unmatched_geometries,
            self.unmatched_localities,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]
    }

    #[test]
    fn polygon_first_ring_is_exterior() {
        let hole = vec![[0.5, 0.5], [0.5, 1.0], [1.0, 1.0]];
        let geometry = BoundaryGeometry::Polygon(vec![square(), hole]);
        assert_eq!(geometry.first_ring(), Some(&square()));
    }

    #[test]
    fn multipolygon_first_ring_ignores_other_parts() {
        let other = vec![[10.0, 10.0], [10.0, 12.0], [12.0, 12.0]];
        let geometry = BoundaryGeometry::MultiPolygon(vec![vec![square()], vec![other]]);
        assert_eq!(geometry.first_ring(), Some(&square()));
    }

    #[test]
    fn empty_geometries_have_no_first_ring() {
        assert_eq!(BoundaryGeometry::Polygon(vec![]).first_ring(), None);
        assert_eq!(BoundaryGeometry::MultiPolygon(vec![vec![]]).first_ring(), None);
    }

    #[test]
    fn geometry_serializes_as_geojson_shape() {
        let geometry = BoundaryGeometry::Polygon(vec![vec![[1.0, 2.0]]]);
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "Polygon", "coordinates": [[[1.0, 2.0]]] })
        );
    }

    #[test]
    fn region_style_uses_group_color() {
        let group = RegionGroup {
            region: "Norte".to_string(),
            color: Color::from("#0066CC"),
            features: vec![],
        };
        let style = group.style(0.6);
        assert_eq!(style.fill_color.as_str(), "#0066CC");
        assert_eq!(style.stroke_color.as_str(), "black");
        assert!((style.fill_opacity - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_counts_matched_features() {
        let feature = GeometryFeature::new("a", BoundaryGeometry::Polygon(vec![square()]));
        let artifact = MapArtifact {
            center: Centroid {
                latitude: 1.0,
                longitude: 1.0,
            },
            zoom: 6,
            base_layer: vec![feature.clone(), feature.clone(), feature.clone()],
            base_style: LayerStyle::default(),
            region_layers: vec![RegionGroup {
                region: "R".to_string(),
                color: Color::from("red"),
                features: vec![feature.clone(), feature.clone()],
            }],
            region_fill_opacity: 0.6,
            unmatched_geometries: vec![feature],
            unmatched_localities: vec![LocalityRecord::new("x", "R")],
        };

        let summary = artifact.summary();
        assert_eq!(summary.geometries, 3);
        assert_eq!(summary.regions, 1);
        assert_eq!(summary.matched_features, 2);
        assert_eq!(summary.unmatched_geometries, 1);
        assert_eq!(summary.unmatched_localities, 1);
    }
}
