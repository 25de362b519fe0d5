#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Locality-to-boundary join, region coloring, and layered map assembly.
//!
//! A render pass takes a locality table and a boundary collection, joins
//! them on normalized names, colors each region from a fixed palette, and
//! assembles a [`MapArtifact`] with a base layer plus one layer per region.
//!
//! Every step is a pure function of its inputs. Unmatched names on either
//! side are reported in the artifact rather than treated as failures.

pub mod builder;
pub mod centroid;
pub mod colors;
pub mod join;
pub mod normalize;

use region_map_theme_models::{Color, GeometryFeature, LocalityRecord, MapArtifact};
use thiserror::Error;

pub use builder::{MapBuilder, MapOptions};
pub use colors::{ColorMap, DEFAULT_PALETTE, default_palette};
pub use join::{JoinOutcome, RegionPartition};

/// Errors that can occur during a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// A centroid was requested for a geometry with no vertices.
    #[error("Geometry '{name}' has no vertices")]
    EmptyGeometry {
        /// Name of the offending feature, if known.
        name: String,
    },

    /// Color assignment was invoked without any palette colors.
    #[error("Color palette is empty")]
    EmptyPalette,

    /// The join was invoked with no localities and no geometries.
    #[error("Nothing to join: both the locality table and the boundary collection are empty")]
    EmptyInput,

    /// The map was built from an empty boundary collection.
    #[error("Cannot center a map with no boundaries")]
    EmptyGeometryCollection,

    /// A partitioned region had no color assigned.
    #[error("No color assigned to region '{region}'")]
    MissingColor {
        /// The region without a color.
        region: String,
    },
}

/// Runs the whole pipeline: join, color, build.
///
/// Colors are assigned in the order regions first appear among matched
/// localities in the table, while region layers keep the boundary scan
/// order. Both orders cover the same set of regions, so every layer gets a
/// color, and identical input always yields an identical artifact.
///
/// # Errors
///
/// * [`ThemeError::EmptyInput`] if both inputs are empty
/// * [`ThemeError::EmptyPalette`] if `palette` is empty
/// * [`ThemeError::EmptyGeometryCollection`] if there are localities but no
///   boundaries
/// * [`ThemeError::EmptyGeometry`] if a boundary has no vertices
pub fn render(
    localities: Vec<LocalityRecord>,
    geometries: &[GeometryFeature],
    palette: &[Color],
    options: &MapOptions,
) -> Result<MapArtifact, ThemeError> {
    let outcome = join::join(localities, geometries)?;

    let color_map = colors::assign_colors(outcome.region_order.as_slice(), palette)?;
    log::debug!(
        "Assigned {} palette colors to {} regions",
        palette.len(),
        color_map.len()
    );

    MapBuilder::new(options.clone()).build(geometries, outcome, &color_map)
}

#[cfg(test)]
mod tests {
    use region_map_theme_models::BoundaryGeometry;

    use super::*;

    fn square(origin: f64) -> BoundaryGeometry {
        BoundaryGeometry::Polygon(vec![vec![
            [origin, origin],
            [origin, origin + 2.0],
            [origin + 2.0, origin + 2.0],
            [origin + 2.0, origin],
        ]])
    }

    fn fixture() -> (Vec<LocalityRecord>, Vec<GeometryFeature>) {
        let localities = vec![
            LocalityRecord::new("Campinas", "Interior"),
            LocalityRecord::new("São Paulo", "Metropolitana"),
            LocalityRecord::new("Santos", "Litoral"),
            LocalityRecord::new("Guarulhos", "Metropolitana"),
            LocalityRecord::new("Atlantis", "Lost"),
        ];
        let geometries = vec![
            GeometryFeature::new("SÃO PAULO", square(0.0)),
            GeometryFeature::new("Santos", square(2.0)),
            GeometryFeature::new("guarulhos", square(4.0)),
            GeometryFeature::new("Campinas", square(6.0)),
            GeometryFeature::new("Nowhere", square(8.0)),
        ];
        (localities, geometries)
    }

    #[test]
    fn renders_layers_in_first_seen_order() {
        let (localities, geometries) = fixture();
        let artifact = render(
            localities,
            &geometries,
            &default_palette(),
            &MapOptions::default(),
        )
        .unwrap();

        let regions: Vec<&str> = artifact
            .region_layers
            .iter()
            .map(|g| g.region.as_str())
            .collect();
        assert_eq!(regions, vec!["Metropolitana", "Litoral", "Interior"]);

        let colors: Vec<&str> = artifact
            .region_layers
            .iter()
            .map(|g| g.color.as_str())
            .collect();
        // Table order is Interior, Metropolitana, Litoral.
        assert_eq!(colors, vec![DEFAULT_PALETTE[1], DEFAULT_PALETTE[2], DEFAULT_PALETTE[0]]);

        assert_eq!(artifact.region_layers[0].features.len(), 2);
        assert_eq!(artifact.unmatched_geometries[0].name, "Nowhere");
        assert_eq!(artifact.unmatched_localities[0].name, "Atlantis");
        assert_eq!(artifact.base_layer.len(), 5);
    }

    #[test]
    fn colors_follow_table_order_when_boundaries_are_reversed() {
        let localities = vec![
            LocalityRecord::new("a", "R1"),
            LocalityRecord::new("b", "R2"),
        ];
        let geometries = vec![
            GeometryFeature::new("B", square(0.0)),
            GeometryFeature::new("A", square(2.0)),
        ];
        let palette = vec![Color::from("p0"), Color::from("p1")];

        let artifact = render(localities, &geometries, &palette, &MapOptions::default())
            .unwrap();

        let layers: Vec<(&str, &str)> = artifact
            .region_layers
            .iter()
            .map(|g| (g.region.as_str(), g.color.as_str()))
            .collect();
        assert_eq!(layers, vec![("R2", "p1"), ("R1", "p0")]);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let (localities, geometries) = fixture();
        let palette = vec![Color::from("red"), Color::from("blue")];
        let options = MapOptions::default();

        let first = render(localities.clone(), &geometries, &palette, &options).unwrap();
        let second = render(localities, &geometries, &palette, &options).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn render_rejects_empty_palette() {
        let (localities, geometries) = fixture();
        let result = render(localities, &geometries, &[], &MapOptions::default());
        assert_eq!(result, Err(ThemeError::EmptyPalette));
    }

    #[test]
    fn render_with_no_boundaries_cannot_center() {
        let localities = vec![LocalityRecord::new("X", "R")];
        let result = render(localities, &[], &default_palette(), &MapOptions::default());
        assert_eq!(result, Err(ThemeError::EmptyGeometryCollection));
    }

    #[test]
    fn render_with_nothing_is_empty_input() {
        let result = render(vec![], &[], &default_palette(), &MapOptions::default());
        assert_eq!(result, Err(ThemeError::EmptyInput));
    }
}
