//! Layered map assembly.
//!
//! Combines the full boundary collection, the join outcome, and the region
//! colors into a [`MapArtifact`]: one context layer with every boundary,
//! one colored layer per region, and a viewport center.

use region_map_theme_models::{GeometryFeature, LayerStyle, MapArtifact, RegionGroup};

use crate::ThemeError;
use crate::centroid::mean_centroid;
use crate::colors::ColorMap;
use crate::join::JoinOutcome;

/// Presentation settings carried into the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Initial zoom level.
    pub zoom: u8,
    /// Style for the layer containing every boundary.
    pub base_style: LayerStyle,
    /// Fill opacity for region layers.
    pub region_fill_opacity: f64,
}

impl MapOptions {
    /// Default initial zoom, roughly one state or province in view.
    pub const DEFAULT_ZOOM: u8 = 6;

    /// Default region layer fill opacity.
    pub const DEFAULT_REGION_FILL_OPACITY: f64 = 0.6;
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: Self::DEFAULT_ZOOM,
            base_style: LayerStyle::default(),
            region_fill_opacity: Self::DEFAULT_REGION_FILL_OPACITY,
        }
    }
}

/// Builds [`MapArtifact`]s. Holds only presentation settings, so one
/// builder can be reused for any number of independent builds.
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    options: MapOptions,
}

impl MapBuilder {
    /// Creates a builder with the given presentation settings.
    #[must_use]
    pub const fn new(options: MapOptions) -> Self {
        Self { options }
    }

    /// Assembles the layered map.
    ///
    /// `geometries` is the complete boundary collection. It becomes the base
    /// layer unchanged, and the mean of its per-feature centroids becomes the
    /// viewport center. The join outcome is consumed: each partition entry
    /// becomes a [`RegionGroup`] bound to its color from `colors`, and the
    /// unmatched lists move into the artifact as they are.
    ///
    /// # Errors
    ///
    /// * [`ThemeError::EmptyGeometryCollection`] if `geometries` is empty
    /// * [`ThemeError::EmptyGeometry`] if a boundary has no vertices
    /// * [`ThemeError::MissingColor`] if a partitioned region has no entry in
    ///   `colors`
    pub fn build(
        &self,
        geometries: &[GeometryFeature],
        outcome: JoinOutcome,
        colors: &ColorMap,
    ) -> Result<MapArtifact, ThemeError> {
        let center = mean_centroid(geometries)?;
        log::debug!(
            "Map center at ({:.5}, {:.5}) from {} boundaries",
            center.latitude,
            center.longitude,
            geometries.len()
        );

        let JoinOutcome {
            partition,
            unmatched_geometries,
            unmatched_localities,
            region_order: _,
        } = outcome;

        let region_layers = partition
            .into_iter()
            .map(|(region, features)| {
                let color = colors
                    .get(&region)
                    .cloned()
                    .ok_or_else(|| ThemeError::MissingColor {
                        region: region.clone(),
                    })?;
                Ok(RegionGroup {
                    region,
                    color,
                    features,
                })
            })
            .collect::<Result<Vec<_>, ThemeError>>()?;

        Ok(MapArtifact {
            center,
            zoom: self.options.zoom,
            base_layer: geometries.to_vec(),
            base_style: self.options.base_style.clone(),
            region_layers,
            region_fill_opacity: self.options.region_fill_opacity,
            unmatched_geometries,
            unmatched_localities,
        })
    }
}

#[cfg(test)]
mod tests {
    use region_map_theme_models::{BoundaryGeometry, Centroid, Color, LocalityRecord};

    use super::*;
    use crate::centroid::centroid;
    use crate::join::join;

    fn feature(name: &str, x: f64, y: f64) -> GeometryFeature {
        GeometryFeature::new(
            name,
            BoundaryGeometry::Polygon(vec![vec![
                [x, y],
                [x + 2.0, y],
                [x + 2.0, y + 2.0],
                [x, y + 2.0],
            ]]),
        )
    }

    fn colors(entries: &[(&str, &str)]) -> ColorMap {
        entries
            .iter()
            .map(|&(region, color)| (region.to_string(), Color::from(color)))
            .collect()
    }

    #[test]
    fn empty_collection_is_rejected() {
        let result = MapBuilder::default().build(&[], JoinOutcome::default(), &ColorMap::new());
        assert_eq!(result, Err(ThemeError::EmptyGeometryCollection));
    }

    #[test]
    fn single_geometry_centers_on_its_centroid() {
        let geometries = vec![feature("a", 10.0, -20.0)];
        let expected = centroid(&geometries[0].geometry).unwrap();

        let artifact = MapBuilder::default()
            .build(&geometries, JoinOutcome::default(), &ColorMap::new())
            .unwrap();

        assert_eq!(artifact.center, expected);
        assert_eq!(
            artifact.center,
            Centroid {
                latitude: -19.0,
                longitude: 11.0
            }
        );
    }

    #[test]
    fn binds_each_region_to_its_color() {
        let geometries = vec![feature("a", 0.0, 0.0), feature("b", 4.0, 0.0)];
        let outcome = join(
            vec![LocalityRecord::new("a", "R"), LocalityRecord::new("b", "S")],
            &geometries,
        )
        .unwrap();

        let artifact = MapBuilder::default()
            .build(&geometries, outcome, &colors(&[("R", "red"), ("S", "blue")]))
            .unwrap();

        assert_eq!(artifact.region_layers.len(), 2);
        assert_eq!(artifact.region_layers[0].region, "R");
        assert_eq!(artifact.region_layers[0].color.as_str(), "red");
        assert_eq!(artifact.region_layers[1].region, "S");
        assert_eq!(artifact.region_layers[1].color.as_str(), "blue");
    }

    #[test]
    fn missing_color_is_rejected() {
        let geometries = vec![feature("a", 0.0, 0.0)];
        let outcome = join(vec![LocalityRecord::new("a", "R")], &geometries).unwrap();

        let result = MapBuilder::default().build(&geometries, outcome, &colors(&[("S", "blue")]));

        assert_eq!(
            result,
            Err(ThemeError::MissingColor {
                region: "R".to_string()
            })
        );
    }

    #[test]
    fn base_layer_is_the_full_collection() {
        let geometries = vec![feature("a", 0.0, 0.0), feature("zzz", 4.0, 0.0)];
        let outcome = join(vec![LocalityRecord::new("a", "R")], &geometries).unwrap();

        let artifact = MapBuilder::default()
            .build(&geometries, outcome, &colors(&[("R", "red")]))
            .unwrap();

        assert_eq!(artifact.base_layer, geometries);
        assert_eq!(artifact.unmatched_geometries.len(), 1);
        assert_eq!(artifact.unmatched_geometries[0].name, "zzz");
    }

    #[test]
    fn carries_presentation_options() {
        let options = MapOptions {
            zoom: 9,
            base_style: LayerStyle {
                fill_color: Color::from("white"),
                stroke_color: Color::from("gray"),
                weight: 1.0,
                fill_opacity: 0.1,
            },
            region_fill_opacity: 0.8,
        };
        let geometries = vec![feature("a", 0.0, 0.0)];

        let artifact = MapBuilder::new(options.clone())
            .build(&geometries, JoinOutcome::default(), &ColorMap::new())
            .unwrap();

        assert_eq!(artifact.zoom, 9);
        assert_eq!(artifact.base_style, options.base_style);
        assert!((artifact.region_fill_opacity - 0.8).abs() < f64::EPSILON);
    }
}
