//! Themed `GeoJSON` export.

use std::io::Write;

use geojson::{Feature, FeatureCollection, Geometry, Value};
use region_map_theme_models::{BoundaryGeometry, GeometryFeature, MapArtifact, Ring};

use crate::ExportError;

/// Converts a boundary geometry back into a `GeoJSON` geometry.
#[must_use]
pub fn to_geojson_geometry(geometry: &BoundaryGeometry) -> Geometry {
    let value = match geometry {
        BoundaryGeometry::Polygon(rings) => Value::Polygon(rings_to_positions(rings)),
        BoundaryGeometry::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .map(|rings| rings_to_positions(rings))
                .collect(),
        ),
    };
    Geometry::new(value)
}

fn rings_to_positions(rings: &[Ring]) -> Vec<Vec<Vec<f64>>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|&[lon, lat]| vec![lon, lat]).collect())
        .collect()
}

/// Builds a `GeoJSON` feature with the given properties.
pub(crate) fn to_feature(
    feature: &GeometryFeature,
    properties: serde_json::Map<String, serde_json::Value>,
) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(to_geojson_geometry(&feature.geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Collects every matched boundary, in layer order, into one collection.
///
/// Each feature keeps its original properties plus `region` and `color`,
/// which overwrite any original properties of the same name.
#[must_use]
pub fn to_feature_collection(artifact: &MapArtifact) -> FeatureCollection {
    let features = artifact
        .region_layers
        .iter()
        .flat_map(|group| {
            group.features.iter().map(move |feature| {
                let mut properties = feature.raw_properties.clone();
                properties.insert(
                    "region".to_string(),
                    serde_json::Value::String(group.region.clone()),
                );
                properties.insert(
                    "color".to_string(),
                    serde_json::Value::String(group.color.to_string()),
                );
                to_feature(feature, properties)
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes [`to_feature_collection`] as JSON.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or writing fails.
pub fn write_feature_collection<W: Write>(
    artifact: &MapArtifact,
    mut writer: W,
) -> Result<(), ExportError> {
    let collection = to_feature_collection(artifact);
    log::debug!("Writing {} themed features", collection.features.len());
    serde_json::to_writer(&mut writer, &collection)?;
    writer.flush()?;
    Ok(())
}
