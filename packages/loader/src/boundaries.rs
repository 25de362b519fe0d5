//! `GeoJSON` boundary loading.
//!
//! Accepts a `FeatureCollection` whose features are Polygons or
//! MultiPolygons and carry a name property. Numeric names (e.g. municipal
//! codes) are accepted and stringified.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use geojson::{Feature, GeoJson, Value};
use region_map_theme_models::{BoundaryGeometry, GeometryFeature, Position, Ring};

use crate::LoadError;

/// Default feature property holding the boundary name.
pub const DEFAULT_NAME_PROPERTY: &str = "name";

/// Parses boundary features from a `GeoJSON` `FeatureCollection`.
///
/// Feature order is preserved. All properties are kept on
/// [`GeometryFeature::raw_properties`].
///
/// # Errors
///
/// * [`LoadError::GeoJson`] if the input is not valid `GeoJSON`
/// * [`LoadError::NotFeatureCollection`] for a bare `Feature` or `Geometry`
/// * [`LoadError::MissingName`] if a feature lacks `name_property`
/// * [`LoadError::UnsupportedGeometry`] for null or non-polygon geometry
/// * [`LoadError::InvalidCoordinate`] for positions with fewer than two
///   components
pub fn load_boundaries<R: Read>(
    mut reader: R,
    name_property: &str,
) -> Result<Vec<GeometryFeature>, LoadError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let collection = match content.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) => return Err(LoadError::NotFeatureCollection { found: "Feature" }),
        GeoJson::Geometry(_) => return Err(LoadError::NotFeatureCollection { found: "Geometry" }),
    };

    let features = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| convert_feature(index, feature, name_property))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Loaded {} boundary features", features.len());

    Ok(features)
}

/// Opens `path` and parses it with [`load_boundaries`].
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened, otherwise the
/// same errors as [`load_boundaries`].
pub fn load_boundaries_from_path(
    path: &Path,
    name_property: &str,
) -> Result<Vec<GeometryFeature>, LoadError> {
    log::info!("Reading boundaries from {}", path.display());
    let file = File::open(path)?;
    load_boundaries(file, name_property)
}

fn convert_feature(
    index: usize,
    feature: Feature,
    name_property: &str,
) -> Result<GeometryFeature, LoadError> {
    let raw_properties = feature.properties.unwrap_or_default();

    let name = match raw_properties.get(name_property) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => {
            return Err(LoadError::MissingName {
                index,
                property: name_property.to_owned(),
            });
        }
    };

    let geometry = match feature.geometry.map(|g| g.value) {
        Some(Value::Polygon(rings)) => BoundaryGeometry::Polygon(convert_rings(&name, rings)?),
        Some(Value::MultiPolygon(polygons)) => BoundaryGeometry::MultiPolygon(
            polygons
                .into_iter()
                .map(|rings| convert_rings(&name, rings))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(other) => {
            return Err(LoadError::UnsupportedGeometry {
                name,
                kind: geometry_kind(&other).to_owned(),
            });
        }
        None => {
            return Err(LoadError::UnsupportedGeometry {
                name,
                kind: "null".to_owned(),
            });
        }
    };

    Ok(GeometryFeature {
        name,
        geometry,
        raw_properties,
    })
}

const fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn convert_rings(name: &str, rings: Vec<Vec<Vec<f64>>>) -> Result<Vec<Ring>, LoadError> {
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|position| convert_position(name, &position))
                .collect::<Result<Ring, _>>()
        })
        .collect()
}

fn convert_position(name: &str, position: &[f64]) -> Result<Position, LoadError> {
    match position {
        [lon, lat, ..] => Ok([*lon, *lat]),
        _ => Err(LoadError::InvalidCoordinate {
            name: name.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn load(value: &serde_json::Value) -> Result<Vec<GeometryFeature>, LoadError> {
        load_boundaries(value.to_string().as_bytes(), DEFAULT_NAME_PROPERTY)
    }

    fn collection(features: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "type": "FeatureCollection", "features": features })
    }

    fn polygon_feature(name: serde_json::Value) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": { "name": name, "id": "3550308" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-46.6, -23.5], [-46.7, -23.6], [-46.5, -23.7], [-46.6, -23.5]]]
            }
        })
    }

    #[test]
    fn loads_polygon_with_properties() {
        let features = load(&collection(vec![polygon_feature(json!("São Paulo"))])).unwrap();

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "São Paulo");
        assert_eq!(features[0].raw_properties["id"], json!("3550308"));
        let BoundaryGeometry::Polygon(rings) = &features[0].geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0][0], [-46.6, -23.5]);
        assert_eq!(rings[0].len(), 4);
    }

    #[test]
    fn loads_multipolygon() {
        let feature = json!({
            "type": "Feature",
            "properties": { "name": "Ilhabela" },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                    [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
                ]
            }
        });

        let features = load(&collection(vec![feature])).unwrap();

        let BoundaryGeometry::MultiPolygon(polygons) = &features[0].geometry else {
            panic!("expected multipolygon");
        };
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1][0][0], [5.0, 5.0]);
    }

    #[test]
    fn drops_altitude_component() {
        let feature = json!({
            "type": "Feature",
            "properties": { "name": "Alto" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[1.0, 2.0, 800.0], [3.0, 4.0, 810.0], [1.0, 2.0, 800.0]]]
            }
        });

        let features = load(&collection(vec![feature])).unwrap();

        assert_eq!(features[0].geometry.first_ring().unwrap()[1], [3.0, 4.0]);
    }

    #[test]
    fn preserves_feature_order() {
        let features = load(&collection(vec![
            polygon_feature(json!("b")),
            polygon_feature(json!("a")),
            polygon_feature(json!("c")),
        ]))
        .unwrap();

        let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn numeric_names_are_stringified() {
        let features = load(&collection(vec![polygon_feature(json!(3_550_308))])).unwrap();
        assert_eq!(features[0].name, "3550308");
    }

    #[test]
    fn custom_name_property() {
        let value = collection(vec![polygon_feature(json!("ignored"))]);
        let features = load_boundaries(value.to_string().as_bytes(), "id").unwrap();
        assert_eq!(features[0].name, "3550308");
    }

    #[test]
    fn missing_name_is_reported_with_index() {
        let value = collection(vec![polygon_feature(json!("ok")), polygon_feature(json!(null))]);
        let err = load(&value).unwrap_err();
        assert!(matches!(err, LoadError::MissingName { index: 1, .. }));
    }

    #[test]
    fn point_geometry_is_rejected() {
        let feature = json!({
            "type": "Feature",
            "properties": { "name": "Marco Zero" },
            "geometry": { "type": "Point", "coordinates": [-46.6, -23.5] }
        });
        let err = load(&collection(vec![feature])).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedGeometry { ref name, ref kind }
                if name == "Marco Zero" && kind == "Point"
        ));
    }

    #[test]
    fn null_geometry_is_rejected() {
        let feature = json!({
            "type": "Feature",
            "properties": { "name": "Void" },
            "geometry": null
        });
        let err = load(&collection(vec![feature])).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedGeometry { ref kind, .. } if kind == "null"));
    }

    #[test]
    fn bare_geometry_is_not_a_collection() {
        let value = json!({ "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] });
        let err = load(&value).unwrap_err();
        assert!(matches!(err, LoadError::NotFeatureCollection { found: "Geometry" }));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = load_boundaries("{ not json".as_bytes(), DEFAULT_NAME_PROPERTY).unwrap_err();
        assert!(matches!(err, LoadError::GeoJson(_)));
    }

    #[test]
    fn empty_collection_loads_nothing() {
        assert!(load(&collection(vec![])).unwrap().is_empty());
    }
}
