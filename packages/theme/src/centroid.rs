//! Representative points for boundary geometries.
//!
//! The centroid here is the vertex mean of the first ring, not the
//! area-weighted centroid. It is good enough to center a viewport and
//! nothing more: multipolygon parts after the first are ignored, and
//! unevenly spaced vertices pull the point toward dense edges.

use region_map_theme_models::{BoundaryGeometry, Centroid, GeometryFeature};

use crate::ThemeError;

/// Computes the vertex-mean centroid of the geometry's first ring.
///
/// A ring with a single vertex yields that vertex.
///
/// # Errors
///
/// Returns [`ThemeError::EmptyGeometry`] if the geometry has no rings or its
/// first ring has no vertices.
pub fn centroid(geometry: &BoundaryGeometry) -> Result<Centroid, ThemeError> {
    let ring = geometry
        .first_ring()
        .filter(|ring| !ring.is_empty())
        .ok_or_else(|| ThemeError::EmptyGeometry {
            name: String::new(),
        })?;

    #[allow(clippy::cast_precision_loss)]
    let count = ring.len() as f64;

    let (lon_sum, lat_sum) = ring
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lon, lat), [x, y]| (lon + x, lat + y));

    Ok(Centroid {
        latitude: lat_sum / count,
        longitude: lon_sum / count,
    })
}

/// Computes the centroid of a named feature.
///
/// Same as [`centroid`], with the feature name attached to any error.
///
/// # Errors
///
/// Returns [`ThemeError::EmptyGeometry`] if the feature's first ring has no
/// vertices.
pub fn feature_centroid(feature: &GeometryFeature) -> Result<Centroid, ThemeError> {
    centroid(&feature.geometry).map_err(|_| ThemeError::EmptyGeometry {
        name: feature.name.clone(),
    })
}

/// Averages the centroids of every feature (a mean of means).
///
/// # Errors
///
/// Returns [`ThemeError::EmptyGeometryCollection`] if `features` is empty,
/// or [`ThemeError::EmptyGeometry`] if any feature has no vertices.
pub fn mean_centroid(features: &[GeometryFeature]) -> Result<Centroid, ThemeError> {
    if features.is_empty() {
        return Err(ThemeError::EmptyGeometryCollection);
    }

    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    for feature in features {
        let point = feature_centroid(feature)?;
        lat_sum += point.latitude;
        lon_sum += point.longitude;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = features.len() as f64;

    Ok(Centroid {
        latitude: lat_sum / count,
        longitude: lon_sum / count,
    })
}
