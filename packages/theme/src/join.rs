//! Name-based join between locality rows and boundary features.
//!
//! Both sides are keyed by [`normalize`](crate::normalize::normalize). The
//! join never fails because of missing matches: boundaries without a row
//! and rows without a boundary are returned alongside the partition.

use std::collections::{BTreeMap, BTreeSet};

use region_map_theme_models::{GeometryFeature, LocalityRecord};

use crate::ThemeError;
use crate::normalize::normalize;

/// Matched boundaries grouped by region, in first-seen order.
///
/// Region order is the order in which each region's first boundary
/// appeared in the geometry collection. Within a region, features keep
/// their collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPartition {
    groups: Vec<(String, Vec<GeometryFeature>)>,
    index: BTreeMap<String, usize>,
}

impl RegionPartition {
    fn push(&mut self, region: &str, feature: GeometryFeature) {
        let position = match self.index.get(region) {
            Some(&position) => position,
            None => {
                self.groups.push((region.to_string(), Vec::new()));
                let position = self.groups.len() - 1;
                self.index.insert(region.to_string(), position);
                position
            }
        };
        self.groups[position].1.push(feature);
    }

    /// Region labels in first-seen order.
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        self.groups.iter().map(|(region, _)| region.as_str()).collect()
    }

    /// Features matched to `region`, if any.
    #[must_use]
    pub fn get(&self, region: &str) -> Option<&[GeometryFeature]> {
        self.index
            .get(region)
            .map(|&position| self.groups[position].1.as_slice())
    }

    /// Iterates `(region, features)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GeometryFeature])> {
        self.groups
            .iter()
            .map(|(region, features)| (region.as_str(), features.as_slice()))
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no boundary matched any locality.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of matched features across all regions.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.groups.iter().map(|(_, features)| features.len()).sum()
    }
}

impl IntoIterator for RegionPartition {
    type Item = (String, Vec<GeometryFeature>);
    type IntoIter = std::vec::IntoIter<(String, Vec<GeometryFeature>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Result of joining localities to boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinOutcome {
    /// Matched boundaries grouped by region.
    pub partition: RegionPartition,
    /// Boundaries whose name matched no locality, in collection order.
    pub unmatched_geometries: Vec<GeometryFeature>,
    /// Localities whose name matched no boundary, in table order.
    pub unmatched_localities: Vec<LocalityRecord>,
    /// Regions of matched localities, deduplicated, in table order.
    ///
    /// Holds exactly the partition's region labels, but ordered by the
    /// locality table rather than by the boundary scan. This is the order
    /// colors are assigned in.
    pub region_order: Vec<String>,
}

/// Joins localities to boundaries by normalized name.
///
/// If several rows normalize to the same name, the last one decides the
/// region. All of those rows count as matched once any boundary carries
/// that name, so none of them are reported as unmatched.
///
/// Every boundary ends up in exactly one place: a region group or
/// [`JoinOutcome::unmatched_geometries`].
///
/// # Errors
///
/// Returns [`ThemeError::EmptyInput`] only if both `localities` and
/// `geometries` are empty. A join with zero matches is not an error.
pub fn join(
    localities: Vec<LocalityRecord>,
    geometries: &[GeometryFeature],
) -> Result<JoinOutcome, ThemeError> {
    if localities.is_empty() && geometries.is_empty() {
        return Err(ThemeError::EmptyInput);
    }

    let keys: Vec<String> = localities.iter().map(|l| normalize(&l.name)).collect();

    let mut lookup: BTreeMap<&str, &LocalityRecord> = BTreeMap::new();
    for (key, locality) in keys.iter().zip(&localities) {
        if let Some(previous) = lookup.insert(key.as_str(), locality) {
            log::debug!(
                "Locality '{}' appears more than once, region '{}' replaces '{}'",
                locality.name,
                locality.region,
                previous.region,
            );
        }
    }

    let mut partition = RegionPartition::default();
    let mut unmatched_geometries = Vec::new();
    let mut matched_keys = BTreeSet::new();

    for feature in geometries {
        let key = normalize(&feature.name);
        if let Some(locality) = lookup.get(key.as_str()) {
            partition.push(&locality.region, feature.clone());
            matched_keys.insert(key);
        } else {
            unmatched_geometries.push(feature.clone());
        }
    }

    let mut seen_regions = BTreeSet::new();
    let region_order: Vec<String> = keys
        .iter()
        .filter(|key| matched_keys.contains(key.as_str()))
        .filter_map(|key| lookup.get(key.as_str()).copied())
        .map(|locality| locality.region.as_str())
        .filter(|region| seen_regions.insert(*region))
        .map(str::to_owned)
        .collect();

    drop(lookup);

    let unmatched_localities: Vec<LocalityRecord> = keys
        .iter()
        .zip(localities)
        .filter(|(key, _)| !matched_keys.contains(key.as_str()))
        .map(|(_, locality)| locality)
        .collect();

    log::info!(
        "Joined {} boundaries into {} regions ({} unmatched boundaries, {} unmatched localities)",
        partition.feature_count(),
        partition.len(),
        unmatched_geometries.len(),
        unmatched_localities.len(),
    );

    Ok(JoinOutcome {
        partition,
        unmatched_geometries,
        unmatched_localities,
        region_order,
    })
}
