//! Deterministic region color assignment.
//!
//! Regions are colored by the position at which they were first seen,
//! cycling through a fixed palette. Once there are more regions than
//! palette entries, colors repeat.

use std::collections::BTreeMap;

use region_map_theme_models::Color;

use crate::ThemeError;

/// Region label to assigned color.
pub type ColorMap = BTreeMap<String, Color>;

/// The built-in 19-color palette.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#0066CC", "#009900", "#FFA95B", "#68D668", "#AB87CB", "#8b0000", "#ff6347", "#f5deb3",
    "#00008b", "#006400", "#5f9ea0", "#4b0082", "#ffffff", "#ffc0cb", "#87cefa", "#90ee90",
    "#808080", "#000000", "#d3d3d3",
];

/// Returns [`DEFAULT_PALETTE`] as owned colors.
#[must_use]
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.iter().map(|&c| Color::from(c)).collect()
}

/// Assigns `palette[i % palette.len()]` to the `i`-th distinct region.
///
/// `regions` is expected to be unique already. If a label repeats, only its
/// first occurrence takes a palette slot.
///
/// # Errors
///
/// Returns [`ThemeError::EmptyPalette`] if `palette` is empty.
pub fn assign_colors<S: AsRef<str>>(
    regions: &[S],
    palette: &[Color],
) -> Result<ColorMap, ThemeError> {
    if palette.is_empty() {
        return Err(ThemeError::EmptyPalette);
    }

    if regions.len() > palette.len() {
        log::warn!(
            "{} regions but only {} palette colors, some regions will share a color",
            regions.len(),
            palette.len()
        );
    }

    let mut colors = ColorMap::new();
    for region in regions {
        let region = region.as_ref();
        if colors.contains_key(region) {
            continue;
        }
        let color = palette[colors.len() % palette.len()].clone();
        colors.insert(region.to_string(), color);
    }

    Ok(colors)
}
