//! Standalone Leaflet HTML export.
//!
//! The page embeds all map data inline as JSON. Region layers start
//! hidden and are toggled from an expanded layer control, while the
//! boundary layer starts visible.

use std::io::Write;

use geojson::FeatureCollection;
use region_map_theme_models::{GeometryFeature, LayerStyle, MapArtifact};
use serde_json::json;

use crate::geojson_export::to_feature;
use crate::{ExportError, ExportOptions};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const FULLSCREEN_CSS: &str = "https://unpkg.com/leaflet.fullscreen@3.0.2/Control.FullScreen.css";
const FULLSCREEN_JS: &str = "https://unpkg.com/leaflet.fullscreen@3.0.2/Control.FullScreen.js";

/// Renders the map as a standalone HTML document.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if map data cannot be serialized.
pub fn render_html(artifact: &MapArtifact, options: &ExportOptions) -> Result<String, ExportError> {
    let base = json!({
        "name": options.base_layer_name,
        "style": style_json(&artifact.base_style),
        "data": labelled_collection(&artifact.base_layer),
    });

    let regions: Vec<serde_json::Value> = artifact
        .region_layers
        .iter()
        .map(|group| {
            json!({
                "name": group.region,
                "style": style_json(&group.style(artifact.region_fill_opacity)),
                "data": labelled_collection(&group.features),
            })
        })
        .collect();

    let config = json!({
        "center": [artifact.center.latitude, artifact.center.longitude],
        "zoom": artifact.zoom,
        "tilesUrl": options.tiles_url,
        "attribution": options.attribution,
        "tooltipLabel": options.tooltip_label,
    });

    let title = escape_html(&options.title);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<link rel="stylesheet" href="{FULLSCREEN_CSS}">
<script src="{LEAFLET_JS}"></script>
<script src="{FULLSCREEN_JS}"></script>
<style>html, body, #map {{ height: 100%; width: 100%; margin: 0; padding: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const config = {config};
const base = {base};
const regions = {regions};

const map = L.map("map").setView(config.center, config.zoom);
L.tileLayer(config.tilesUrl, {{ attribution: config.attribution }}).addTo(map);
L.control.fullscreen({{ position: "topright" }}).addTo(map);

function tooltip(feature) {{
  const label = document.createElement("span");
  label.textContent = config.tooltipLabel + " " + feature.properties.name;
  return label;
}}

const overlays = {{}};
overlays[base.name] = L.geoJSON(base.data, {{ style: () => base.style }}).addTo(map);
for (const region of regions) {{
  overlays[region.name] = L.geoJSON(region.data, {{
    style: () => region.style,
    onEachFeature: (feature, layer) => layer.bindTooltip(() => tooltip(feature), {{ sticky: true }}),
  }});
}}
L.control.layers(null, overlays, {{ collapsed: false }}).addTo(map);
</script>
</body>
</html>
"#,
        config = script_json(&config)?,
        base = script_json(&base)?,
        regions = script_json(&regions)?,
    );

    Ok(html)
}

/// Writes [`render_html`] output to `writer`.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or writing fails.
pub fn write_html<W: Write>(
    artifact: &MapArtifact,
    options: &ExportOptions,
    mut writer: W,
) -> Result<(), ExportError> {
    let html = render_html(artifact, options)?;
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    log::debug!(
        "Wrote {} bytes of HTML with {} region layers",
        html.len(),
        artifact.region_layers.len()
    );
    Ok(())
}

fn style_json(style: &LayerStyle) -> serde_json::Value {
    json!({
        "fillColor": style.fill_color,
        "color": style.stroke_color,
        "weight": style.weight,
        "fillOpacity": style.fill_opacity,
    })
}

/// Features with only a `name` property, which is all the page reads.
fn labelled_collection(features: &[GeometryFeature]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features
            .iter()
            .map(|feature| {
                let mut properties = serde_json::Map::new();
                properties.insert(
                    "name".to_string(),
                    serde_json::Value::String(feature.name.clone()),
                );
                to_feature(feature, properties)
            })
            .collect(),
        foreign_members: None,
    }
}

/// Serializes JSON for inline embedding in a `<script>` block.
///
/// `</` only occurs inside JSON strings, where `<\/` is an equivalent
/// escape, so the result still parses to the same value.
fn script_json<T: serde::Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
