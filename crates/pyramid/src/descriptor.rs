//! TileJSON and preview page emitted after a successful run.

use crate::config::{PyramidConfig, TILE_PATTERN};
use crate::error::{PyramidError, PyramidResult};
use colormap::{html_legend, Colormap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const TILEJSON_FILE: &str = "tilejson.json";
pub const PREVIEW_FILE: &str = "leaflet.html";

/// Opacity of the generated layer over the basemap in the preview page.
pub const PREVIEW_OPACITY: f64 = 0.5;

const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// TileJSON document for the generated layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    pub tiles: Vec<String>,
    pub minzoom: u32,
    pub maxzoom: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl TileJson {
    pub fn from_config(config: &PyramidConfig) -> Self {
        Self {
            tiles: vec![config.tile_url_template()],
            minzoom: config.min_zoom,
            maxzoom: config.max_zoom,
            bounds: config.bbox.as_ref().map(|b| b.to_array()),
            attribution: config.attribution.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> PyramidResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Standalone Leaflet page showing the tiles over OpenStreetMap.
///
/// Tiles are loaded relative to the page, so it works straight from the
/// output directory. The optional legend is rendered below the map.
pub fn render_preview_page(config: &PyramidConfig, legend: Option<&Colormap>) -> PyramidResult<String> {
    let (lon, lat) = config.bbox.as_ref().map(|b| b.center()).unwrap_or((0.0, 0.0));
    let title = config.out_dir.display().to_string();

    let legend_html = legend
        .map(|cmap| {
            format!(
                "<div id=\"legend\"><div class=\"units\">{}</div>\n{}</div>\n",
                colormap::preview::escape_html(cmap.units()),
                html_legend(cmap)
            )
        })
        .unwrap_or_default();

    let title = colormap::preview::escape_html(&title);
    let lat = lat.to_string();
    let lon = lon.to_string();
    let min_zoom = config.min_zoom.to_string();
    let max_zoom = config.max_zoom.to_string();
    let osm_url = script_string(OSM_TILE_URL)?;
    let osm_attribution = script_string(OSM_ATTRIBUTION)?;
    let tile_url = script_string(TILE_PATTERN)?;
    let attribution = script_string(config.attribution.as_deref().unwrap_or(""))?;
    let opacity = PREVIEW_OPACITY.to_string();

    Ok(fill_template(
        PREVIEW_TEMPLATE,
        &[
            ("__TITLE__", title.as_str()),
            ("__LAT__", lat.as_str()),
            ("__LON__", lon.as_str()),
            ("__MIN_ZOOM__", min_zoom.as_str()),
            ("__MAX_ZOOM__", max_zoom.as_str()),
            ("__OSM_URL__", osm_url.as_str()),
            ("__OSM_ATTRIBUTION__", osm_attribution.as_str()),
            ("__TILE_URL__", tile_url.as_str()),
            ("__ATTRIBUTION__", attribution.as_str()),
            ("__OPACITY__", opacity.as_str()),
            ("__LEGEND__", legend_html.as_str()),
        ],
    ))
}

/// JSON string literal that is safe inside an inline `<script>`.
fn script_string(value: &str) -> PyramidResult<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Substitute `__KEY__` placeholders in one pass over the template.
///
/// Inserted values are never scanned again, so placeholder text inside a
/// value is kept literally.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find("__") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match values.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                out.push('_');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Write `tilejson.json` and `leaflet.html` into the output directory.
pub fn write_descriptors(config: &PyramidConfig, legend: Option<&Colormap>) -> PyramidResult<()> {
    let tilejson = TileJson::from_config(config).to_json_pretty()?;
    write_file(&config.out_dir.join(TILEJSON_FILE), &tilejson)?;

    let page = render_preview_page(config, legend)?;
    write_file(&config.out_dir.join(PREVIEW_FILE), &page)?;

    info!(path = %config.out_dir.display(), "Wrote TileJSON and preview page");
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> PyramidResult<()> {
    std::fs::write(path, contents).map_err(|e| PyramidError::io(path, e))
}

const PREVIEW_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>__TITLE__ | tile preview</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
        integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=" crossorigin=""/>
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
        integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=" crossorigin=""></script>
    <style>
        body, #map { width: 100vw; height: 100vh; padding: 0; margin: 0; border: 0; }
        #legend { position: absolute; bottom: 16px; left: 8px; z-index: 1000; background: #fff;
                  padding: 4px 8px; font: 12px sans-serif; max-width: 90vw; }
        #legend .units { font-weight: bold; }
    </style>
</head>
<body>
<div id="map"></div>
__LEGEND__<script>
    const map = L.map("map").setView([__LAT__, __LON__], __MIN_ZOOM__);

    L.tileLayer(__OSM_URL__, {
        attribution: __OSM_ATTRIBUTION__
    }).addTo(map);

    L.tileLayer(__TILE_URL__, {
        minNativeZoom: __MIN_ZOOM__,
        maxNativeZoom: __MAX_ZOOM__,
        attribution: __ATTRIBUTION__,
        opacity: __OPACITY__,
    }).addTo(map);
</script>
</body>
</html>
"#;
