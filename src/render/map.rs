use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::api::RouteGeometry;
use crate::domain::{Coordinates, VehicleId};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write route map: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode route map data: {0}")]
    Json(#[from] serde_json::Error),
}

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView(__CENTER__, 13);
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
__MARKERS__.forEach(function (m) {
  L.circleMarker(m.position, { color: m.color, radius: 9, fillOpacity: 0.8 })
    .bindPopup(m.label)
    .addTo(map);
});
L.polyline(__PATH__, { color: "blue", weight: 5 }).addTo(map);
</script>
</body>
</html>
"#;

#[derive(Serialize)]
struct Marker {
    position: [f64; 2],
    label: &'static str,
    color: &'static str,
}

fn lat_lon(c: Coordinates) -> [f64; 2] {
    [c.lat, c.lon]
}

/// `route_map_{lcv}_{daughter}.html`, with path separators in the station name replaced.
pub fn route_map_file_name(lcv_id: VehicleId, daughter_station: &str) -> String {
    format!("route_map_{}_{}.html", lcv_id, daughter_station.replace('/', "_"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Standalone Leaflet page showing the three stops and the road path.
pub fn render_route_map_html(
    title: &str,
    geometry: &RouteGeometry,
    origin: Coordinates,
    loading_station: Coordinates,
    destination: Coordinates,
) -> Result<String, RenderError> {
    let markers = [
        Marker {
            position: lat_lon(origin),
            label: "Starting Point",
            color: "green",
        },
        Marker {
            position: lat_lon(loading_station),
            label: "Loading Station",
            color: "blue",
        },
        Marker {
            position: lat_lon(destination),
            label: "Customer Station",
            color: "red",
        },
    ];
    // GeoJSON is [lon, lat]; Leaflet wants [lat, lon].
    let path: Vec<[f64; 2]> = geometry
        .coordinates
        .iter()
        .map(|[lon, lat]| [*lat, *lon])
        .collect();

    let html = MAP_TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__CENTER__", &serde_json::to_string(&lat_lon(origin))?)
        .replace("__MARKERS__", &serde_json::to_string(&markers)?)
        .replace("__PATH__", &serde_json::to_string(&path)?);
    Ok(html)
}

pub async fn save_route_map(dir: &Path, file_name: &str, html: &str) -> Result<PathBuf, RenderError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, html).await?;
    debug!("Saved route map to {}", path.display());
    Ok(path)
}
