use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::Coordinates;

pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/driving/";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OSRM returned HTTP {0}")]
    Status(StatusCode),

    #[error("OSRM found no route (code {0})")]
    NoRoute(String),
}

/// Road path as `[lon, lat]` pairs, the GeoJSON order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<[f64; 2]>,
    /// Metres along the road network.
    pub distance: f64,
    /// Seconds as estimated by the router.
    pub duration: f64,
}

/// Something that can trace a road path origin -> via -> destination.
pub trait RouteGeometryService: Send + Sync + 'static {
    fn fetch_route(
        &self,
        origin: Coordinates,
        via: Coordinates,
        destination: Coordinates,
    ) -> impl Future<Output = Result<RouteGeometry, RouteError>> + Send;
}

#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: GeoJsonLineString,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct GeoJsonLineString {
    pub coordinates: Vec<[f64; 2]>,
}

/// Take the first route of an OSRM response.
pub fn parse_route_response(response: OsrmRouteResponse) -> Result<RouteGeometry, RouteError> {
    if response.code != "Ok" {
        return Err(RouteError::NoRoute(response.code));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::NoRoute("NoRoute".to_string()))?;
    Ok(RouteGeometry {
        coordinates: route.geometry.coordinates,
        distance: route.distance,
        duration: route.duration,
    })
}

#[derive(Debug, Clone)]
pub struct OsrmRouteClient {
    base_url: String,
    client: Client,
}

impl OsrmRouteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn route_url(&self, origin: Coordinates, via: Coordinates, destination: Coordinates) -> String {
        format!(
            "{}{}{};{};{}?overview=full&geometries=geojson&steps=true",
            self.base_url,
            OSRM_ROUTE_API_PATH,
            origin.to_lon_lat(),
            via.to_lon_lat(),
            destination.to_lon_lat()
        )
    }

    fn is_public(&self) -> bool {
        self.base_url.contains("router.project-osrm.org")
    }
}

impl RouteGeometryService for OsrmRouteClient {
    async fn fetch_route(
        &self,
        origin: Coordinates,
        via: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteGeometry, RouteError> {
        let url = self.route_url(origin, via, destination);
        debug!("Built OSRM URL: {}", url);

        let mut request_builder = self.client.get(&url).timeout(Duration::from_secs(30));
        if self.is_public() {
            request_builder = request_builder.header("User-Agent", "lcv-alloc/0.1");
        }

        let response = request_builder.send().await.map_err(|e| {
            error!("Error fetching route from OSRM: {}", e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "OSRM returned HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(RouteError::Status(status));
        }

        let body: OsrmRouteResponse = response.json().await?;
        match parse_route_response(body) {
            Ok(geometry) => {
                info!(
                    "OSRM route with {} points ({:.1} km)",
                    geometry.coordinates.len(),
                    geometry.distance / 1000.0
                );
                Ok(geometry)
            }
            Err(e) => {
                warn!("OSRM response without a usable route: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_url_is_longitude_first() {
        let client = OsrmRouteClient::new("http://localhost:5000/");
        let url = client.route_url(
            Coordinates::new(17.5, 78.4),
            Coordinates::new(17.59705278, 78.54384722),
            Coordinates::new(17.3, 78.5),
        );
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/driving/78.4,17.5;78.54384722,17.59705278;78.5,17.3?overview=full&geometries=geojson&steps=true"
        );
    }

    #[test]
    fn parses_first_route_geometry() {
        let body = serde_json::json!({
            "code": "Ok",
            "routes": [
                {
                    "geometry": { "type": "LineString", "coordinates": [[78.4, 17.5], [78.5, 17.6]] },
                    "distance": 15230.4,
                    "duration": 1320.0,
                    "legs": []
                },
                {
                    "geometry": { "type": "LineString", "coordinates": [] },
                    "distance": 1.0,
                    "duration": 1.0
                }
            ],
            "waypoints": []
        });
        let response: OsrmRouteResponse = serde_json::from_value(body).unwrap();
        let geometry = parse_route_response(response).unwrap();
        assert_eq!(geometry.coordinates, vec![[78.4, 17.5], [78.5, 17.6]]);
        assert_eq!(geometry.distance, 15230.4);
    }

    #[test]
    fn non_ok_code_is_an_error() {
        let response: OsrmRouteResponse =
            serde_json::from_value(serde_json::json!({ "code": "NoSegment", "message": "x" }))
                .unwrap();
        assert!(matches!(
            parse_route_response(response),
            Err(RouteError::NoRoute(code)) if code == "NoSegment"
        ));
    }
}
