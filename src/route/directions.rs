use std::future::Future;
use std::time::Duration;

use crate::foundation::core::LatLon;
use crate::foundation::error::{TriplogError, TriplogResult};
use crate::route::polyline::{DEFAULT_PRECISION, decode_polyline};
use crate::route::waypoint::Waypoint;

/// Default directions endpoint (heavy goods vehicle profile).
pub const DEFAULT_DIRECTIONS_URL: &str =
    "https://api.openrouteservice.org/v2/directions/driving-hgv";

/// Decoded route geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoutePath {
    /// Points along the route in travel order.
    pub points: Vec<LatLon>,
}

impl RoutePath {
    /// GeoJSON `LineString` geometry (`[lon, lat]` positions).
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "LineString",
            "coordinates": self.points.iter().map(|p| p.to_lon_lat()).collect::<Vec<_>>(),
        })
    }
}

/// Outcome of one directions request.
pub type RouteResult = TriplogResult<RoutePath>;

/// Something that turns ordered waypoints into a drivable path.
pub trait DirectionsService {
    /// Route through `waypoints` in order.
    fn route(&self, waypoints: &[Waypoint]) -> impl Future<Output = RouteResult> + Send;
}

#[derive(serde::Serialize)]
struct DirectionsRequest<'a> {
    coordinates: &'a [Waypoint],
    format: &'static str,
    instructions: bool,
}

/// Client for an openrouteservice-compatible directions endpoint.
#[derive(Clone)]
pub struct OrsDirectionsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for OrsDirectionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsDirectionsClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OrsDirectionsClient {
    /// Client for `endpoint` authenticating with `api_key`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> TriplogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriplogError::network(format!("build http client: {e}")))?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    /// Client reusing an existing HTTP client.
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    #[tracing::instrument(skip(self, waypoints), fields(endpoint = %self.endpoint, waypoints = waypoints.len()))]
    async fn fetch_route(&self, waypoints: &[Waypoint]) -> RouteResult {
        let body = DirectionsRequest {
            coordinates: waypoints,
            format: "geojson",
            instructions: true,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TriplogError::network(format!("POST {}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let err = match response.bytes().await {
                Ok(bytes) => rejection(status.as_u16(), Ok(&bytes[..])),
                Err(e) => rejection(status.as_u16(), Err(e.to_string().as_str())),
            };
            tracing::debug!(status = status.as_u16(), error = %err, "directions rejected");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TriplogError::network(format!("read directions body: {e}")))?;

        let json: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| TriplogError::decode(format!("directions payload: {e}")))?;
        let points = route_geometry(&json)?;
        tracing::debug!(points = points.len(), "route decoded");
        Ok(RoutePath { points })
    }
}

impl DirectionsService for OrsDirectionsClient {
    fn route(&self, waypoints: &[Waypoint]) -> impl Future<Output = RouteResult> + Send {
        self.fetch_route(waypoints)
    }
}

// The status alone still identifies a rejection whose body could not be read.
fn rejection(status: u16, body: Result<&[u8], &str>) -> TriplogError {
    let (code, message) = match body {
        Ok(bytes) => service_error(bytes),
        Err(e) => (None, format!("body unreadable: {e}")),
    };
    let message = if message.is_empty() {
        format!("directions service returned HTTP {status}")
    } else {
        message
    };
    TriplogError::RouteService {
        status,
        code,
        message,
    }
}

// `{"error": {"code": 2004, "message": "..."}}`, `{"error": "..."}`, or anything else verbatim.
fn service_error(body: &[u8]) -> (Option<i64>, String) {
    let raw = || String::from_utf8_lossy(body).trim().to_string();
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) else {
        return (None, raw());
    };
    match json.get("error") {
        Some(serde_json::Value::Object(e)) => (
            e.get("code").and_then(serde_json::Value::as_i64),
            e.get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(raw),
        ),
        Some(serde_json::Value::String(s)) => (None, s.clone()),
        _ => (None, raw()),
    }
}

// `routes[0].geometry` is an encoded polyline; a GeoJSON geometry object is accepted as well.
fn route_geometry(json: &serde_json::Value) -> TriplogResult<Vec<LatLon>> {
    let geometry = json
        .get("routes")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("geometry"))
        .ok_or_else(|| TriplogError::decode("directions payload has no routes[0].geometry"))?;

    match geometry {
        serde_json::Value::String(encoded) => decode_polyline(encoded, DEFAULT_PRECISION),
        serde_json::Value::Object(obj) => {
            let coords = obj
                .get("coordinates")
                .and_then(serde_json::Value::as_array)
                .ok_or_else(|| TriplogError::decode("geometry has no coordinates array"))?;
            coords
                .iter()
                .map(|c| match (c.get(0).and_then(|v| v.as_f64()), c.get(1).and_then(|v| v.as_f64())) {
                    (Some(lon), Some(lat)) => Ok(LatLon::new(lat, lon)),
                    _ => Err(TriplogError::decode("geometry position is not [lon, lat]")),
                })
                .collect()
        }
        _ => Err(TriplogError::decode("unsupported route geometry")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/route/directions.rs"]
mod tests;
