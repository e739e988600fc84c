use serde::ser::SerializeTuple;

use crate::foundation::core::LatLon;
use crate::foundation::error::TriplogResult;
use crate::trip::model::Trip;

/// Why a waypoint is on the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointRole {
    /// Current vehicle position.
    Current,
    /// Trip origin.
    Start,
    /// Intermediate stop.
    Stop,
    /// Trip destination.
    End,
}

/// One routing waypoint.
///
/// Stop coordinates may be missing; they are passed through to the directions service as `null`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Role in the route.
    pub role: WaypointRole,
    /// Latitude in degrees.
    pub lat: Option<f64>,
    /// Longitude in degrees.
    pub lon: Option<f64>,
}

impl Waypoint {
    fn at(role: WaypointRole, c: LatLon) -> Self {
        Self {
            role,
            lat: Some(c.lat),
            lon: Some(c.lon),
        }
    }

    /// Coordinate, when both halves are present.
    pub fn coord(&self) -> Option<LatLon> {
        LatLon::from_parts(self.lat, self.lon)
    }
}

// Serialized as the `[lon, lat]` pair the directions service expects.
impl serde::Serialize for Waypoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut t = serializer.serialize_tuple(2)?;
        t.serialize_element(&self.lon)?;
        t.serialize_element(&self.lat)?;
        t.end()
    }
}

/// Ordered waypoints for `trip`: `[current?, start, stops..., end]`.
///
/// The current position leads only when both of its coordinates are known. Stops keep their entry
/// order.
pub fn build_waypoints(trip: &Trip) -> TriplogResult<Vec<Waypoint>> {
    let (start, end) = trip.route_endpoints()?;

    let mut out = Vec::with_capacity(trip.stops.len() + 3);
    if let Some(current) = trip.current() {
        out.push(Waypoint::at(WaypointRole::Current, current));
    }
    out.push(Waypoint::at(WaypointRole::Start, start));
    out.extend(trip.stops.iter().map(|s| Waypoint {
        role: WaypointRole::Stop,
        lat: s.lat,
        lon: s.lon,
    }));
    out.push(Waypoint::at(WaypointRole::End, end));
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/route/waypoint.rs"]
mod tests;
