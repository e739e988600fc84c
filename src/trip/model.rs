use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::foundation::core::LatLon;
use crate::foundation::error::{TriplogError, TriplogResult};

/// A truck trip as served by the trip data store.
///
/// This is the single aggregate both pipelines consume. Coordinates are optional on the wire;
/// the pipelines check for the ones they need via [`Trip::route_endpoints`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Data store identifier, when the trip came from the store.
    #[serde(default)]
    pub id: Option<u64>,
    /// Driver name printed on every log sheet.
    pub driver_name: String,
    /// Carrier name.
    #[serde(default)]
    pub company: Option<String>,
    /// Truck / tractor number.
    #[serde(default)]
    pub truck_number: Option<String>,

    /// Origin name.
    pub start_location: String,
    /// Origin latitude.
    #[serde(default)]
    pub start_lat: Option<f64>,
    /// Origin longitude.
    #[serde(default)]
    pub start_lon: Option<f64>,

    /// Destination name.
    pub end_location: String,
    /// Destination latitude.
    #[serde(default)]
    pub end_lat: Option<f64>,
    /// Destination longitude.
    #[serde(default)]
    pub end_lon: Option<f64>,

    /// Where the vehicle is now.
    #[serde(default)]
    pub current_location: Option<String>,
    /// Current latitude.
    #[serde(default)]
    pub current_lat: Option<f64>,
    /// Current longitude.
    #[serde(default)]
    pub current_lon: Option<f64>,

    /// Total trip distance in miles.
    pub total_miles: f64,
    /// Trip start, keeping the offset it was recorded with.
    pub start_time: DateTime<FixedOffset>,
    /// Trip end, once known.
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    /// Hours already used in the current duty cycle.
    #[serde(default)]
    pub current_cycle_hours: f64,

    /// Stops in the order they were entered.
    #[serde(default)]
    pub stops: Vec<Stop>,
    /// One entry per logged day, in trip order.
    #[serde(default)]
    pub logs: Vec<DailyLogEntry>,
}

impl Trip {
    /// Parse a trip from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TriplogResult<Self> {
        serde_json::from_reader(r).map_err(|e| TriplogError::serde(format!("parse trip JSON: {e}")))
    }

    /// Parse a trip from a JSON string.
    pub fn from_json_str(s: &str) -> TriplogResult<Self> {
        serde_json::from_str(s).map_err(|e| TriplogError::serde(format!("parse trip JSON: {e}")))
    }

    /// Parse a trip from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TriplogResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TriplogError::validation(format!("open trip JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Origin coordinate, when both halves are present.
    pub fn start(&self) -> Option<LatLon> {
        LatLon::from_parts(self.start_lat, self.start_lon)
    }

    /// Destination coordinate, when both halves are present.
    pub fn end(&self) -> Option<LatLon> {
        LatLon::from_parts(self.end_lat, self.end_lon)
    }

    /// Current vehicle position, when both halves are present.
    pub fn current(&self) -> Option<LatLon> {
        LatLon::from_parts(self.current_lat, self.current_lon)
    }

    /// Origin and destination coordinates.
    ///
    /// Both pipelines stay not-ready (a [`TriplogError::MissingCoordinate`]) until these exist.
    pub fn route_endpoints(&self) -> TriplogResult<(LatLon, LatLon)> {
        let start = self.start().ok_or_else(|| {
            TriplogError::missing_coordinate(format!(
                "trip start '{}' has no coordinates",
                self.start_location
            ))
        })?;
        let end = self.end().ok_or_else(|| {
            TriplogError::missing_coordinate(format!(
                "trip end '{}' has no coordinates",
                self.end_location
            ))
        })?;
        Ok((start, end))
    }

    /// Return `true` when both pipelines have what they need to run.
    pub fn is_ready(&self) -> bool {
        self.route_endpoints().is_ok()
    }

    /// Calendar date the trip started on, in the offset the store recorded.
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }
}

/// Why the vehicle stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    /// Refuelling.
    Fuel,
    /// Rest break.
    Rest,
    /// Loading cargo.
    Pickup,
    /// Unloading cargo.
    Dropoff,
}

impl StopKind {
    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Rest => "rest",
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }
}

impl std::fmt::Display for StopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intermediate stop on a trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Location name.
    pub location: String,
    /// Latitude, if geocoded.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude, if geocoded.
    #[serde(default)]
    pub lon: Option<f64>,
    /// Stop category.
    pub stop_type: StopKind,
    /// When the stop happened.
    pub stop_time: DateTime<FixedOffset>,
    /// Stop duration in minutes.
    #[serde(default)]
    pub duration: f64,
}

impl Stop {
    /// Stop coordinate, when both halves are present.
    pub fn coord(&self) -> Option<LatLon> {
        LatLon::from_parts(self.lat, self.lon)
    }
}

/// HOS duty-status categories, in log-sheet order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DutyStatus {
    /// Off duty.
    OffDuty,
    /// Sleeper berth.
    SleeperBerth,
    /// Driving.
    Driving,
    /// On duty, not driving.
    OnDuty,
}

impl DutyStatus {
    /// All statuses in the fixed order the log sheet lists them.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    /// Short name used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OffDuty => "off_duty",
            Self::SleeperBerth => "sleeper_berth",
            Self::Driving => "driving",
            Self::OnDuty => "on_duty",
        }
    }
}

/// Duty hours logged for one calendar day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// Off-duty hours.
    #[serde(default)]
    pub off_duty_hours: f64,
    /// Sleeper-berth hours.
    #[serde(default)]
    pub sleeper_berth_hours: f64,
    /// Driving hours.
    #[serde(default)]
    pub driving_hours: f64,
    /// On-duty (not driving) hours.
    #[serde(default)]
    pub on_duty_hours: f64,
}

impl DailyLogEntry {
    /// Parse [`DailyLogEntry::date`] strictly as `YYYY-MM-DD`.
    pub fn parse_date(&self) -> TriplogResult<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            TriplogError::validation(format!(
                "log date '{}' is not YYYY-MM-DD: {e}",
                self.date
            ))
        })
    }

    /// Hours recorded for `status`.
    pub fn hours(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty_hours,
            DutyStatus::SleeperBerth => self.sleeper_berth_hours,
            DutyStatus::Driving => self.driving_hours,
            DutyStatus::OnDuty => self.on_duty_hours,
        }
    }

    /// Sum of all four buckets, unclamped.
    pub fn total_hours(&self) -> f64 {
        DutyStatus::ALL.iter().map(|s| self.hours(*s)).sum()
    }

    /// Driving plus on-duty hours.
    pub fn worked_hours(&self) -> f64 {
        self.driving_hours + self.on_duty_hours
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trip/model.rs"]
mod tests;
