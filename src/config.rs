use std::path::PathBuf;
use std::time::Duration;

use crate::foundation::core::CanvasSize;
use crate::foundation::error::{TriplogError, TriplogResult};
use crate::route::directions::DEFAULT_DIRECTIONS_URL;

/// Default trip data store.
pub const DEFAULT_TRIPS_URL: &str = "http://localhost:8000/api";

/// Runtime configuration, read from the environment (and a `.env` file when present).
///
/// | variable | default |
/// |---|---|
/// | `TRIPLOG_DIRECTIONS_URL` | openrouteservice `driving-hgv` |
/// | `TRIPLOG_ORS_API_KEY` | empty |
/// | `TRIPLOG_TRIPS_URL` | `http://localhost:8000/api` |
/// | `TRIPLOG_TEMPLATE_PATH` | unset |
/// | `TRIPLOG_FONT_PATH` | unset |
/// | `TRIPLOG_CANVAS_WIDTH` | `1000` |
/// | `TRIPLOG_HTTP_TIMEOUT_SECS` | `30` |
/// | `LOG_LEVEL` | `info` |
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Directions endpoint.
    pub directions_url: String,
    /// Directions API key, sent as the `Authorization` header.
    pub ors_api_key: String,
    /// Trip data store base URL.
    pub trips_url: String,
    /// Blank log-sheet template.
    pub template_path: Option<PathBuf>,
    /// Font for log-sheet text.
    pub font_path: Option<PathBuf>,
    /// Log-sheet canvas.
    pub canvas: CanvasSize,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// `tracing` filter directive.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            ors_api_key: String::new(),
            trips_url: DEFAULT_TRIPS_URL.to_string(),
            template_path: None,
            font_path: None,
            canvas: CanvasSize::default(),
            http_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any), then read the process environment.
    pub fn load() -> TriplogResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TriplogResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let canvas = match get("TRIPLOG_CANVAS_WIDTH") {
            Some(v) => CanvasSize::for_width(parse_number("TRIPLOG_CANVAS_WIDTH", &v)?)?,
            None => defaults.canvas,
        };
        let http_timeout = match get("TRIPLOG_HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("TRIPLOG_HTTP_TIMEOUT_SECS", &v)?),
            None => defaults.http_timeout,
        };

        Ok(Self {
            directions_url: get("TRIPLOG_DIRECTIONS_URL").unwrap_or(defaults.directions_url),
            ors_api_key: get("TRIPLOG_ORS_API_KEY").unwrap_or_default(),
            trips_url: get("TRIPLOG_TRIPS_URL").unwrap_or(defaults.trips_url),
            template_path: get("TRIPLOG_TEMPLATE_PATH").map(PathBuf::from),
            font_path: get("TRIPLOG_FONT_PATH").map(PathBuf::from),
            canvas,
            http_timeout,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, v: &str) -> TriplogResult<T>
where
    T::Err: std::fmt::Display,
{
    v.parse()
        .map_err(|e| TriplogError::validation(format!("{key}='{v}': {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
