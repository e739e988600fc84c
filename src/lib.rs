//! Triplog renders FMCSA-style daily driver log sheets and composes truck routes for a trip.
//!
//! Two independent pipelines consume one [`Trip`]:
//!
//! - [`LogSheetRenderer`] draws one PNG per [`DailyLogEntry`] over a blank log-sheet template
//! - [`RouteComposer`] orders the trip's waypoints and asks a [`DirectionsService`] for the
//!   driving path, discarding results that were superseded while in flight
//!
//! Both stay in a not-ready state ([`TriplogError::MissingCoordinate`]) until the trip has start
//! and end coordinates.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Environment-driven runtime configuration.
pub mod config;
pub(crate) mod logsheet;
pub(crate) mod route;
pub(crate) mod trip;

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::template::LogSheetTemplate;
pub use crate::assets::text::FontAsset;
pub use crate::config::AppConfig;
pub use crate::foundation::core::{CanvasSize, LatLon, Point, Rect, Rgba8};
pub use crate::foundation::error::{ROUTE_LIMIT_MESSAGE, TriplogError, TriplogResult};
pub use crate::foundation::generation::{Generation, GenerationCounter, Tagged};
pub use crate::logsheet::hours::{HoursAudit, HoursPolicy};
pub use crate::logsheet::layout::LogSheetLayout;
pub use crate::logsheet::raster::{CpuRasterizer, RasterFrame};
pub use crate::logsheet::renderer::{LogSheetRenderer, LogSheetSet, RenderOpts, RenderedLogImage};
pub use crate::logsheet::scene::{
    DrawCommand, LogSheetScene, SceneOpts, TextField, compose_log_sheet,
};
pub use crate::logsheet::viewer::{LogSheetViewer, ViewerState};
pub use crate::route::composer::{RouteBoard, RouteComposer};
pub use crate::route::directions::{
    DEFAULT_DIRECTIONS_URL, DirectionsService, OrsDirectionsClient, RoutePath, RouteResult,
};
pub use crate::route::polyline::decode_polyline;
pub use crate::route::waypoint::{Waypoint, WaypointRole, build_waypoints};
pub use crate::trip::model::{DailyLogEntry, DutyStatus, Stop, StopKind, Trip};
pub use crate::trip::source::HttpTripSource;
