use crate::foundation::error::{TriplogError, TriplogResult};

pub use kurbo::{Affine, BezPath, Point, Rect};

/// A WGS84 coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Create a coordinate from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate when both halves are present.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Self { lat, lon }),
            _ => None,
        }
    }

    /// `[lon, lat]` ordering used by GeoJSON and the directions service.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Log sheet canvas dimensions in pixels.
///
/// The canvas always has a 9:16 aspect ratio: `height = round(width * 16 / 9)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Width the layout anchors were authored against.
    pub const REFERENCE_WIDTH: u32 = 1000;

    /// Build a 9:16 canvas for `width`.
    pub fn for_width(width: u32) -> TriplogResult<Self> {
        if width == 0 {
            return Err(TriplogError::validation("canvas width must be > 0"));
        }
        let height = ((f64::from(width) * 16.0) / 9.0).round() as u32;
        // The CPU rasterizer addresses pixmaps with u16 dimensions.
        if height > u32::from(u16::MAX) {
            return Err(TriplogError::validation(format!(
                "canvas width {width} yields height {height}, which exceeds {}",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Factor applied to anchors authored at [`CanvasSize::REFERENCE_WIDTH`].
    pub fn scale(self) -> f64 {
        f64::from(self.width) / f64::from(Self::REFERENCE_WIDTH)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: Self::REFERENCE_WIDTH,
            height: 1778,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
