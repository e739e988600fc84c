use crate::foundation::core::LatLon;
use crate::foundation::error::{TriplogError, TriplogResult};

/// Precision of the directions service geometry (five decimal digits).
pub const DEFAULT_PRECISION: u32 = 5;

/// Decode an encoded polyline into `(lat, lon)` points.
///
/// Each coordinate is a zig-zag signed delta from the previous point, split into 5-bit chunks
/// offset by 63, low chunk first, with `0x20` marking continuation.
pub fn decode_polyline(encoded: &str, precision: u32) -> TriplogResult<Vec<LatLon>> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();
    let mut pos = 0usize;
    let mut lat = 0i64;
    let mut lon = 0i64;
    let mut out = Vec::new();

    while pos < bytes.len() {
        lat = accumulate(lat, next_delta(bytes, &mut pos)?)?;
        if pos >= bytes.len() {
            return Err(TriplogError::decode(format!(
                "polyline truncated after latitude at byte {pos}"
            )));
        }
        lon = accumulate(lon, next_delta(bytes, &mut pos)?)?;
        out.push(LatLon::new(lat as f64 / factor, lon as f64 / factor));
    }
    Ok(out)
}

fn accumulate(acc: i64, delta: i64) -> TriplogResult<i64> {
    acc.checked_add(delta)
        .ok_or_else(|| TriplogError::decode("polyline coordinate overflows"))
}

fn next_delta(bytes: &[u8], pos: &mut usize) -> TriplogResult<i64> {
    let mut result = 0i64;
    let mut shift = 0u32;
    loop {
        let Some(&b) = bytes.get(*pos) else {
            return Err(TriplogError::decode("polyline ends inside a value"));
        };
        if !(63..=126).contains(&b) {
            return Err(TriplogError::decode(format!(
                "invalid polyline character {:?} at byte {}",
                b as char, *pos
            )));
        }
        if shift > 60 {
            return Err(TriplogError::decode("polyline value overflows"));
        }
        *pos += 1;
        let chunk = i64::from(b - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[cfg(test)]
#[path = "../../tests/unit/route/polyline.rs"]
mod tests;
