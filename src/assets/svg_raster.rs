use crate::foundation::error::{TriplogError, TriplogResult};

// Avoid pathological allocations from hostile templates.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG tree stretched to exactly `width` x `height` premultiplied RGBA8 pixels.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> TriplogResult<Vec<u8>> {
    if width > MAX_DIM || height > MAX_DIM {
        return Err(TriplogError::render(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let size = tree.size();
    let (sx, sy) = stretch_scale(size.width(), size.height(), width, height)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| TriplogError::render("failed to allocate svg pixmap"))?;

    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

fn stretch_scale(src_w: f32, src_h: f32, width: u32, height: u32) -> TriplogResult<(f32, f32)> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(src_w) || !valid(src_h) {
        return Err(TriplogError::asset_load(format!(
            "svg has invalid width/height: {src_w}x{src_h}"
        )));
    }
    Ok((width as f32 / src_w, height as f32 / src_h))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
