use std::sync::Arc;

use kurbo::Shape;

use crate::assets::decode::{PreparedImage, unpremultiply_rgba8_in_place};
use crate::assets::text::{FontAsset, TextLayoutEngine};
use crate::foundation::core::{Affine, BezPath, Point, Rgba8};
use crate::foundation::error::{TriplogError, TriplogResult};
use crate::logsheet::scene::{DrawCommand, LogSheetScene};

/// Rasterized log sheet.
#[derive(Clone, Debug)]
pub struct RasterFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl RasterFrame {
    /// Straight-alpha pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// CPU rasterizer for [`LogSheetScene`]s.
///
/// Text commands are skipped when no font was supplied.
pub struct CpuRasterizer {
    text: Option<TextLayoutEngine>,
    font: Option<vello_cpu::peniko::FontData>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRasterizer")
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl CpuRasterizer {
    /// Create a rasterizer drawing text with `font`.
    pub fn new(font: Option<&FontAsset>) -> TriplogResult<Self> {
        let (text, font) = match font {
            Some(f) => (
                Some(TextLayoutEngine::new(f)?),
                Some(vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(f.bytes().to_vec()),
                    f.index(),
                )),
            ),
            None => (None, None),
        };
        Ok(Self {
            text,
            font,
            ctx: None,
        })
    }

    /// Return `true` when text commands will be drawn.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draw `scene` over `template`, stretched to the scene canvas.
    pub fn rasterize(
        &mut self,
        scene: &LogSheetScene,
        template: &PreparedImage,
    ) -> TriplogResult<RasterFrame> {
        let (width, height) = (scene.canvas.width, scene.canvas.height);
        let w: u16 = width
            .try_into()
            .map_err(|_| TriplogError::render("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| TriplogError::render("canvas height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let mut skipped_text = 0usize;
        for cmd in &scene.commands {
            match cmd {
                DrawCommand::Template => {
                    draw_template(&mut ctx, template, width, height)?;
                }
                DrawCommand::Bar { rect, color, .. } => {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(paint(*color));
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        rect.x0, rect.y0, rect.x1, rect.y1,
                    ));
                }
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => {
                    let circle = kurbo::Circle::new(*center, *radius);
                    let outline = kurbo::stroke(
                        circle.path_elements(0.1),
                        &kurbo::Stroke::new(*width),
                        &kurbo::StrokeOpts::default(),
                        0.1,
                    );
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(paint(*color));
                    ctx.fill_path(&bezpath_to_cpu(&outline));
                }
                DrawCommand::Marker { path, color, .. } => {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(paint(*color));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                DrawCommand::Text {
                    text,
                    origin,
                    size_px,
                    color,
                    ..
                } => {
                    let (Some(engine), Some(font)) = (self.text.as_mut(), self.font.as_ref())
                    else {
                        skipped_text += 1;
                        continue;
                    };
                    draw_text(&mut ctx, engine, font, text, *origin, *size_px, *color)?;
                }
            }
        }
        if skipped_text > 0 {
            tracing::warn!(skipped_text, "no font configured; text fields left blank");
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        Ok(RasterFrame {
            width,
            height,
            data,
        })
    }
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn draw_template(
    ctx: &mut vello_cpu::RenderContext,
    template: &PreparedImage,
    width: u32,
    height: u32,
) -> TriplogResult<()> {
    let pixmap = pixmap_from_premul_bytes(&template.rgba8_premul, template.width, template.height)?;
    let img = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    let stretch = Affine::scale_non_uniform(
        f64::from(width) / f64::from(template.width),
        f64::from(height) / f64::from(template.height),
    );
    ctx.set_transform(affine_to_cpu(stretch));
    ctx.set_paint(img);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(template.width),
        f64::from(template.height),
    ));
    Ok(())
}

// `origin` is the baseline start of the first line, like a canvas `fillText`.
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    font: &vello_cpu::peniko::FontData,
    text: &str,
    origin: Point,
    size_px: f32,
    color: Rgba8,
) -> TriplogResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    let layout = engine.layout_line(text, size_px, color.into())?;
    let baseline = layout
        .lines()
        .next()
        .map(|l| f64::from(l.metrics().baseline))
        .unwrap_or(0.0);
    ctx.set_transform(affine_to_cpu(Affine::translate((
        origin.x,
        origin.y - baseline,
    ))));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let mut x = run.offset();
            let y = run.baseline();
            let glyphs = run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: x + g.x,
                        y: y - g.y,
                    };
                    x += g.advance;
                    glyph
                })
                .collect::<Vec<_>>();
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs.into_iter());
        }
    }
    Ok(())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> TriplogResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| TriplogError::render("template width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| TriplogError::render("template height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(TriplogError::render("template byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/logsheet/raster.rs"]
mod tests;
