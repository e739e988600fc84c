use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use chrono::NaiveDate;

use crate::assets::decode::PreparedImage;
use crate::assets::template::LogSheetTemplate;
use crate::assets::text::FontAsset;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{TriplogError, TriplogResult};
use crate::logsheet::hours::{HoursAudit, HoursPolicy};
use crate::logsheet::layout::LogSheetLayout;
use crate::logsheet::raster::{CpuRasterizer, RasterFrame};
use crate::logsheet::scene::{SceneOpts, compose_log_sheet};
use crate::trip::model::Trip;

/// Renderer construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOpts {
    /// Output canvas; every sheet has this size.
    pub canvas: CanvasSize,
    /// Handling of implausible duty hours.
    pub hours_policy: HoursPolicy,
}

/// One rendered daily log sheet.
#[derive(Clone, Debug)]
pub struct RenderedLogImage {
    index: usize,
    date: NaiveDate,
    trip_start: NaiveDate,
    width: u32,
    height: u32,
    png: Vec<u8>,
    audit: HoursAudit,
}

impl RenderedLogImage {
    /// Position of the source entry in `trip.logs`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Calendar date of the sheet.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Pixel size `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Encoded PNG.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Hours findings recorded while rendering.
    pub fn audit(&self) -> &HoursAudit {
        &self.audit
    }

    /// `data:image/png;base64,...` form of the sheet.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }

    /// File name offered for download: `trip_log_{trip start}_day_{n}.png`, with `n` 1-based.
    pub fn download_file_name(&self) -> String {
        format!(
            "trip_log_{}_day_{}.png",
            self.trip_start.format("%Y-%m-%d"),
            self.index + 1
        )
    }

    /// Write the PNG into `dir` under [`RenderedLogImage::download_file_name`].
    pub fn write_to_dir(&self, dir: &Path) -> TriplogResult<PathBuf> {
        let path = dir.join(self.download_file_name());
        std::fs::write(&path, &self.png).map_err(|e| {
            TriplogError::render(format!("write log sheet '{}': {e}", path.display()))
        })?;
        Ok(path)
    }
}

/// All sheets of one trip, in log order.
#[derive(Clone, Debug, Default)]
pub struct LogSheetSet {
    images: Vec<RenderedLogImage>,
}

impl LogSheetSet {
    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Return `true` when the trip has no logs.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Sheet at `index`.
    pub fn get(&self, index: usize) -> Option<&RenderedLogImage> {
        self.images.get(index)
    }

    /// Sheets in log order.
    pub fn iter(&self) -> std::slice::Iter<'_, RenderedLogImage> {
        self.images.iter()
    }
}

impl IntoIterator for LogSheetSet {
    type Item = RenderedLogImage;
    type IntoIter = std::vec::IntoIter<RenderedLogImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

/// Renders daily log sheets of a trip over one template.
#[derive(Debug)]
pub struct LogSheetRenderer {
    template: PreparedImage,
    layout: LogSheetLayout,
    scene_opts: SceneOpts,
    raster: CpuRasterizer,
}

impl LogSheetRenderer {
    /// Prepare `template` for `opts.canvas`, drawing text with a system sans-serif face.
    ///
    /// Fails with [`TriplogError::AssetLoad`] when no system font can be found.
    pub fn new(template: &LogSheetTemplate, opts: RenderOpts) -> TriplogResult<Self> {
        let font = FontAsset::system_sans_serif()?;
        Self::with_font(template, opts, &font)
    }

    /// Prepare `template` for `opts.canvas`, drawing text with `font`.
    pub fn with_font(
        template: &LogSheetTemplate,
        opts: RenderOpts,
        font: &FontAsset,
    ) -> TriplogResult<Self> {
        Self::build(template, opts, CpuRasterizer::new(Some(font))?)
    }

    /// Form geometry only: template, bars, worked-hours circle and stop markers, no text.
    pub fn without_text(template: &LogSheetTemplate, opts: RenderOpts) -> TriplogResult<Self> {
        Self::build(template, opts, CpuRasterizer::new(None)?)
    }

    fn build(
        template: &LogSheetTemplate,
        opts: RenderOpts,
        raster: CpuRasterizer,
    ) -> TriplogResult<Self> {
        Ok(Self {
            template: template.prepare_for(opts.canvas)?,
            layout: LogSheetLayout::new(opts.canvas),
            scene_opts: SceneOpts {
                hours_policy: opts.hours_policy,
            },
            raster,
        })
    }

    /// Canvas every sheet is rendered at.
    pub fn canvas(&self) -> CanvasSize {
        self.layout.canvas()
    }

    /// Render the sheet for `trip.logs[index]`.
    #[tracing::instrument(skip(self, trip), fields(trip_id = ?trip.id))]
    pub fn render_daily_log(
        &mut self,
        trip: &Trip,
        index: usize,
    ) -> TriplogResult<RenderedLogImage> {
        let entry = trip.logs.get(index).ok_or_else(|| {
            TriplogError::validation(format!(
                "log index {index} out of range (trip has {} logs)",
                trip.logs.len()
            ))
        })?;
        let scene = compose_log_sheet(trip, entry, &self.layout, &self.scene_opts)?;
        let date = entry.parse_date()?;
        let frame = self.raster.rasterize(&scene, &self.template)?;
        let png = encode_png(&frame)?;
        tracing::debug!(date = %date, bytes = png.len(), "rendered log sheet");

        Ok(RenderedLogImage {
            index,
            date,
            trip_start: trip.start_date(),
            width: frame.width,
            height: frame.height,
            png,
            audit: scene.audit,
        })
    }

    /// Render every log of `trip` in order. Any failure aborts the whole set.
    #[tracing::instrument(skip(self, trip), fields(trip_id = ?trip.id, logs = trip.logs.len()))]
    pub fn render_all_daily_logs(&mut self, trip: &Trip) -> TriplogResult<LogSheetSet> {
        trip.route_endpoints()?;
        let images = (0..trip.logs.len())
            .map(|i| self.render_daily_log(trip, i))
            .collect::<TriplogResult<Vec<_>>>()?;
        Ok(LogSheetSet { images })
    }
}

fn encode_png(frame: &RasterFrame) -> TriplogResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut buf,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TriplogError::render(format!("encode png: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/logsheet/renderer.rs"]
mod tests;
