use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image, looks_like_svg, parse_svg};
use crate::assets::svg_raster::rasterize_svg_to_premul_rgba8;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{TriplogError, TriplogResult};

#[derive(Clone, Debug)]
enum TemplateSource {
    Raster(PreparedImage),
    Svg(Arc<usvg::Tree>),
}

/// Blank log-sheet form drawn underneath every rendered sheet.
///
/// Loading is fail-fast: a template that cannot be read or decoded is an
/// [`TriplogError::AssetLoad`] and no sheet is rendered from it.
#[derive(Clone, Debug)]
pub struct LogSheetTemplate {
    source: TemplateSource,
}

impl LogSheetTemplate {
    /// Decode a template from encoded bytes (any raster format `image` reads, or SVG).
    pub fn from_bytes(bytes: &[u8]) -> TriplogResult<Self> {
        let source = if looks_like_svg(bytes) {
            TemplateSource::Svg(parse_svg(bytes)?)
        } else {
            TemplateSource::Raster(decode_image(bytes)?)
        };
        Ok(Self { source })
    }

    /// Read and decode a template file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> TriplogResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            TriplogError::asset_load(format!("failed to read template '{}': {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already-decoded raster image.
    pub fn from_image(image: PreparedImage) -> Self {
        Self {
            source: TemplateSource::Raster(image),
        }
    }

    /// Pixels to stretch over `canvas`.
    ///
    /// Raster templates are returned at native size (the rasterizer scales them); vector templates
    /// are rasterized directly at canvas size.
    pub(crate) fn prepare_for(&self, canvas: CanvasSize) -> TriplogResult<PreparedImage> {
        match &self.source {
            TemplateSource::Raster(img) => Ok(img.clone()),
            TemplateSource::Svg(tree) => {
                let rgba = rasterize_svg_to_premul_rgba8(tree, canvas.width, canvas.height)?;
                Ok(PreparedImage {
                    width: canvas.width,
                    height: canvas.height,
                    rgba8_premul: Arc::new(rgba),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
