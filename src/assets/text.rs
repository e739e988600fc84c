use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{TriplogError, TriplogResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Raw font file (TTF/OTF) used to draw every text field on a log sheet.
#[derive(Clone, Debug)]
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl FontAsset {
    /// Wrap font bytes that were loaded elsewhere.
    pub fn from_bytes(bytes: Vec<u8>) -> TriplogResult<Self> {
        if bytes.is_empty() {
            return Err(TriplogError::asset_load("font file is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    /// Read a font file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> TriplogResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            TriplogError::asset_load(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }

    /// Resolve a sans-serif face from the fonts installed on this machine.
    ///
    /// Tries the generic sans-serif family, then common named faces, then any installed face.
    pub fn system_sans_serif() -> TriplogResult<Self> {
        use usvg::fontdb::{Database, Family, Query};

        let mut db = Database::new();
        db.load_system_fonts();

        let candidates = [
            Family::SansSerif,
            Family::Name("DejaVu Sans"),
            Family::Name("Liberation Sans"),
            Family::Name("Noto Sans"),
            Family::Name("Helvetica"),
        ];
        let id = candidates
            .iter()
            .find_map(|family| {
                db.query(&Query {
                    families: std::slice::from_ref(family),
                    ..Query::default()
                })
            })
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| {
                TriplogError::asset_load(
                    "no font configured and no system font found; set a font path",
                )
            })?;

        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| TriplogError::asset_load("system font data is unavailable"))?;
        tracing::debug!(
            family = ?db.face(id).and_then(|f| f.families.first()).map(|(n, _)| n.as_str()),
            "using system font"
        );
        let mut font = Self::from_bytes(bytes)?;
        font.index = index;
        Ok(font)
    }

    pub(crate) fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Face index inside a font collection; 0 for single-face files.
    pub(crate) fn index(&self) -> u32 {
        self.index
    }
}

/// Stateful helper for building Parley text layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and construct fresh Parley contexts around it.
    pub(crate) fn new(font: &FontAsset) -> TriplogResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == font.index()))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                TriplogError::asset_load("no font families registered from font bytes")
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TriplogError::asset_load("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape and lay out a single unwrapped line of plain text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> TriplogResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TriplogError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
