use std::sync::Arc;

use crate::geometry::{Rect, Size, Transform};
use crate::unicode::Script;

/// Glyph index within a font. Zero is `.notdef`.
pub type GlyphId = swash::GlyphId;

/// A font name at a concrete size and orientation, ready for shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    pub font_id: usize,
    pub name: Arc<str>,
    pub script: Script,
    /// Pixel size with the script scale already applied.
    pub size: f32,
    /// Maps backend glyph space (y-up) into layout space (y-down), plus a
    /// quarter turn for rotated runs in vertical text.
    pub transform: Transform,
}

/// Capabilities the layout engine needs from a font backend.
///
/// Implementations resolve fonts by name; unknown names should degrade to
/// some fallback face rather than fail, since the parser never errors on
/// unshapeable input.
pub trait ShapingBackend: Send + Sync {
    /// Whether the font maps `ch` to a real glyph.
    fn has_glyph(&self, font: &FontHandle, ch: char) -> bool {
        self.glyph_for(font, ch) != 0
    }

    /// Nominal glyph for `ch`, or 0 when the font has none.
    fn glyph_for(&self, font: &FontHandle, ch: char) -> GlyphId;

    /// Horizontal advance of `glyph` in pixels.
    fn advance(&self, font: &FontHandle, glyph: GlyphId) -> Size;

    /// Ink bounds of `glyph` in pixels, y-up relative to the baseline origin.
    fn bounding_box(&self, font: &FontHandle, glyph: GlyphId) -> Rect;

    fn ascent(&self, font: &FontHandle) -> f32;

    fn descent(&self, font: &FontHandle) -> f32;

    /// Raw bytes of the sfnt table `tag`, if the font has one.
    fn raw_table(&self, font: &FontHandle, tag: [u8; 4]) -> Option<Arc<[u8]>>;

    /// Full name of the face the handle resolves to.
    fn full_name(&self, font: &FontHandle) -> String;
}
