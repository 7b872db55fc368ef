use std::sync::Arc;

use swash::scale::ScaleContext;
use swash::{FontRef, GlyphId, Metrics, StringId};

use crate::font::{FontError, FontMetrics, Result, ScaledFontMetrics};
use crate::geometry::Rect;

/// Loaded font face backed by a font file (TTF/OTF/TTC).
///
/// This is a thin wrapper around `swash::FontRef` that owns the
/// underlying font data and answers the per-glyph questions the
/// shaping backend is asked.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Full font data.
    data: Arc<[u8]>,
    /// Offset to the table directory for this font.
    offset: u32,
    /// Cache key used internally by swash.
    key: swash::CacheKey,
    /// Extracted font metrics in font units.
    metrics: FontMetrics,
    full_name: String,
}

impl FontFace {
    /// Create a font face from raw bytes and a font index within the file.
    pub fn from_bytes(data: Arc<[u8]>, index: usize) -> Result<Self> {
        let font = FontRef::from_index(&data, index).ok_or(FontError::InvalidFont)?;
        let metrics = Self::metrics_from_swash(&font);
        let full_name = font
            .localized_strings()
            .find_by_id(StringId::Full, None)
            .map(|name| name.chars().collect::<String>())
            .unwrap_or_default();
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            metrics,
            full_name,
        })
    }

    /// Create a font face from raw bytes owned by a `Vec<u8>`.
    pub fn from_vec(data: Vec<u8>, index: usize) -> Result<Self> {
        Self::from_bytes(Arc::from(data), index)
    }

    /// Create a font face from a font file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>, index: usize) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, index)
    }

    /// Return a transient `FontRef` for interacting with swash APIs.
    fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    fn metrics_from_swash(font: &FontRef<'_>) -> FontMetrics {
        // Use default (no variation) coordinates.
        let Metrics {
            units_per_em,
            ascent,
            descent,
            leading,
            ..
        } = font.metrics(&[]);

        FontMetrics {
            ascent,
            descent,
            line_gap: leading,
            units_per_em,
        }
    }

    /// Name table full name, empty if the font has none.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Font metrics in font units.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Font metrics scaled to the requested pixel size (px per em).
    pub fn scaled_metrics(&self, font_size: f32) -> ScaledFontMetrics {
        self.metrics.scale_to_pixels(font_size)
    }

    /// Nominal glyph for `ch` from the character map.
    pub fn glyph_for(&self, ch: char) -> GlyphId {
        self.as_swash_ref().charmap().map(ch)
    }

    /// Horizontal and vertical advance of `glyph` at `font_size`.
    pub fn advance(&self, glyph: GlyphId, font_size: f32) -> (f32, f32) {
        let font = self.as_swash_ref();
        let metrics = font.glyph_metrics(&[]).scale(font_size);
        (metrics.advance_width(glyph), metrics.advance_height(glyph))
    }

    /// Outline bounds of `glyph` at `font_size`, y-up.
    pub fn glyph_bounds(&self, glyph: GlyphId, font_size: f32) -> Rect {
        let mut context = ScaleContext::new();
        let font = self.as_swash_ref();
        let mut scaler = context.builder(font).size(font_size).build();
        match scaler.scale_outline(glyph) {
            Some(outline) => {
                let bounds = outline.bounds();
                Rect::new(
                    bounds.min.x,
                    bounds.min.y,
                    bounds.max.x - bounds.min.x,
                    bounds.max.y - bounds.min.y,
                )
            }
            None => Rect::zero(),
        }
    }

    /// Copy of the raw sfnt table `tag`.
    pub fn table(&self, tag: [u8; 4]) -> Option<Arc<[u8]>> {
        self.as_swash_ref()
            .table(swash::tag_from_bytes(&tag))
            .map(Arc::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file_is_an_io_error() {
        let err = FontFace::from_path("does-not-exist/font.ttf", 0).unwrap_err();
        assert!(matches!(err, FontError::Io(_)));
    }

    #[test]
    fn non_font_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("stone-not-a-font-{}.ttf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();
        let result = FontFace::from_path(&path, 0);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(FontError::InvalidFont)));
    }
}
