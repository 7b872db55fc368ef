use std::ops::RangeInclusive;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::font::{FontHandle, GlyphId, ShapingBackend};
use crate::geometry::{Rect, Size};

const ASCENT: f32 = 0.88;
const DESCENT: f32 = 0.12;
/// Glyph ids at or above this value are set full width.
const WIDE_GLYPHS: GlyphId = 0x2e80;

/// A synthetic font: a name, the characters it covers and optional tables.
#[derive(Debug, Clone, Default)]
pub struct FixedFont {
    coverage: Vec<RangeInclusive<char>>,
    tables: HashMap<[u8; 4], Arc<[u8]>>,
}

impl FixedFont {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn covering(mut self, range: RangeInclusive<char>) -> Self {
        self.coverage.push(range);
        self
    }

    pub fn with_table(mut self, tag: [u8; 4], bytes: impl Into<Arc<[u8]>>) -> Self {
        self.tables.insert(tag, bytes.into());
        self
    }

    fn covers(&self, ch: char) -> bool {
        self.coverage.iter().any(|range| range.contains(&ch))
    }
}

/// Deterministic backend with synthetic metrics.
///
/// Glyph ids are derived from code points, full-width characters advance
/// by one em and everything else by half an em. Used for headless
/// measurement and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedBackend {
    fonts: HashMap<Arc<str>, FixedFont>,
}

impl FixedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register synthetic fonts under the default font manager names.
    pub fn with_default_fonts() -> Self {
        Self::new()
            .with_font(
                "HelveticaNeue",
                FixedFont::new()
                    .covering(' '..='~')
                    .covering('\u{2026}'..='\u{2026}'),
            )
            .with_font(
                "HiraginoSans-W3",
                FixedFont::new()
                    .covering('\u{3000}'..='\u{30ff}')
                    .covering('\u{3400}'..='\u{9fff}')
                    .covering('\u{fe10}'..='\u{fe4f}')
                    .covering('\u{ff00}'..='\u{ffef}')
                    .covering('\u{22ee}'..='\u{22ee}'),
            )
            .with_font(
                "AppleColorEmoji",
                FixedFont::new()
                    .covering('\u{2600}'..='\u{27bf}')
                    .covering('\u{1f300}'..='\u{1faff}'),
            )
    }

    pub fn with_font(mut self, name: &str, font: FixedFont) -> Self {
        self.fonts.insert(Arc::from(name), font);
        self
    }

    fn font(&self, name: &str) -> Option<&FixedFont> {
        self.fonts.get(name)
    }
}

/// Glyph id a code point maps to; supplementary planes fold into the
/// private use area.
pub fn fixed_glyph(ch: char) -> GlyphId {
    let value = ch as u32;
    if value <= 0xffff {
        value as GlyphId
    } else {
        0xe000 | (value & 0x0fff) as GlyphId
    }
}

impl ShapingBackend for FixedBackend {
    fn glyph_for(&self, font: &FontHandle, ch: char) -> GlyphId {
        match self.font(&font.name) {
            Some(fixed) if fixed.covers(ch) => fixed_glyph(ch),
            _ => 0,
        }
    }

    fn advance(&self, font: &FontHandle, glyph: GlyphId) -> Size {
        let width = match glyph {
            0 => 0.0,
            g if g >= WIDE_GLYPHS => font.size,
            _ => font.size * 0.5,
        };
        Size::new(width, 0.0)
    }

    fn bounding_box(&self, font: &FontHandle, glyph: GlyphId) -> Rect {
        let advance = self.advance(font, glyph);
        if advance.width == 0.0 {
            return Rect::zero();
        }
        Rect::new(0.0, -font.size * DESCENT, advance.width, font.size)
    }

    fn ascent(&self, font: &FontHandle) -> f32 {
        font.size * ASCENT
    }

    fn descent(&self, font: &FontHandle) -> f32 {
        font.size * DESCENT
    }

    fn raw_table(&self, font: &FontHandle, tag: [u8; 4]) -> Option<Arc<[u8]>> {
        self.font(&font.name)?.tables.get(&tag).cloned()
    }

    fn full_name(&self, font: &FontHandle) -> String {
        font.name.to_string()
    }
}
