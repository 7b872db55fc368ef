use std::sync::Arc;

use hashbrown::HashMap;

use crate::config::Direction;
use crate::font::{FontHandle, GlyphId, ShapingBackend};
use crate::geometry::Transform;
use crate::unicode::Script;

/// Index into the flattened (font name, script) list.
pub type FontId = usize;

const DEFAULT_FONT: &str = "HelveticaNeue";

/// Color glyph fonts whose bitmaps come out upside down in vertical text.
const NEEDS_FLIP: &[&str] = &["AppleColorEmoji"];

/// Size used when checking coverage and ellipsis glyphs.
const MEASURE_SIZE: f32 = 17.0;

const HORIZONTAL_ELLIPSES: [char; 2] = ['\u{2026}', '\u{22ef}'];
const VERTICAL_ELLIPSES: [char; 2] = ['\u{22ee}', '\u{fe19}'];

fn names(list: &[&str]) -> Vec<Arc<str>> {
    list.iter().map(|name| Arc::from(*name)).collect()
}

/// Per-script font fallback lists and scales.
///
/// Font ids index a flattened list rebuilt by [`FontManager::refresh`].
/// Changing a script's font list leaves existing ids pointing at the old
/// flattening until the next refresh; ids outside the flattening resolve
/// to the default font.
#[derive(Debug, Clone)]
pub struct FontManager {
    script_fonts: HashMap<Script, Vec<Arc<str>>>,
    script_scales: HashMap<Script, f32>,
    flattened: Vec<(Arc<str>, Script)>,
    default_font: Arc<str>,
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManager {
    /// Manager with the stock font lists, already refreshed.
    pub fn new() -> Self {
        let mut script_fonts = HashMap::new();
        script_fonts.insert(Script::Latin, names(&["HelveticaNeue"]));
        script_fonts.insert(Script::Japanese, names(&["HiraginoSans-W3"]));
        script_fonts.insert(
            Script::Emoji,
            names(&["AppleColorEmoji", "ArialUnicodeMS", "MS-Gothic", "Menlo-Regular"]),
        );

        let mut script_scales = HashMap::new();
        script_scales.insert(Script::Latin, 0.95);
        script_scales.insert(Script::Japanese, 1.0);
        script_scales.insert(Script::Emoji, 1.0);

        let mut manager = Self {
            script_fonts,
            script_scales,
            flattened: Vec::new(),
            default_font: Arc::from(DEFAULT_FONT),
        };
        manager.refresh();
        manager
    }

    /// Rebuild the font id space from the current per-script lists.
    pub fn refresh(&mut self) {
        let flattened: Vec<_> = Script::ALL
            .into_iter()
            .flat_map(|script| {
                self.font_names(script)
                    .iter()
                    .map(move |name| (name.clone(), script))
            })
            .collect();
        self.flattened = flattened;
    }

    /// Number of valid font ids.
    pub fn font_count(&self) -> usize {
        self.flattened.len()
    }

    pub fn font_names(&self, script: Script) -> &[Arc<str>] {
        self.script_fonts
            .get(&script)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace a script's fallback list. Call [`FontManager::refresh`] before
    /// the next parse.
    pub fn set_font_names<I, S>(&mut self, script: Script, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.script_fonts
            .insert(script, names.into_iter().map(Into::into).collect());
    }

    pub fn font_name(&self, font_id: FontId) -> Arc<str> {
        match self.flattened.get(font_id) {
            Some((name, _)) => name.clone(),
            None => {
                tracing::trace!(font_id, "font id outside the current flattening");
                self.default_font.clone()
            }
        }
    }

    pub fn script_for(&self, font_id: FontId) -> Script {
        self.flattened
            .get(font_id)
            .map_or(Script::Latin, |(_, script)| *script)
    }

    pub fn font_scale(&self, script: Script) -> f32 {
        self.script_scales.get(&script).copied().unwrap_or(1.0)
    }

    pub fn set_font_scale(&mut self, script: Script, scale: f32) {
        self.script_scales.insert(script, scale);
    }

    pub fn font_scale_for(&self, font_id: FontId) -> f32 {
        self.font_scale(self.script_for(font_id))
    }

    /// First font in the character's script list that has a glyph for it.
    ///
    /// Characters outside every script, and characters no candidate covers,
    /// get font id 0.
    pub fn resolve_font(&self, backend: &dyn ShapingBackend, ch: char) -> FontId {
        let Some(script) = Script::of(ch) else {
            return 0;
        };

        for name in self.font_names(script) {
            let Some(font_id) = self.flattened.iter().position(|(n, _)| n == name) else {
                continue;
            };
            let handle = self.font_handle(font_id, MEASURE_SIZE, false);
            if backend.has_glyph(&handle, ch) {
                return font_id;
            }
        }

        tracing::trace!(?ch, ?script, "no candidate font covers character, using default");
        0
    }

    /// Handle for `font_id` at `size`, scaled by the font's script scale.
    ///
    /// The transform flips y into layout space and, when `clockwise`, adds
    /// a quarter turn for sideways runs in vertical text.
    pub fn font_handle(&self, font_id: FontId, size: f32, clockwise: bool) -> FontHandle {
        let mut transform = Transform::identity().scaled(1.0, -1.0);
        if clockwise {
            transform = transform.rotated(-core::f32::consts::FRAC_PI_2);
        }
        FontHandle {
            font_id,
            name: self.font_name(font_id),
            script: self.script_for(font_id),
            size: size * self.font_scale_for(font_id),
            transform,
        }
    }

    pub fn ascent(&self, backend: &dyn ShapingBackend, font_id: FontId, size: f32) -> f32 {
        backend.ascent(&self.font_handle(font_id, size, false))
    }

    pub fn descent(&self, backend: &dyn ShapingBackend, font_id: FontId, size: f32) -> f32 {
        backend.descent(&self.font_handle(font_id, size, false))
    }

    /// Whether glyphs from this font are stored pre-flipped.
    pub fn needs_flip(&self, font_id: FontId) -> bool {
        let name = self.font_name(font_id);
        NEEDS_FLIP.contains(&&*name)
    }

    /// Ellipsis glyph for truncated text, or 0 if the font has none.
    pub fn ellipsis_glyph(
        &self,
        backend: &dyn ShapingBackend,
        font_id: FontId,
        direction: Direction,
    ) -> GlyphId {
        let handle = self.font_handle(font_id, MEASURE_SIZE, false);
        let candidates = match direction {
            Direction::Horizontal => HORIZONTAL_ELLIPSES,
            Direction::Vertical => VERTICAL_ELLIPSES,
        };
        candidates
            .into_iter()
            .map(|ch| backend.glyph_for(&handle, ch))
            .find(|&glyph| glyph != 0)
            .unwrap_or(0)
    }
}
