use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::font::{FontHandle, GlyphId, ShapingBackend};
use crate::gsub::GsubTable;

/// Fonts whose remap tables are kept before lookups start being refused.
pub const DEFAULT_CAPACITY: usize = 16;

const GLYPH_SPACE: usize = 1 << 16;
const GSUB: [u8; 4] = *b"GSUB";

/// Vertical forms many fonts leave out of GSUB.
const PRESEEDED: [(char, char); 3] = [('＜', '︿'), ('＞', '﹀'), ('－', '｜')];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Slot {
    #[default]
    Unresolved,
    None,
    Glyph(GlyphId),
}

enum TableState {
    NotLoaded,
    Missing,
    Loaded(Arc<[u8]>),
}

struct FontEntry {
    table: TableState,
    slots: Box<[Slot]>,
}

impl FontEntry {
    fn new(backend: &dyn ShapingBackend, font: &FontHandle) -> Self {
        let mut slots = vec![Slot::Unresolved; GLYPH_SPACE].into_boxed_slice();
        for (from, to) in PRESEEDED {
            let from = backend.glyph_for(font, from);
            let to = backend.glyph_for(font, to);
            if from != 0 && to != 0 {
                slots[from as usize] = Slot::Glyph(to);
            }
        }
        Self {
            table: TableState::NotLoaded,
            slots,
        }
    }

    fn table(&mut self, backend: &dyn ShapingBackend, font: &FontHandle, name: &str) -> Option<Arc<[u8]>> {
        if let TableState::NotLoaded = self.table {
            self.table = match backend.raw_table(font, GSUB) {
                Some(bytes) => TableState::Loaded(bytes),
                None => {
                    tracing::debug!(font = name, "font has no GSUB table");
                    TableState::Missing
                }
            };
        }
        match &self.table {
            TableState::Loaded(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }

    fn resolve(
        &mut self,
        backend: &dyn ShapingBackend,
        font: &FontHandle,
        name: &str,
        glyph: GlyphId,
    ) -> Option<GlyphId> {
        let bytes = self.table(backend, font, name)?;
        let result = GsubTable::parse(&bytes).and_then(|table| table.vertical_substitute(glyph));
        match result {
            Ok(substitute) => substitute.filter(|&g| g != 0),
            Err(err) => {
                tracing::debug!(font = name, glyph, %err, "GSUB lookup failed");
                None
            }
        }
    }
}

#[derive(Default)]
struct Inner {
    fonts: HashMap<String, FontEntry>,
    overflows: usize,
}

/// Per-font cache of vertical glyph substitutions, shared between contexts.
///
/// Each font gets a remap table covering the whole glyph id space, filled
/// one glyph at a time. Once `capacity` fonts are cached, lookups for further
/// fonts return no substitution.
pub struct VerticalSubstitutions {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl Default for VerticalSubstitutions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VerticalSubstitutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("VerticalSubstitutions")
            .field("capacity", &self.capacity)
            .field("fonts", &inner.fonts.len())
            .field("overflows", &inner.overflows)
            .finish()
    }
}

impl VerticalSubstitutions {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Number of fonts with a remap table.
    pub fn len(&self) -> usize {
        self.inner.lock().fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups refused because the cache was full.
    pub fn overflows(&self) -> usize {
        self.inner.lock().overflows
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.fonts.clear();
        inner.overflows = 0;
    }

    /// Vertical form of `glyph` in `font`, if the font has one.
    pub fn vertical_substitute(
        &self,
        backend: &dyn ShapingBackend,
        font: &FontHandle,
        glyph: GlyphId,
    ) -> Option<GlyphId> {
        let name = backend.full_name(font);
        let mut inner = self.inner.lock();

        if !inner.fonts.contains_key(&name) {
            if inner.fonts.len() >= self.capacity {
                inner.overflows += 1;
                if inner.overflows == 1 {
                    tracing::warn!(
                        font = %name,
                        capacity = self.capacity,
                        "vertical substitution cache is full, skipping substitution"
                    );
                }
                return None;
            }
            inner.fonts.insert(name.clone(), FontEntry::new(backend, font));
        }

        let entry = inner.fonts.get_mut(&name)?;
        match entry.slots[glyph as usize] {
            Slot::Glyph(substitute) => return Some(substitute),
            Slot::None => return None,
            Slot::Unresolved => {}
        }

        let resolved = entry.resolve(backend, font, &name, glyph);
        entry.slots[glyph as usize] = resolved.map_or(Slot::None, Slot::Glyph);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::fixed::{FixedFont, fixed_glyph};
    use crate::font::{FixedBackend, FontManager};
    use crate::gsub::table::tests::{gsub, single_format2};

    fn coverage(glyphs: &[u16]) -> Vec<u8> {
        let mut out = vec![0, 1];
        out.extend_from_slice(&(glyphs.len() as u16).to_be_bytes());
        glyphs.iter().for_each(|g| out.extend_from_slice(&g.to_be_bytes()));
        out
    }

    fn handle(manager: &FontManager, font_id: usize) -> FontHandle {
        manager.font_handle(font_id, 17.0, false)
    }

    #[test]
    fn substitutes_from_gsub() {
        let table = gsub(b"kana", b"vrt2", 1, &single_format2(coverage(&[5]), &[42]));
        let backend = FixedBackend::new().with_font("HelveticaNeue", FixedFont::new().with_table(GSUB, table));
        let manager = FontManager::new();
        let cache = VerticalSubstitutions::new();
        let font = handle(&manager, 0);

        assert_eq!(cache.vertical_substitute(&backend, &font, 5), Some(42));
        assert_eq!(cache.vertical_substitute(&backend, &font, 5), Some(42));
        assert_eq!(cache.vertical_substitute(&backend, &font, 6), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn preseeded_forms_need_no_table() {
        let backend = FixedBackend::with_default_fonts();
        let manager = FontManager::new();
        let cache = VerticalSubstitutions::new();
        let font = handle(&manager, 1);

        assert_eq!(
            cache.vertical_substitute(&backend, &font, fixed_glyph('＜')),
            Some(fixed_glyph('︿'))
        );
        assert_eq!(
            cache.vertical_substitute(&backend, &font, fixed_glyph('－')),
            Some(fixed_glyph('｜'))
        );
        assert_eq!(cache.vertical_substitute(&backend, &font, fixed_glyph('あ')), None);
    }

    #[test]
    fn malformed_table_is_cached_as_none() {
        let backend = FixedBackend::new()
            .with_font("HelveticaNeue", FixedFont::new().with_table(GSUB, vec![0, 1, 0, 0, 0xff]));
        let manager = FontManager::new();
        let cache = VerticalSubstitutions::new();
        let font = handle(&manager, 0);
        assert_eq!(cache.vertical_substitute(&backend, &font, 5), None);
        assert_eq!(cache.vertical_substitute(&backend, &font, 5), None);
    }

    #[test]
    fn overflow_is_counted_not_fatal() {
        let backend = FixedBackend::with_default_fonts();
        let manager = FontManager::new();
        let cache = VerticalSubstitutions::with_capacity(1);

        assert_eq!(cache.vertical_substitute(&backend, &handle(&manager, 0), 5), None);
        assert_eq!(cache.overflows(), 0);
        assert_eq!(cache.vertical_substitute(&backend, &handle(&manager, 1), 5), None);
        assert_eq!(cache.vertical_substitute(&backend, &handle(&manager, 2), 5), None);
        assert_eq!(cache.overflows(), 2);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.overflows(), 0);
    }
}
