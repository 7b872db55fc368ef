use std::sync::Arc;

use fontdb::{Database, Family, ID, Query, Source, Stretch, Style, Weight};
use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::font::{FontError, FontFace, FontHandle, GlyphId, Result, ShapingBackend};
use crate::geometry::{Rect, Size};

/// Shaping backend over the fonts installed on this machine.
///
/// Fonts are looked up by PostScript name first, then by family name.
/// Names that match nothing resolve to a system sans-serif face so that
/// layout still produces measurable runs.
pub struct SystemFontBackend {
    db: Database,
    faces: Mutex<HashMap<Arc<str>, Option<Arc<FontFace>>>>,
    fallback: Option<Arc<FontFace>>,
}

impl SystemFontBackend {
    /// Discover system fonts.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::with_database(db)
    }

    /// Use an already populated database, e.g. one with bundled fonts loaded.
    pub fn with_database(db: Database) -> Self {
        let fallback = db
            .query(&Query {
                families: &[
                    Family::SansSerif,
                    Family::Name("Hiragino Sans"),
                    Family::Name("Noto Sans CJK JP"),
                    Family::Name("Arial"),
                ],
                weight: Weight::NORMAL,
                stretch: Stretch::Normal,
                style: Style::Normal,
            })
            .and_then(|id| match load_face(&db, id) {
                Ok(face) => Some(Arc::new(face)),
                Err(err) => {
                    tracing::warn!(%err, "failed to load fallback system font");
                    None
                }
            });
        Self {
            db,
            faces: Mutex::new(HashMap::new()),
            fallback,
        }
    }

    fn find(&self, name: &str) -> Option<ID> {
        self.db
            .faces()
            .find(|info| info.post_script_name == name)
            .or_else(|| {
                self.db
                    .faces()
                    .find(|info| info.families.iter().any(|(family, _)| family == name))
            })
            .map(|info| info.id)
    }

    /// Resolve a font name to a loaded face, caching the outcome.
    pub fn face(&self, name: &str) -> Option<Arc<FontFace>> {
        let mut faces = self.faces.lock();
        if let Some(face) = faces.get(name) {
            return face.clone().or_else(|| self.fallback.clone());
        }

        let loaded = match self.find(name) {
            Some(id) => match load_face(&self.db, id) {
                Ok(face) => Some(Arc::new(face)),
                Err(err) => {
                    tracing::warn!(font = name, %err, "failed to load system font");
                    None
                }
            },
            None => {
                tracing::trace!(font = name, "font not installed, using fallback face");
                None
            }
        };
        faces.insert(Arc::from(name), loaded.clone());
        loaded.or_else(|| self.fallback.clone())
    }

    /// Register a face loaded from outside the database under `name`,
    /// shadowing any installed font of that name.
    pub fn insert_face(&self, name: &str, face: FontFace) {
        tracing::debug!(font = name, "registered font file");
        self.faces.lock().insert(Arc::from(name), Some(Arc::new(face)));
    }
}

impl Default for SystemFontBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn load_face(db: &Database, id: ID) -> Result<FontFace> {
    let face = db
        .face(id)
        .ok_or_else(|| FontError::UnknownFont(format!("{id:?}")))?;

    let bytes: Vec<u8> = match &face.source {
        Source::File(path) => std::fs::read(path)?,
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
    };

    FontFace::from_vec(bytes, face.index as usize)
}

impl ShapingBackend for SystemFontBackend {
    fn glyph_for(&self, font: &FontHandle, ch: char) -> GlyphId {
        self.face(&font.name).map_or(0, |face| face.glyph_for(ch))
    }

    fn advance(&self, font: &FontHandle, glyph: GlyphId) -> Size {
        self.face(&font.name).map_or(Size::zero(), |face| {
            let (width, _) = face.advance(glyph, font.size);
            Size::new(width, 0.0)
        })
    }

    fn bounding_box(&self, font: &FontHandle, glyph: GlyphId) -> Rect {
        self.face(&font.name)
            .map_or(Rect::zero(), |face| face.glyph_bounds(glyph, font.size))
    }

    fn ascent(&self, font: &FontHandle) -> f32 {
        self.face(&font.name)
            .map_or(0.0, |face| face.scaled_metrics(font.size).ascent)
    }

    fn descent(&self, font: &FontHandle) -> f32 {
        self.face(&font.name)
            .map_or(0.0, |face| face.scaled_metrics(font.size).descent)
    }

    fn raw_table(&self, font: &FontHandle, tag: [u8; 4]) -> Option<Arc<[u8]>> {
        self.face(&font.name)?.table(tag)
    }

    fn full_name(&self, font: &FontHandle) -> String {
        match self.face(&font.name) {
            Some(face) if !face.full_name().is_empty() => face.full_name().to_owned(),
            _ => font.name.to_string(),
        }
    }
}
