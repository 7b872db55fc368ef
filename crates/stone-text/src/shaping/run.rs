use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::font::{FontId, GlyphId};
use crate::geometry::{Axis, Point, Rect, Size};
use crate::unicode::{Punctuation, is_newline};

/// Whether a run is drawn after truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    Invisible,
    /// Last run before the truncation point; drawn as an ellipsis glyph.
    Ellipsis,
}

/// One grapheme cluster with its glyph and placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Owning token.
    pub token_id: usize,
    /// Position of the run within its token.
    pub token_run_index: usize,
    pub font_id: FontId,
    /// First scalar of the cluster; drives classification and shaping.
    pub ch: char,
    /// Byte range of the cluster in the parsed text.
    pub range: Range<usize>,
    pub punctuation: Punctuation,
    pub glyph: GlyphId,
    pub advance: Size,
    /// Ink bounds reported by the backend, y-up.
    pub bounds: Rect,
    /// Glyph origin (baseline) in layout space.
    pub position: Point,
    /// Cell used for line breaking, alignment and hit testing.
    pub frame: Rect,
    pub visibility: Visibility,
    pub line: usize,
}

impl Run {
    pub fn is_newline(&self) -> bool {
        is_newline(self.ch)
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Invisible
    }

    /// Source text of the run.
    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.range.clone()).unwrap_or_default()
    }

    pub(crate) fn shift(&mut self, axis: Axis, delta: f32) {
        self.position.shift_along(axis, delta);
        self.frame = self.frame.shift_along(axis, delta);
    }
}

/// A contiguous range of runs forming one word or grapheme cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub runs: Range<usize>,
}

impl Token {
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
