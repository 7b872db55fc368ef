//! The text model shared by the parser, layout and geometry queries.

use core::ops::Range;
use std::fmt;
use std::sync::Arc;

use crate::config::{Direction, TextConfig};
use crate::font::{FontHandle, FontManager, GlyphId, ShapingBackend};
use crate::geometry::Size;
use crate::gsub::VerticalSubstitutions;
use crate::shaping::{Run, Token, Visibility};

/// Configuration, font state and the runs of the last parse.
///
/// A context is driven in passes: [`Context::parse`] rebuilds runs and
/// tokens from text, [`Context::layout`] places them inside
/// [`Context::render_size`]. The shaping backend and the vertical
/// substitution cache are shared handles and may be used by several
/// contexts at once.
#[derive(Clone)]
pub struct Context {
    pub config: TextConfig,
    pub fonts: FontManager,
    /// Box the text is laid out in.
    pub render_size: Size,
    /// Multiplier on the font size applied by the auto-shrink search.
    pub adjust_font_scale: f32,
    pub(crate) text: String,
    pub(crate) runs: Vec<Run>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) line_count: usize,
    pub(crate) rendered_size: Size,
    backend: Arc<dyn ShapingBackend>,
    substitutions: Arc<VerticalSubstitutions>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("render_size", &self.render_size)
            .field("adjust_font_scale", &self.adjust_font_scale)
            .field("runs", &self.runs.len())
            .field("tokens", &self.tokens.len())
            .field("line_count", &self.line_count)
            .field("rendered_size", &self.rendered_size)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(backend: Arc<dyn ShapingBackend>) -> Self {
        Self::with_config(backend, TextConfig::default())
    }

    pub fn with_config(backend: Arc<dyn ShapingBackend>, config: TextConfig) -> Self {
        Self {
            config,
            fonts: FontManager::new(),
            render_size: Size::zero(),
            adjust_font_scale: 1.0,
            text: String::new(),
            runs: Vec::new(),
            tokens: Vec::new(),
            line_count: 0,
            rendered_size: Size::zero(),
            backend,
            substitutions: Arc::new(VerticalSubstitutions::new()),
        }
    }

    /// Share a vertical substitution cache with other contexts.
    pub fn with_substitutions(mut self, substitutions: Arc<VerticalSubstitutions>) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn with_render_size(mut self, render_size: Size) -> Self {
        self.render_size = render_size;
        self
    }

    pub fn backend(&self) -> &dyn ShapingBackend {
        &*self.backend
    }

    pub fn substitutions(&self) -> &VerticalSubstitutions {
        &self.substitutions
    }

    /// Text of the last parse.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Extent of the laid-out runs.
    pub fn rendered_size(&self) -> Size {
        self.rendered_size
    }

    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    pub fn line_height(&self) -> f32 {
        self.config.font_size * self.config.line_height_scale
    }

    /// Extra space between lines beyond one font size.
    pub fn line_gap_height(&self) -> f32 {
        self.config.font_size * (self.config.line_height_scale - 1.0)
    }

    pub fn adjust_font_size(&self) -> f32 {
        self.config.font_size * self.adjust_font_scale
    }

    pub fn adjust_line_height(&self) -> f32 {
        self.adjust_font_size() * self.config.line_height_scale
    }

    /// Sum of the advances of a token's runs.
    pub fn advance(&self, token_id: usize) -> f32 {
        self.token_runs(token_id)
            .iter()
            .map(|run| run.advance.width)
            .sum()
    }

    fn token_runs(&self, token_id: usize) -> &[Run] {
        self.tokens
            .get(token_id)
            .and_then(|token| self.runs.get(token.runs.clone()))
            .unwrap_or_default()
    }

    pub fn is_last_in_token(&self, run_index: usize) -> bool {
        let Some(run) = self.runs.get(run_index) else {
            return false;
        };
        self.tokens
            .get(run.token_id)
            .is_none_or(|token| run.token_run_index + 1 >= token.len())
    }

    /// Run indices on `line`; empty if the line has no runs.
    pub fn run_indexes(&self, line: usize) -> Range<usize> {
        let start = self.runs.partition_point(|run| run.line < line);
        let end = self.runs.partition_point(|run| run.line <= line);
        start..end.max(start)
    }

    /// Line of the run at `run_index`; indices past the end report the
    /// last run's line.
    pub fn line_at(&self, run_index: usize) -> usize {
        self.runs
            .get(run_index)
            .or(self.runs.last())
            .map_or(0, |run| run.line)
    }

    /// Whether the run at `run_index` is a line terminator; indices past
    /// the end test the last run.
    pub fn is_newline_at(&self, run_index: usize) -> bool {
        self.runs
            .get(run_index)
            .or(self.runs.last())
            .is_some_and(Run::is_newline)
    }

    /// Source text of a token.
    pub fn token_string(&self, token_id: usize) -> Option<&str> {
        let runs = self.token_runs(token_id);
        let start = runs.first()?.range.start;
        let end = runs.last()?.range.end;
        self.text.get(start..end)
    }

    /// Source text of the token owning the run at `run_index`.
    pub fn token_string_at(&self, run_index: usize) -> Option<&str> {
        self.token_string(self.runs.get(run_index)?.token_id)
    }

    /// Whether the run belongs to a token set horizontally inside vertical
    /// text: up to two digits, or a single letter.
    pub fn is_tate_chu_yoko(&self, run_index: usize) -> bool {
        if !self.config.tate_chu_yoko || self.config.direction != Direction::Vertical {
            return false;
        }
        let Some(run) = self.runs.get(run_index) else {
            return false;
        };
        if self.fonts.script_for(run.font_id).is_upright_in_vertical() {
            return false;
        }

        let runs = self.token_runs(run.token_id);
        if runs.iter().all(|run| run.ch.is_numeric()) {
            runs.len() <= 2
        } else if runs.iter().all(|run| run.ch.is_alphabetic()) {
            runs.len() <= 1
        } else {
            false
        }
    }

    /// Whether the run is drawn rotated a quarter turn in vertical text.
    pub fn is_clockwise(&self, run_index: usize) -> bool {
        let Some(run) = self.runs.get(run_index) else {
            return false;
        };
        self.config.direction == Direction::Vertical
            && !self.fonts.script_for(run.font_id).is_upright_in_vertical()
            && !self.is_tate_chu_yoko(run_index)
    }

    /// Whether the last layout hid or elided any run.
    pub fn is_truncated(&self) -> bool {
        self.runs
            .iter()
            .any(|run| run.visibility != Visibility::Visible)
    }

    /// Font handle to draw the run with.
    pub fn font_handle_for(&self, run_index: usize) -> Option<FontHandle> {
        let run = self.runs.get(run_index)?;
        Some(self.fonts.font_handle(
            run.font_id,
            self.adjust_font_size(),
            self.is_clockwise(run_index),
        ))
    }

    /// Glyph to draw in place of a run marked [`Visibility::Ellipsis`].
    pub fn ellipsis_glyph_for(&self, run_index: usize) -> Option<GlyphId> {
        let run = self.runs.get(run_index)?;
        let glyph = self
            .fonts
            .ellipsis_glyph(self.backend(), run.font_id, self.config.direction);
        (glyph != 0).then_some(glyph)
    }
}
