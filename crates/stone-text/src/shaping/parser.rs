use crate::config::Direction;
use crate::context::Context;
use crate::geometry::{Point, Rect};
use crate::shaping::{Run, Token, Visibility};
use crate::unicode::{Punctuation, Script, Segmentation, clusters_in, is_newline, token_spans};

impl Context {
    /// Rebuild runs and tokens from `text`.
    ///
    /// Each token span becomes one token and each grapheme cluster in it one
    /// run, shaped against the font its first scalar resolves to. Vertical
    /// Japanese runs take the font's vertical form when it has one. Nothing
    /// here fails: uncovered characters get glyph 0.
    pub fn parse(&mut self, text: &str) {
        let mode = if self.config.divide_by_words {
            Segmentation::Words
        } else {
            Segmentation::Graphemes
        };
        let size = self.adjust_font_size();
        let vertical = self.config.direction == Direction::Vertical;
        let backend = self.backend();

        let mut runs: Vec<Run> = Vec::new();
        let mut tokens = Vec::new();
        for (token_id, span) in token_spans(text, mode).into_iter().enumerate() {
            let first = runs.len();
            for (token_run_index, range) in clusters_in(text, span).enumerate() {
                let Some(ch) = text[range.clone()].chars().next() else {
                    continue;
                };

                // Terminators keep the previous run's metrics.
                let font_id = if is_newline(ch) {
                    runs.last().map_or(0, |run| run.font_id)
                } else {
                    self.fonts.resolve_font(backend, ch)
                };

                let font = self.fonts.font_handle(font_id, size, false);
                let mut glyph = backend.glyph_for(&font, ch);
                if vertical && glyph != 0 && Script::of(ch) == Some(Script::Japanese) {
                    if let Some(substitute) =
                        self.substitutions().vertical_substitute(backend, &font, glyph)
                    {
                        glyph = substitute;
                    }
                }

                runs.push(Run {
                    token_id,
                    token_run_index,
                    font_id,
                    ch,
                    range,
                    punctuation: Punctuation::of(ch),
                    glyph,
                    advance: backend.advance(&font, glyph),
                    bounds: backend.bounding_box(&font, glyph),
                    position: Point::zero(),
                    frame: Rect::zero(),
                    visibility: Visibility::Visible,
                    line: 0,
                });
            }
            tokens.push(Token {
                runs: first..runs.len(),
            });
        }

        self.text = text.to_owned();
        self.runs = runs;
        self.tokens = tokens;
        self.line_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::{Direction, TextConfig};
    use crate::context::Context;
    use crate::font::FixedBackend;
    use crate::font::fixed::fixed_glyph;
    use crate::unicode::Punctuation;

    fn context(config: TextConfig) -> Context {
        Context::with_config(Arc::new(FixedBackend::with_default_fonts()), config)
    }

    #[test]
    fn word_tokens_cover_every_run() {
        let mut ctx = context(TextConfig::default());
        ctx.parse("Hi, 日本\n");
        let pieces: Vec<_> = (0..ctx.tokens().len())
            .map(|id| ctx.token_string(id).unwrap())
            .collect();
        assert_eq!(pieces.concat(), "Hi, 日本\n");
        assert_eq!(pieces[0], "Hi");
        assert_eq!(ctx.runs().len(), 7);
        assert_eq!(ctx.tokens().last().unwrap().runs.end, 7);
    }

    #[test]
    fn grapheme_mode_gives_one_run_tokens() {
        let config = TextConfig {
            divide_by_words: false,
            ..TextConfig::default()
        };
        let mut ctx = context(config);
        ctx.parse("ab👍🏽");
        assert_eq!(ctx.tokens().len(), 3);
        assert!(ctx.tokens().iter().all(|token| token.len() == 1));
        assert_eq!(ctx.token_string(2), Some("👍🏽"));
    }

    #[test]
    fn runs_carry_font_glyph_and_class() {
        let mut ctx = context(TextConfig::default());
        ctx.parse("aあ、");
        let runs = ctx.runs();
        assert_eq!(runs[0].font_id, 0);
        assert_eq!(runs[0].glyph, fixed_glyph('a'));
        // Latin is scaled by 0.95.
        assert!((runs[0].advance.width - 17.0 * 0.95 * 0.5).abs() < 1e-4);
        assert_eq!(runs[1].font_id, 1);
        assert_eq!(runs[1].advance.width, 17.0);
        assert_eq!(runs[2].punctuation, Punctuation::FirstHalf);
    }

    #[test]
    fn newline_inherits_previous_font() {
        let mut ctx = context(TextConfig::default());
        ctx.parse("あ\nb");
        assert_eq!(ctx.runs()[1].font_id, 1);
        assert!(ctx.runs()[1].is_newline());
        assert_eq!(ctx.runs()[2].font_id, 0);
    }

    #[test]
    fn unshapeable_character_still_gets_a_run() {
        let mut ctx = context(TextConfig::default());
        ctx.parse("é");
        assert_eq!(ctx.runs().len(), 1);
        assert_eq!(ctx.runs()[0].glyph, 0);
        assert_eq!(ctx.runs()[0].advance.width, 0.0);
    }

    #[test]
    fn vertical_japanese_takes_vertical_forms() {
        let config = TextConfig {
            direction: Direction::Vertical,
            ..TextConfig::default()
        };
        let mut ctx = context(config);
        ctx.parse("＜－");
        assert_eq!(ctx.runs()[0].glyph, fixed_glyph('︿'));
        assert_eq!(ctx.runs()[1].glyph, fixed_glyph('｜'));

        let mut ctx = context(TextConfig::default());
        ctx.parse("＜");
        assert_eq!(ctx.runs()[0].glyph, fixed_glyph('＜'));
    }

    #[test]
    fn token_text_by_run() {
        let mut ctx = context(TextConfig::default());
        ctx.parse("say hello");
        assert_eq!(ctx.token_string_at(5), Some("hello"));
        assert_eq!(ctx.token_string_at(3), Some(" "));
        assert_eq!(ctx.token_string_at(9), None);
    }

    #[test]
    fn empty_text_has_no_runs() {
        let mut ctx = context(TextConfig::default());
        ctx.parse("abc");
        ctx.parse("");
        assert!(ctx.runs().is_empty());
        assert!(ctx.tokens().is_empty());
        assert_eq!(ctx.line_count(), 0);
    }
}
