//! Auto-shrink search and measurement.

use crate::context::Context;
use crate::geometry::Size;

/// Successive scales closer than this (relative) end the search.
const TOLERANCE: f32 = 0.05;

/// Upper bound on bisection steps.
const MAX_STEPS: usize = 32;

impl Context {
    /// Parse and lay out `text` from scratch.
    ///
    /// Refreshes the font id space and resets the adjust scale, then either
    /// runs the auto-shrink search or a single pass.
    pub fn parse_and_layout(&mut self, text: &str) {
        self.fonts.refresh();
        self.adjust_font_scale = 1.0;
        if self.config.auto_shrink {
            self.shrink_to_fit(text);
        } else {
            self.parse(text);
            self.layout();
        }
    }

    fn layout_at(&mut self, text: &str, scale: f32) -> bool {
        self.adjust_font_scale = scale;
        self.parse(text);
        self.layout();
        !self.is_truncated()
    }

    /// Find the largest font scale in `[min_scale, 1]` at which `text` fits
    /// the render box, and leave the context laid out at that scale.
    ///
    /// Text that fits at full size is left alone. Text that does not fit
    /// even at the minimum scale is laid out at the minimum, truncated.
    /// Otherwise the scale is bisected until a fitting scale is within 5%
    /// of the previous try. A minimum scale outside `(0, 1)` disables the
    /// search. Returns the scale used.
    pub fn shrink_to_fit(&mut self, text: &str) -> f32 {
        let min_scale = self.config.min_scale;
        if self.layout_at(text, 1.0) || min_scale <= 0.0 || min_scale >= 1.0 {
            return 1.0;
        }
        if !self.layout_at(text, min_scale) {
            tracing::trace!(min_scale, "text does not fit at the minimum scale");
            return min_scale;
        }

        let (mut low, mut high) = (min_scale, 1.0_f32);
        let mut best = min_scale;
        let mut scale = min_scale + (1.0 - min_scale) * 0.5;
        for step in 0..MAX_STEPS {
            let tried = scale;
            let fits = self.layout_at(text, tried);
            tracing::trace!(step, scale = tried, fits, "auto-shrink step");
            if fits {
                best = tried;
                low = tried;
                scale = tried + (high - tried) * 0.5;
                if (1.0 - tried / scale).abs() <= TOLERANCE {
                    return tried;
                }
            } else {
                high = tried;
                scale = low + (tried - low) * 0.5;
            }
        }

        self.layout_at(text, best);
        best
    }

    /// Size `text` would take in a box of `size`, at full scale.
    ///
    /// Works on a copy; the context's own runs are untouched.
    pub fn size_that_fits(&self, text: &str, size: Size) -> Size {
        let mut scratch = self.clone();
        scratch.render_size = size;
        scratch.adjust_font_scale = 1.0;
        scratch.fonts.refresh();
        scratch.parse(text);
        scratch.layout();
        scratch.rendered_size
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::TextConfig;
    use crate::context::Context;
    use crate::font::FixedBackend;
    use crate::geometry::Size;

    fn context(min_scale: f32, size: Size) -> Context {
        let config = TextConfig {
            auto_shrink: true,
            min_scale,
            ..TextConfig::default()
        };
        Context::with_config(Arc::new(FixedBackend::with_default_fonts()), config)
            .with_render_size(size)
    }

    #[test]
    fn fitting_text_keeps_full_scale() {
        let mut ctx = context(0.5, Size::new(200.0, 20.0));
        ctx.parse_and_layout("あいう");
        assert_eq!(ctx.adjust_font_scale, 1.0);
        assert!(!ctx.is_truncated());
    }

    #[test]
    fn shrinks_into_the_box() {
        // Ten full-width characters at 17px need 170px; the box is 100px.
        let mut ctx = context(0.3, Size::new(100.0, 20.0));
        ctx.parse_and_layout("あいうえおかきくけこ");
        let scale = ctx.adjust_font_scale;
        assert!(scale > 0.3 && scale < 100.0 / 170.0 + 1e-4, "scale {scale}");
        assert!(!ctx.is_truncated());
        assert!(ctx.rendered_size().width <= 100.0 + 1e-3);
    }

    #[test]
    fn gives_up_at_minimum_scale() {
        let mut ctx = context(0.9, Size::new(50.0, 20.0));
        ctx.parse_and_layout("あいうえおかきくけこ");
        assert_eq!(ctx.adjust_font_scale, 0.9);
        assert!(ctx.is_truncated());
    }

    #[test]
    fn zero_minimum_disables_search() {
        let mut ctx = context(0.0, Size::new(50.0, 20.0));
        ctx.parse_and_layout("あいうえおかきくけこ");
        assert_eq!(ctx.adjust_font_scale, 1.0);
        assert!(ctx.is_truncated());
    }

    #[test]
    fn size_that_fits_leaves_runs_alone() {
        let mut ctx = context(0.0, Size::new(50.0, 20.0));
        ctx.config.auto_shrink = false;
        ctx.parse_and_layout("あい");
        let before = ctx.runs().to_vec();
        let size = ctx.size_that_fits("あいうえ", Size::new(1000.0, 1000.0));
        assert_eq!(size, Size::new(68.0, 17.0));
        assert_eq!(ctx.runs(), &before[..]);
    }
}
