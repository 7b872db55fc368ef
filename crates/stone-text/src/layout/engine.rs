use crate::config::Direction;
use crate::context::Context;
use crate::geometry::{Point, Rect};
use crate::layout::{align, kinsoku, punctuation};

/// Single pass over the runs of a context, placing each one and breaking
/// lines as the cursor reaches the render box edge.
///
/// Horizontal text advances along x and stacks lines downwards; vertical
/// text advances along y and stacks lines leftwards from x = 0. The block
/// is moved into the render box afterwards by the alignment pass.
pub(crate) struct LayoutPass<'a> {
    ctx: &'a mut Context,
    run: usize,
    line_start: usize,
    cursor: Point,
    /// Cross position saved while a tate-chu-yoko token is set sideways.
    held: Option<f32>,
}

impl<'a> LayoutPass<'a> {
    pub(crate) fn new(ctx: &'a mut Context) -> Self {
        Self {
            ctx,
            run: 0,
            line_start: 0,
            cursor: Point::zero(),
            held: None,
        }
    }

    pub(crate) fn run(mut self) {
        self.ctx.line_count = 0;
        while self.run < self.ctx.runs.len() {
            self.place();
            if self.ctx.runs[self.run].is_newline() {
                self.next_line();
            } else {
                self.advance();
            }
            self.run += 1;
        }
        // A final terminator already closed its line.
        if !self.ctx.runs.last().is_some_and(|run| run.is_newline()) {
            self.ctx.line_count += 1;
        }

        align::finish(self.ctx);
    }

    fn place(&mut self) {
        let (position, frame) = match self.ctx.config.direction {
            Direction::Horizontal => self.place_horizontal(),
            Direction::Vertical => self.place_vertical(),
        };
        let line = self.ctx.line_count;
        let run = &mut self.ctx.runs[self.run];
        run.position = position;
        run.frame = frame;
        run.line = line;
    }

    fn place_horizontal(&self) -> (Point, Rect) {
        let ctx = &*self.ctx;
        let index = self.run;
        let run = &ctx.runs[index];
        let size = ctx.adjust_font_size();
        let ascent = ctx.fonts.ascent(ctx.backend(), run.font_id, size);
        let Point { x, y } = self.cursor;

        if run.is_newline() {
            return (
                Point::new(x, y),
                Rect::new(x, y - ascent, 0.0, ctx.config.font_size),
            );
        }

        let prev = index.checked_sub(1).map(|i| ctx.runs[i].punctuation);
        let next = ctx.runs.get(index + 1).map(|next| next.punctuation);
        let compression =
            punctuation::horizontal(ctx.config.punctuation, prev, run.punctuation, next);
        let advance = run.advance.width;
        (
            Point::new(x + advance * compression.offset, y),
            Rect::new(
                x,
                y - ascent,
                advance * compression.width,
                size * ctx.fonts.font_scale_for(run.font_id),
            ),
        )
    }

    fn place_vertical(&self) -> (Point, Rect) {
        let ctx = &*self.ctx;
        let index = self.run;
        let run = &ctx.runs[index];
        let size = ctx.adjust_font_size();
        let descent = ctx.fonts.descent(ctx.backend(), run.font_id, size);
        let Point { x, y } = self.cursor;

        if run.is_newline() {
            return (
                Point::new(x, y + size - descent),
                Rect::new(x, y, ctx.config.font_size, 0.0),
            );
        }

        if ctx.is_clockwise(index) {
            return (
                Point::new(x + descent, y),
                Rect::new(x, y, size, run.advance.width),
            );
        }

        let compression = punctuation::vertical(ctx.config.punctuation, run.punctuation);
        let baseline = if ctx.fonts.needs_flip(run.font_id) {
            y + size - descent * 0.5
        } else {
            y + size - descent + size * compression.offset
        };
        (
            Point::new(x, baseline),
            Rect::new(x, y, run.advance.width, size * compression.width),
        )
    }

    /// Move the cursor past the current run and break the line if the next
    /// token (or, inside a token, the next run) would not fit.
    fn advance(&mut self) {
        let index = self.run;
        let axis = self.ctx.config.direction.primary();

        if self.ctx.is_tate_chu_yoko(index) {
            if !self.ctx.is_last_in_token(index) {
                self.held.get_or_insert(self.cursor.x);
                self.cursor.x += self.ctx.runs[index].frame.width();
                return;
            }
            if let Some(x) = self.held.take() {
                self.cursor.x = x;
            }
        }

        let extent = self.ctx.runs[index].frame.extent(axis);
        self.cursor.shift_along(axis, extent);

        let Some(next) = self.ctx.runs.get(index + 1) else {
            return;
        };
        let needed = if next.token_id != self.ctx.runs[index].token_id {
            self.ctx.advance(next.token_id)
        } else {
            match self.ctx.config.direction {
                Direction::Horizontal => next.advance.width,
                Direction::Vertical => self.ctx.adjust_font_size(),
            }
        };
        if self.cursor.along(axis) + needed > self.ctx.render_size.along(axis) {
            self.next_line();
        }
    }

    fn next_line(&mut self) {
        if self.ctx.config.kinsoku && !self.ctx.runs[self.run].is_newline() {
            self.run = kinsoku::adjust_break(
                &self.ctx.runs,
                &self.ctx.tokens,
                self.line_start,
                self.run,
            );
        }

        let pitch = self.ctx.adjust_line_height();
        self.cursor = match self.ctx.config.direction {
            Direction::Horizontal => Point::new(0.0, self.cursor.y + pitch),
            Direction::Vertical => Point::new(self.cursor.x - pitch, 0.0),
        };
        self.held = None;
        self.ctx.line_count += 1;
        self.line_start = self.run + 1;
    }
}
