//! Passes run once all lines are placed.

use core::ops::Range;

use crate::config::{Direction, DirectionAlign, TextAlign};
use crate::context::Context;
use crate::geometry::{Axis, Rect, Size};
use crate::shaping::Visibility;

pub(crate) fn finish(ctx: &mut Context) {
    shift_block(ctx);
    if ctx.config.direction == Direction::Vertical {
        center_tate_chu_yoko(ctx);
    }
    for line in 0..ctx.line_count {
        let range = ctx.run_indexes(line);
        if !range.is_empty() {
            align_line(ctx, range);
        }
    }
    update_rendered_size(ctx);
    update_visibility(ctx);
}

/// Move the block of lines into the render box across the line direction.
///
/// The first line sits at the top in horizontal text and at the right edge
/// in vertical text.
fn shift_block(ctx: &mut Context) {
    if ctx.runs.is_empty() {
        return;
    }
    let direction = ctx.config.direction;
    let cross = direction.cross();
    let view: &Context = ctx;
    let (low, high) = (0..view.runs.len())
        .map(|index| cross_span(view, index))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(low, high), (start, end)| {
            (low.min(start), high.max(end))
        });
    let extent = ctx.render_size.along(cross);

    let delta = match (ctx.config.direction_align, direction) {
        (DirectionAlign::Start, Direction::Horizontal)
        | (DirectionAlign::End, Direction::Vertical) => -low,
        (DirectionAlign::End, Direction::Horizontal)
        | (DirectionAlign::Start, Direction::Vertical) => extent - high,
        (DirectionAlign::Middle, _) => (extent - (high - low)) * 0.5 - low,
    };
    for run in &mut ctx.runs {
        run.shift(cross, delta);
    }
}

/// Extent of a run across the line direction. A sideways token covers the
/// whole cell that starts at its first run.
fn cross_span(ctx: &Context, index: usize) -> (f32, f32) {
    let run = &ctx.runs[index];
    let cross = ctx.config.direction.cross();
    if ctx.is_tate_chu_yoko(index) {
        let first = ctx
            .tokens
            .get(run.token_id)
            .map_or(index, |token| token.runs.start);
        let start = ctx.runs[first].frame.start(cross);
        return (start, start + ctx.adjust_font_size());
    }
    (run.frame.start(cross), run.frame.end(cross))
}

/// Center each sideways token within one vertical cell.
fn center_tate_chu_yoko(ctx: &mut Context) {
    let size = ctx.adjust_font_size();
    for token_id in 0..ctx.tokens.len() {
        let runs = ctx.tokens[token_id].runs.clone();
        if !ctx.is_tate_chu_yoko(runs.start) {
            continue;
        }
        let total = ctx.advance(token_id);
        let dx = (size - total) * 0.5;
        for run in &mut ctx.runs[runs] {
            run.shift(Axis::X, dx);
        }
    }
}

/// A sideways token takes one cell however many runs it has.
fn takes_cell(ctx: &Context, index: usize) -> bool {
    !ctx.is_tate_chu_yoko(index) || ctx.is_last_in_token(index)
}

fn align_line(ctx: &mut Context, range: Range<usize>) {
    let axis = ctx.config.direction.primary();
    let extent = ctx.render_size.along(axis);

    let mut total = 0.0;
    let mut token_count = 0;
    let mut prev_token = None;
    for index in range.clone() {
        let run = &ctx.runs[index];
        if takes_cell(ctx, index) {
            total += run.frame.extent(axis);
        }
        if prev_token != Some(run.token_id) {
            token_count += 1;
            prev_token = Some(run.token_id);
        }
    }
    let leftover = extent - total;

    match ctx.config.text_align {
        TextAlign::Leading => {}
        TextAlign::Center => {
            for run in &mut ctx.runs[range] {
                run.shift(axis, leftover * 0.5);
            }
        }
        TextAlign::Trailing => {
            for run in &mut ctx.runs[range] {
                run.shift(axis, leftover);
            }
        }
        TextAlign::Justify => {
            // The last line and lines ended by a terminator stay leading.
            if range.end >= ctx.runs.len()
                || ctx.runs[range.end - 1].is_newline()
                || token_count < 2
            {
                return;
            }
            let gap = leftover / (token_count - 1) as f32;
            let mut cursor = ctx.runs[range.start].frame.start(axis);
            let mut token = ctx.runs[range.start].token_id;
            for index in range {
                if ctx.runs[index].token_id != token {
                    token = ctx.runs[index].token_id;
                    cursor += gap;
                }
                let advances = takes_cell(ctx, index);
                let run = &mut ctx.runs[index];
                let delta = cursor - run.frame.start(axis);
                run.shift(axis, delta);
                if advances {
                    cursor += run.frame.extent(axis);
                }
            }
        }
    }
}

fn update_rendered_size(ctx: &mut Context) {
    let frames = ctx.runs.iter().map(|run| run.frame);
    ctx.rendered_size = match ctx.config.direction {
        Direction::Horizontal => frames.fold(Size::zero(), |size, frame| {
            Size::new(size.width.max(frame.max_x()), size.height.max(frame.max_y()))
        }),
        Direction::Vertical => bounding_size(frames),
    };
}

fn bounding_size(frames: impl Iterator<Item = Rect>) -> Size {
    let mut bounds: Option<(f32, f32, f32, f32)> = None;
    for frame in frames {
        bounds = Some(match bounds {
            None => (frame.min_x(), frame.min_y(), frame.max_x(), frame.max_y()),
            Some((min_x, min_y, max_x, max_y)) => (
                min_x.min(frame.min_x()),
                min_y.min(frame.min_y()),
                max_x.max(frame.max_x()),
                max_y.max(frame.max_y()),
            ),
        });
    }
    bounds.map_or(Size::zero(), |(min_x, min_y, max_x, max_y)| {
        Size::new(max_x - min_x, max_y - min_y)
    })
}

/// Runs up to the first one that leaves the render box stay visible; that
/// one and everything after it are hidden, and the last visible run becomes
/// the ellipsis.
fn update_visibility(ctx: &mut Context) {
    let bounds = Rect::from_size(ctx.render_size);
    let cut = ctx
        .runs
        .iter()
        .position(|run| !bounds.contains_rect(&run.frame));

    for (index, run) in ctx.runs.iter_mut().enumerate() {
        run.visibility = match cut {
            None => Visibility::Visible,
            Some(cut) if index >= cut => Visibility::Invisible,
            Some(cut) if index + 1 == cut => Visibility::Ellipsis,
            Some(_) => Visibility::Visible,
        };
    }
}
