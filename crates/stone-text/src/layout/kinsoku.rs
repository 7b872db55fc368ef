//! Line-start and line-end prohibition (kinsoku shori).

use crate::shaping::{Run, Token};
use crate::unicode::{is_not_ending, is_not_starting};

/// Move a line break earlier until it respects the prohibition rules.
///
/// `last` is the index of the run that would end the line and `line_start`
/// the first run of that line. While the line would end on a character
/// that must not end a line, or the next line would begin with one that
/// must not start a line, the break moves to the end of the token before
/// the one holding `last`. It never moves before `line_start`. Returns the
/// index of the run that ends the line.
pub fn adjust_break(runs: &[Run], tokens: &[Token], line_start: usize, last: usize) -> usize {
    let mut last = last;
    while last > line_start {
        let Some(end) = runs.get(last) else {
            break;
        };
        let forbidden_end = is_not_ending(end.ch);
        let forbidden_start = runs.get(last + 1).is_some_and(|next| is_not_starting(next.ch));
        if !forbidden_end && !forbidden_start {
            break;
        }

        let token_start = tokens
            .get(end.token_id)
            .map_or(last, |token| token.runs.start);
        last = token_start.saturating_sub(1).max(line_start);
    }
    last
}
