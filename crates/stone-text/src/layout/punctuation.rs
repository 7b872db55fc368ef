//! Width of punctuation cells.

use crate::config::PunctuationMode;
use crate::unicode::Punctuation;

/// How much of a run's advance its cell takes, and where the glyph sits.
///
/// Both values are fractions of the advance along the line: the glyph
/// origin is placed `offset` past the cell start and the cell is `width`
/// long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compression {
    pub offset: f32,
    pub width: f32,
}

impl Compression {
    pub const FULL: Self = Self {
        offset: 0.0,
        width: 1.0,
    };

    /// Half cell with the glyph origin at the cell start.
    pub const HALF: Self = Self {
        offset: 0.0,
        width: 0.5,
    };

    /// Fixed compression of a class, ignoring its neighbours.
    pub fn of_class(class: Punctuation) -> Self {
        match class {
            Punctuation::Whole => Self::FULL,
            Punctuation::FirstHalf => Self::HALF,
            Punctuation::SecondHalf => Self {
                offset: -0.5,
                width: 0.5,
            },
            Punctuation::Quarter => Self {
                offset: -0.25,
                width: 0.5,
            },
        }
    }
}

/// Cell of a run in horizontal text, given the classes of its neighbours.
///
/// In `Stone` mode only consecutive closing marks are compressed: a closing
/// mark followed by another closing mark, or preceded by one, takes half a
/// cell. A closing mark before an opening bracket or a middle dot, two
/// opening brackets in a row, and a middle dot before an opening bracket
/// keep their full cell. A run with no successor keeps whatever its
/// predecessor decided.
pub fn horizontal(
    mode: PunctuationMode,
    prev: Option<Punctuation>,
    current: Punctuation,
    next: Option<Punctuation>,
) -> Compression {
    use Punctuation::*;

    match mode {
        PunctuationMode::Whole => Compression::FULL,
        PunctuationMode::Half => Compression::of_class(current),
        PunctuationMode::Stone => {
            let after_prev = match (prev, current) {
                (Some(FirstHalf), FirstHalf) => Compression::HALF,
                _ => Compression::FULL,
            };
            match (current, next) {
                (FirstHalf, Some(FirstHalf)) => Compression::HALF,
                (FirstHalf, Some(SecondHalf))
                | (SecondHalf, Some(SecondHalf))
                | (FirstHalf, Some(Quarter))
                | (Quarter, Some(SecondHalf)) => Compression::FULL,
                _ => after_prev,
            }
        }
    }
}

/// Cell of an upright run in vertical text. `Half` and `Stone` both
/// compress by class.
pub fn vertical(mode: PunctuationMode, current: Punctuation) -> Compression {
    match mode {
        PunctuationMode::Whole => Compression::FULL,
        PunctuationMode::Half | PunctuationMode::Stone => Compression::of_class(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Punctuation::*;

    #[test]
    fn whole_mode_never_compresses() {
        for class in [Whole, FirstHalf, SecondHalf, Quarter] {
            assert_eq!(
                horizontal(PunctuationMode::Whole, Some(FirstHalf), class, Some(FirstHalf)),
                Compression::FULL
            );
        }
    }

    #[test]
    fn half_mode_compresses_by_class() {
        let second = horizontal(PunctuationMode::Half, None, SecondHalf, None);
        assert_eq!(second.offset, -0.5);
        assert_eq!(second.width, 0.5);
        let quarter = horizontal(PunctuationMode::Half, None, Quarter, None);
        assert_eq!(quarter.offset, -0.25);
        assert_eq!(horizontal(PunctuationMode::Half, None, Whole, None), Compression::FULL);
    }

    #[test]
    fn stone_compresses_consecutive_closing_marks() {
        let stone = PunctuationMode::Stone;
        // 、。
        assert_eq!(horizontal(stone, None, FirstHalf, Some(FirstHalf)), Compression::HALF);
        assert_eq!(horizontal(stone, Some(FirstHalf), FirstHalf, None), Compression::HALF);
        // 。
        assert_eq!(horizontal(stone, None, FirstHalf, None), Compression::FULL);
        // あ。い
        assert_eq!(horizontal(stone, Some(Whole), FirstHalf, Some(Whole)), Compression::FULL);
    }

    #[test]
    fn stone_keeps_full_cells_between_opposite_marks() {
        let stone = PunctuationMode::Stone;
        // 。「 keeps both cells even after another closing mark.
        assert_eq!(
            horizontal(stone, Some(FirstHalf), FirstHalf, Some(SecondHalf)),
            Compression::FULL
        );
        assert_eq!(horizontal(stone, None, SecondHalf, Some(SecondHalf)), Compression::FULL);
        assert_eq!(horizontal(stone, None, FirstHalf, Some(Quarter)), Compression::FULL);
        assert_eq!(horizontal(stone, None, Quarter, Some(SecondHalf)), Compression::FULL);
    }

    #[test]
    fn vertical_uses_class() {
        assert_eq!(vertical(PunctuationMode::Whole, FirstHalf), Compression::FULL);
        assert_eq!(vertical(PunctuationMode::Stone, FirstHalf), Compression::HALF);
        assert_eq!(vertical(PunctuationMode::Half, Whole), Compression::FULL);
    }
}
