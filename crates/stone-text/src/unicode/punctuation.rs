//! Character classes used by punctuation compression and kinsoku.

use serde::{Deserialize, Serialize};

const FIRST_HALF: &str = "、。）］｝〕〉》」』】〙〗〟｠";
const SECOND_HALF: &str = "（［｛〔〈《「『【〘〖〝｟";
const QUARTER: &str = "・：；";

/// Characters that must not begin a line.
const NOT_STARTING: &str = " ,.?:;!)）]］｝、〕〉》」』】〙〗〟’”｠»\
ヽヾァィゥェォッャュョヮヵヶぁぃぅぇぉっゃゅょゎゕゖ\
ㇰㇱㇲㇳㇴㇵㇶㇷㇸㇹㇺㇻㇼㇽㇾㇿ々〻？!‼⁇⁈⁉。.™";

/// Characters that must not end a line.
const NOT_ENDING: &str = "(（[［｛〔〈《「『【〘〖〝‘“｟«\"'";

/// Width class of a full-width punctuation glyph.
///
/// CJK punctuation is drawn in one half of an em box; the class records
/// which half carries ink so the other half can be compressed away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Punctuation {
    #[default]
    Whole,
    /// Closing marks: ink sits in the first half of the cell.
    FirstHalf,
    /// Opening brackets: ink sits in the second half of the cell.
    SecondHalf,
    /// Middle dots and colons: ink sits in the centre quarter.
    Quarter,
}

impl Punctuation {
    pub fn of(ch: char) -> Self {
        if FIRST_HALF.contains(ch) {
            Punctuation::FirstHalf
        } else if SECOND_HALF.contains(ch) {
            Punctuation::SecondHalf
        } else if QUARTER.contains(ch) {
            Punctuation::Quarter
        } else {
            Punctuation::Whole
        }
    }
}

/// Returns `true` if `ch` is forbidden at the start of a line.
pub fn is_not_starting(ch: char) -> bool {
    NOT_STARTING.contains(ch)
}

/// Returns `true` if `ch` is forbidden at the end of a line.
pub fn is_not_ending(ch: char) -> bool {
    NOT_ENDING.contains(ch)
}

/// Line terminators, matching the first scalar of a grapheme cluster
/// (so `"\r\n"` is covered by `'\r'`).
pub fn is_newline(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
