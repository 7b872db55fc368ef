//! Layout settings read by the parser, layout and font manager.

use serde::{Deserialize, Serialize};

use crate::geometry::Axis;

/// Alignment of runs along the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Leading,
    Center,
    Trailing,
    Justify,
}

/// Placement of the block of lines across the line direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionAlign {
    #[default]
    Start,
    Middle,
    End,
}

/// Writing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right, lines stacked top to bottom.
    #[default]
    Horizontal,
    /// Top to bottom, lines stacked right to left.
    Vertical,
}

impl Direction {
    /// Axis runs advance along.
    pub fn primary(self) -> Axis {
        match self {
            Direction::Horizontal => Axis::X,
            Direction::Vertical => Axis::Y,
        }
    }

    /// Axis lines stack along.
    pub fn cross(self) -> Axis {
        self.primary().cross()
    }
}

/// Punctuation compression mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctuationMode {
    /// Every punctuation mark keeps its full cell.
    Whole,
    /// Every classified mark is compressed to half a cell.
    Half,
    /// Compression depends on the neighbouring marks.
    #[default]
    Stone,
}

/// Text styling and layout switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font size in pixels.
    pub font_size: f32,
    /// Line pitch as a multiple of the font size.
    pub line_height_scale: f32,
    pub text_align: TextAlign,
    pub direction_align: DirectionAlign,
    pub direction: Direction,
    /// Allow short digit/letter tokens to be set horizontally in vertical text.
    pub tate_chu_yoko: bool,
    pub punctuation: PunctuationMode,
    /// Apply line-start/line-end prohibition rules.
    pub kinsoku: bool,
    /// Tokenise by words rather than grapheme clusters.
    pub divide_by_words: bool,
    /// Shrink the font until the text fits the render box.
    pub auto_shrink: bool,
    /// Smallest scale the shrink search may settle on; 0 disables the search.
    pub min_scale: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: 17.0,
            line_height_scale: 1.0,
            text_align: TextAlign::Leading,
            direction_align: DirectionAlign::Start,
            direction: Direction::Horizontal,
            tate_chu_yoko: true,
            punctuation: PunctuationMode::Stone,
            kinsoku: true,
            divide_by_words: true,
            auto_shrink: false,
            min_scale: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: TextConfig =
            toml::from_str("direction = \"vertical\"\npunctuation = \"half\"\n").unwrap();
        assert_eq!(config.direction, Direction::Vertical);
        assert_eq!(config.punctuation, PunctuationMode::Half);
        assert_eq!(config.font_size, 17.0);
        assert!(config.kinsoku);
    }

    #[test]
    fn direction_axes() {
        assert_eq!(Direction::Horizontal.primary(), Axis::X);
        assert_eq!(Direction::Vertical.primary(), Axis::Y);
        assert_eq!(Direction::Vertical.cross(), Axis::X);
    }
}
