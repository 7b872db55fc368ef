//! Unicode utilities for stone-text.
//!
//! Script classification for font fallback, punctuation and kinsoku
//! character classes, and the word/grapheme segmentation the parser
//! builds tokens from.

pub mod punctuation;
pub mod script;
pub mod segment;

pub use punctuation::{Punctuation, is_newline, is_not_ending, is_not_starting};
pub use script::{Script, UnicodeBlock};
pub use segment::{Segmentation, boundary_spans, clusters_in, token_spans};
