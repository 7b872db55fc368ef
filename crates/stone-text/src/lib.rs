//! stone-text: Japanese-aware text layout engine.
//!
//! - Script classification and per-script font fallback.
//! - Per-cluster shaping through a pluggable [`ShapingBackend`], with
//!   vertical glyph forms read from the font's GSUB table.
//! - Horizontal and vertical (top-to-bottom, right-to-left) line layout
//!   with kinsoku, punctuation compression and tate-chu-yoko.
//! - Alignment, truncation and an auto-shrink search.

pub mod config;
pub mod context;
pub mod font;
pub mod geometry;
pub mod gsub;
pub mod layout;
pub mod shaping;
pub mod unicode;

pub use config::{Direction, DirectionAlign, PunctuationMode, TextAlign, TextConfig};
pub use context::Context;
pub use font::{
    FixedBackend, FixedFont, FontError, FontHandle, FontId, FontManager, GlyphId, ShapingBackend,
    SystemFontBackend,
};
pub use geometry::{Point, Rect, Size};
pub use gsub::VerticalSubstitutions;
pub use shaping::{Run, Token, Visibility};
pub use unicode::{Punctuation, Script};
