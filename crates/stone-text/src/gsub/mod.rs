//! Vertical glyph substitution from a font's raw GSUB table.
//!
//! Only the lookups vertical Japanese text needs are walked: the `kana`
//! script's default language system, features `vrt2`, `vert` and `vkna`,
//! and lookup types 1 (single), 3 (alternate) and 7 (extension).

pub mod cache;
pub mod reader;
pub mod table;

pub use cache::VerticalSubstitutions;
pub use reader::TableReader;
pub use table::{GsubTable, VERTICAL_FEATURES};

use thiserror::Error;

/// Reasons a GSUB walk gives up on a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GsubError {
    #[error("read of {len} bytes at offset {offset} is outside a {size}-byte table")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("no script record tagged {0:?}")]
    MissingScript(String),

    #[error("script has no default language system")]
    NoDefaultLangSys,

    #[error("index {index} is out of range for {count} entries")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("unsupported {what} format {format}")]
    UnsupportedFormat { what: &'static str, format: u16 },

    #[error("extension subtable refers to another extension")]
    NestedExtension,
}

pub type Result<T> = std::result::Result<T, GsubError>;

pub(crate) fn tag_name(tag: [u8; 4]) -> String {
    String::from_utf8_lossy(&tag).into_owned()
}
