pub mod backend;
pub mod face;
pub mod fixed;
pub mod manager;
pub mod metrics;
pub mod system;

pub use backend::{FontHandle, GlyphId, ShapingBackend};
pub use face::FontFace;
pub use fixed::{FixedBackend, FixedFont, fixed_glyph};
pub use manager::{FontId, FontManager};
pub use metrics::{FontMetrics, ScaledFontMetrics};
pub use system::SystemFontBackend;

use thiserror::Error;

/// Errors that can occur while working with fonts.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid font data")]
    InvalidFont,

    #[error("no font named {0:?}")]
    UnknownFont(String),
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, FontError>;
