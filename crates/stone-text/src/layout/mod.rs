//! Line breaking, placement, alignment and truncation.
//!
//! [`Context::layout`] walks the runs of the last parse once, then aligns
//! the block and marks truncated runs. Geometry queries and the auto-shrink
//! search live alongside.

mod align;
mod engine;
pub mod fit;
pub mod kinsoku;
pub mod punctuation;

pub use hit_test::CURSOR_WIDTH;
pub use punctuation::Compression;

use crate::context::Context;

impl Context {
    /// Place the runs of the last parse inside the render box.
    pub fn layout(&mut self) {
        engine::LayoutPass::new(self).run();
    }
}
