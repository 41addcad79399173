//! Drawing backend seam
//!
//! The UI layer emits rectangles and rasterized text blocks in virtual canvas
//! coordinates. A backend decides what to do with them: record them, composite
//! them on the CPU, or upload them to a GPU.

use std::sync::Arc;

use crate::config::SamplerMode;
use crate::foundation::color::Color;
use crate::foundation::math::{Point2, Rect};
use crate::text::GlyphBlock;

/// Sink for one frame of UI draw calls
pub trait DrawBatch {
    /// Start a frame; `sampler` is the filtering used for scaled blocks
    fn begin(&mut self, _sampler: SamplerMode) {}

    /// Fill a canvas rectangle with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a text block with its top-left corner at `position`.
    ///
    /// `scale` maps block pixels to canvas pixels; `tint` multiplies every
    /// block pixel.
    fn draw_block(&mut self, block: &Arc<GlyphBlock>, position: Point2, scale: f32, tint: Color);

    /// Finish the frame
    fn end(&mut self) {}
}
