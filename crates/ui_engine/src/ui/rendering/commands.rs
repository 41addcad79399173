//! Recording backend

use std::sync::Arc;

use crate::config::SamplerMode;
use crate::foundation::color::Color;
use crate::foundation::math::{Point2, Rect};
use crate::text::GlyphBlock;
use crate::ui::backend::DrawBatch;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame start
    Begin(SamplerMode),
    /// Solid rectangle
    FillRect {
        /// Canvas rectangle
        rect: Rect,
        /// Fill
        color: Color,
    },
    /// Text block
    Block {
        /// Shared pixels
        block: Arc<GlyphBlock>,
        /// Top-left corner in canvas pixels
        position: Point2,
        /// Block pixel to canvas pixel scale
        scale: f32,
        /// Multiplier
        tint: Color,
    },
    /// Frame end
    End,
}

/// [`DrawBatch`] that records calls instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded rectangle fills in order
    pub fn fills(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }

    /// Recorded text blocks in order
    pub fn blocks(&self) -> impl Iterator<Item = &Arc<GlyphBlock>> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Block { block, .. } => Some(block),
            _ => None,
        })
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawBatch for CommandList {
    fn begin(&mut self, sampler: SamplerMode) {
        self.commands.push(DrawCommand::Begin(sampler));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_block(&mut self, block: &Arc<GlyphBlock>, position: Point2, scale: f32, tint: Color) {
        self.commands.push(DrawCommand::Block {
            block: Arc::clone(block),
            position,
            scale,
            tint,
        });
    }

    fn end(&mut self) {
        self.commands.push(DrawCommand::End);
    }
}
