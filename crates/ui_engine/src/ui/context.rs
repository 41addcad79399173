//! Per-pass contexts handed to widgets, menus and overlay callbacks
//!
//! Widgets never mutate the menu stack or render configuration directly.
//! They queue a [`UiCommand`]; the frame driver applies the queue after the
//! update pass, so a button that pushes a menu does not invalidate the stack
//! it is being updated from.

use std::sync::Arc;

use super::backend::DrawBatch;
use super::input::PointerFrame;
use super::menu::Menu;
use super::tree::OverlayQueue;
use crate::config::RenderConfig;
use crate::foundation::color::Color;
use crate::foundation::math::{Point2, Rect, Vec2};
use crate::output::VirtualCanvas;
use crate::text::{GlyphBlock, GlyphCache};

/// Mouse cursor requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    /// Default pointer
    Arrow,
    /// Pointing hand over interactive elements
    Hand,
}

/// Display mode change requested by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayChange {
    /// Resize the window (ignored while fullscreen)
    Resolution {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Switch to fullscreen at the display size
    Fullscreen,
    /// Return to the last windowed size
    Windowed,
}

/// Deferred request applied by the frame driver after the update pass
pub enum UiCommand {
    /// Push a menu onto the stack
    PushMenu(Menu),
    /// Pop the top menu
    PopMenu,
    /// Pop the top menu and push a new one
    ReplaceMenu(Menu),
    /// Pop every menu
    ClearMenus,
    /// Change runtime rendering parameters
    Configure(Box<dyn FnOnce(&mut RenderConfig)>),
    /// Change the display mode
    Display(DisplayChange),
    /// Ask the host to shut down
    RequestExit,
}

impl std::fmt::Debug for UiCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PushMenu(menu) => f.debug_tuple("PushMenu").field(&menu.id()).finish(),
            Self::PopMenu => f.write_str("PopMenu"),
            Self::ReplaceMenu(menu) => f.debug_tuple("ReplaceMenu").field(&menu.id()).finish(),
            Self::ClearMenus => f.write_str("ClearMenus"),
            Self::Configure(_) => f.write_str("Configure(..)"),
            Self::Display(change) => f.debug_tuple("Display").field(change).finish(),
            Self::RequestExit => f.write_str("RequestExit"),
        }
    }
}

/// Outbox for commands and cursor changes produced during an update pass
#[derive(Debug, Default)]
pub struct Commands {
    queue: Vec<UiCommand>,
    cursor: Option<CursorShape>,
}

impl Commands {
    /// Empty outbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary command
    pub fn push(&mut self, command: UiCommand) {
        self.queue.push(command);
    }

    /// Queue a menu push
    pub fn push_menu(&mut self, menu: Menu) {
        self.push(UiCommand::PushMenu(menu));
    }

    /// Queue a menu pop
    pub fn pop_menu(&mut self) {
        self.push(UiCommand::PopMenu);
    }

    /// Queue a menu replacement
    pub fn replace_menu(&mut self, menu: Menu) {
        self.push(UiCommand::ReplaceMenu(menu));
    }

    /// Queue clearing the menu stack
    pub fn clear_menus(&mut self) {
        self.push(UiCommand::ClearMenus);
    }

    /// Queue a render configuration change
    pub fn configure(&mut self, change: impl FnOnce(&mut RenderConfig) + 'static) {
        self.push(UiCommand::Configure(Box::new(change)));
    }

    /// Queue a display mode change
    pub fn display(&mut self, change: DisplayChange) {
        self.push(UiCommand::Display(change));
    }

    /// Queue an exit request
    pub fn request_exit(&mut self) {
        self.push(UiCommand::RequestExit);
    }

    /// Request a cursor shape for this frame; the last request wins.
    ///
    /// A frame with no request shows [`CursorShape::Arrow`].
    pub fn set_cursor(&mut self, shape: CursorShape) {
        self.cursor = Some(shape);
    }

    /// Queued commands without draining them
    pub fn pending(&self) -> &[UiCommand] {
        &self.queue
    }

    /// Take every queued command
    pub fn drain(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.queue)
    }

    /// Take the pending cursor request
    pub fn take_cursor(&mut self) -> Option<CursorShape> {
        self.cursor.take()
    }
}

/// Context for the update pass
pub struct UpdateCx<'a> {
    /// Pointer state mapped into canvas space
    pub pointer: &'a PointerFrame,
    /// Virtual canvas layout is resolved against
    pub canvas: VirtualCanvas,
    /// Outbox for deferred requests
    pub commands: &'a mut Commands,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// Context for the draw pass and overlay callbacks
pub struct DrawCx<'a> {
    /// Destination for draw calls
    pub batch: &'a mut dyn DrawBatch,
    /// Shared text cache
    pub glyphs: &'a GlyphCache,
    /// Deferred overlay channel
    pub overlays: &'a OverlayQueue,
    /// Virtual canvas being drawn
    pub canvas: VirtualCanvas,
    /// Current rendering parameters
    pub render: &'a RenderConfig,
}

impl DrawCx<'_> {
    /// Fill `rect`, skipping fully transparent colors
    pub fn fill(&mut self, rect: Rect, color: Color) {
        if color.a > 0 && !rect.is_empty() {
            self.batch.fill_rect(rect, color);
        }
    }

    /// Pixel size text is rasterized at for a semantic size, including oversampling
    pub fn text_pixel_size(&self, semantic_size: f32) -> f32 {
        self.canvas.pixel_size(semantic_size) * self.render.text_scale()
    }

    /// Layout size of `text` in canvas pixels
    pub fn measure_text(&self, text: &str, font: &str, semantic_size: f32) -> Vec2 {
        let scale = self.render.text_scale();
        self.glyphs.measure(text, font, self.text_pixel_size(semantic_size)) / scale
    }

    /// Rasterize `text` in white through the cache
    pub fn text_block(&self, text: &str, font: &str, semantic_size: f32) -> Arc<GlyphBlock> {
        self.glyphs.get_or_render(
            text,
            font,
            self.text_pixel_size(semantic_size),
            Color::WHITE,
            self.render,
        )
    }

    /// Draw `text` with its top-left corner at `position`, tinted with `color`
    pub fn draw_text(&mut self, text: &str, font: &str, semantic_size: f32, color: Color, position: Point2) {
        if text.is_empty() || color.a == 0 {
            return;
        }
        let block = self.text_block(text, font, semantic_size);
        if block.is_empty() {
            return;
        }
        let scale = 1.0 / self.render.text_scale();
        self.batch.draw_block(&block, position, scale, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let mut commands = Commands::new();
        commands.pop_menu();
        commands.request_exit();
        commands.display(DisplayChange::Fullscreen);

        let drained = commands.drain();
        assert!(matches!(
            drained.as_slice(),
            [UiCommand::PopMenu, UiCommand::RequestExit, UiCommand::Display(DisplayChange::Fullscreen)]
        ));
        assert!(commands.pending().is_empty());
    }

    #[test]
    fn test_last_cursor_request_wins() {
        let mut commands = Commands::new();
        commands.set_cursor(CursorShape::Hand);
        commands.set_cursor(CursorShape::Arrow);
        assert_eq!(commands.take_cursor(), Some(CursorShape::Arrow));
        assert_eq!(commands.take_cursor(), None);
    }
}
