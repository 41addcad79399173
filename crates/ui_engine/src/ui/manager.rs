//! Frame driver
//!
//! [`UiManager`] owns everything one UI instance needs and runs the frame:
//!
//! 1. `update(dt)`: poll the pointer into canvas space, update the scene and
//!    the menu stack, then apply the commands they queued
//! 2. `draw(batch)`: scene, menu stack, then the overlay flush
//!
//! The host feeds it surface size, pointer state and time, and reads back
//! surface requests, cursor changes and the exit flag.

use std::collections::VecDeque;

use super::backend::DrawBatch;
use super::context::{Commands, CursorShape, DisplayChange, DrawCx, UiCommand, UpdateCx};
use super::input::{InputProcessor, PointerFrame};
use super::menu::{Menu, MenuStack};
use super::rendering::PixelCanvas;
use super::tree::OverlayQueue;
use crate::config::{RenderConfig, UiConfig};
use crate::foundation::color::Color;
use crate::foundation::math::Rect;
use crate::output::{
    self, DisplayInfo, DisplayModeController, OutputSurface, PointerCorrection, SurfaceRequest,
    VirtualCanvas,
};
use crate::scene::SceneCollector;
use crate::text::{FontLibrary, FontdueRenderer, GlyphCache, GlyphRenderer};

/// One UI instance bound to one output surface
pub struct UiManager {
    canvas: VirtualCanvas,
    surface: OutputSurface,
    display: DisplayInfo,
    display_size: (u32, u32),
    correction: PointerCorrection,
    display_mode: DisplayModeController,

    menus: MenuStack,
    scene: SceneCollector,
    glyphs: GlyphCache,
    overlays: OverlayQueue,
    render: RenderConfig,

    input: InputProcessor,
    pointer: PointerFrame,
    commands: Commands,

    surface_requests: VecDeque<SurfaceRequest>,
    cursor: CursorShape,
    cursor_change: Option<CursorShape>,
    exit_requested: bool,
}

impl UiManager {
    /// Create a manager rasterizing text with fonts from `config.fonts`
    pub fn new(config: &UiConfig, surface: OutputSurface, display: DisplayInfo) -> Self {
        let renderer = FontdueRenderer::new(FontLibrary::new(&config.fonts));
        Self::with_renderer(config.canvas.canvas(), surface, display, renderer)
    }

    /// Create a manager with a custom text renderer
    pub fn with_renderer(
        canvas: VirtualCanvas,
        surface: OutputSurface,
        display: DisplayInfo,
        renderer: impl GlyphRenderer + 'static,
    ) -> Self {
        log::info!(
            "[UiManager] Canvas {}x{} on {}x{} surface{}",
            canvas.width,
            canvas.height,
            surface.width,
            surface.height,
            if surface.fullscreen { " (fullscreen)" } else { "" }
        );
        let mut display_mode = DisplayModeController::new((surface.width, surface.height));
        if surface.fullscreen {
            display_mode.set_fullscreen(surface.width, surface.height);
        }
        Self {
            canvas,
            surface,
            display,
            display_size: (surface.width, surface.height),
            correction: PointerCorrection::for_display(display, surface.fullscreen),
            display_mode,
            menus: MenuStack::new(),
            scene: SceneCollector::new(),
            glyphs: GlyphCache::new(renderer),
            overlays: OverlayQueue::new(),
            render: RenderConfig::default(),
            input: InputProcessor::new(),
            pointer: PointerFrame::default(),
            commands: Commands::new(),
            surface_requests: VecDeque::new(),
            cursor: CursorShape::Arrow,
            cursor_change: None,
            exit_requested: false,
        }
    }

    /// Virtual canvas
    pub const fn canvas(&self) -> VirtualCanvas {
        self.canvas
    }

    /// Current output surface
    pub const fn surface(&self) -> OutputSurface {
        self.surface
    }

    /// The host resized or switched the surface
    pub fn set_surface(&mut self, surface: OutputSurface) {
        if surface != self.surface {
            log::debug!(
                "[UiManager] Surface {}x{} -> {}x{}",
                self.surface.width,
                self.surface.height,
                surface.width,
                surface.height
            );
        }
        self.surface = surface;
        self.correction = PointerCorrection::for_display(self.display, surface.fullscreen);
    }

    /// Size used when switching to fullscreen
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display_size = (width, height);
    }

    /// Where the canvas lands on the current surface
    pub fn destination_rect(&self) -> Rect {
        output::destination_rect(self.canvas, self.surface)
    }

    /// Pointer correction in effect
    pub const fn pointer_correction(&self) -> PointerCorrection {
        self.correction
    }

    /// Raw pointer input
    pub fn input_mut(&mut self) -> &mut InputProcessor {
        &mut self.input
    }

    /// Pointer frame of the last update
    pub const fn pointer(&self) -> &PointerFrame {
        &self.pointer
    }

    /// Menu stack
    pub fn menus(&self) -> &MenuStack {
        &self.menus
    }

    /// Menu stack, mutably
    pub fn menus_mut(&mut self) -> &mut MenuStack {
        &mut self.menus
    }

    /// Push a menu immediately
    pub fn push_menu(&mut self, menu: Menu) {
        self.menus.push(menu);
    }

    /// Scene content below the menus
    pub fn scene_mut(&mut self) -> &mut SceneCollector {
        &mut self.scene
    }

    /// Text cache
    pub const fn glyphs(&self) -> &GlyphCache {
        &self.glyphs
    }

    /// Overlay channel
    pub const fn overlays(&self) -> &OverlayQueue {
        &self.overlays
    }

    /// Rendering parameters
    pub const fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Rendering parameters, mutably; text-affecting changes invalidate the cache
    pub fn render_config_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Windowed/fullscreen state
    pub const fn display_mode(&self) -> &DisplayModeController {
        &self.display_mode
    }

    /// Next surface change the host should perform
    pub fn take_surface_request(&mut self) -> Option<SurfaceRequest> {
        self.surface_requests.pop_front()
    }

    /// Cursor shape change since the last call
    pub fn take_cursor_change(&mut self) -> Option<CursorShape> {
        self.cursor_change.take()
    }

    /// Cursor shape currently requested
    pub const fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Whether the UI asked the host to quit
    pub const fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Run the update pass
    pub fn update(&mut self, dt: f32) {
        self.pointer = self.input.poll(self.canvas, self.surface, self.correction);
        let pointer = self.pointer;

        let mut cx = UpdateCx {
            pointer: &pointer,
            canvas: self.canvas,
            commands: &mut self.commands,
            dt,
        };
        self.scene.update(&mut cx);
        self.menus.update(&mut cx);

        self.apply_commands();

        let cursor = self.commands.take_cursor().unwrap_or(CursorShape::Arrow);
        if cursor != self.cursor {
            self.cursor = cursor;
            self.cursor_change = Some(cursor);
        }
    }

    fn apply_commands(&mut self) {
        for command in self.commands.drain() {
            log::trace!("[UiManager] Applying {command:?}");
            match command {
                UiCommand::PushMenu(menu) => self.menus.push(menu),
                UiCommand::PopMenu => {
                    self.menus.pop();
                }
                UiCommand::ReplaceMenu(menu) => {
                    self.menus.replace(menu);
                }
                UiCommand::ClearMenus => self.menus.clear(),
                UiCommand::Configure(change) => {
                    let before = self.render.version();
                    change(&mut self.render);
                    if self.render.version() != before {
                        log::info!("[UiManager] Render config changed, text will be re-rasterized");
                    }
                }
                UiCommand::Display(change) => self.apply_display_change(change),
                UiCommand::RequestExit => {
                    log::info!("[UiManager] Exit requested");
                    self.exit_requested = true;
                }
            }
        }
    }

    fn apply_display_change(&mut self, change: DisplayChange) {
        let request = match change {
            DisplayChange::Resolution { width, height } => {
                self.display_mode.change_resolution(width, height)
            }
            DisplayChange::Fullscreen => {
                let (width, height) = self.display_size;
                Some(self.display_mode.set_fullscreen(width, height))
            }
            DisplayChange::Windowed => self.display_mode.set_windowed(),
        };
        if let Some(request) = request {
            log::info!(
                "[UiManager] Requesting {}x{}{}",
                request.width,
                request.height,
                if request.fullscreen { " fullscreen" } else { "" }
            );
            self.surface_requests.push_back(request);
        }
    }

    /// Run the draw pass into `batch`
    pub fn draw(&mut self, batch: &mut dyn DrawBatch) {
        let (width, height) = (self.canvas.width, self.canvas.height);
        batch.begin(self.render.sampler());

        let mut cx = DrawCx {
            batch,
            glyphs: &self.glyphs,
            overlays: &self.overlays,
            canvas: self.canvas,
            render: &self.render,
        };
        self.scene.draw(&mut cx, width, height);
        self.menus.draw(&mut cx, width, height);
        let overlays = self.overlays.flush(&mut cx);
        if overlays > 0 {
            log::trace!("[UiManager] Flushed {overlays} overlays");
        }

        cx.batch.end();
    }

    /// Draw a frame onto a fresh canvas-sized pixel buffer
    pub fn render_frame(&mut self) -> PixelCanvas {
        let mut target = PixelCanvas::new(self.canvas.width, self.canvas.height);
        target.clear(Color::BLACK);
        self.draw(&mut target);
        target
    }

    /// Draw a frame and scale it onto a surface-sized buffer with bars
    pub fn present_frame(&mut self) -> PixelCanvas {
        let frame = self.render_frame();
        frame.present(self.surface.width, self.surface.height, self.render.sampler())
    }
}

impl std::fmt::Debug for UiManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiManager")
            .field("canvas", &self.canvas)
            .field("surface", &self.surface)
            .field("menus", &self.menus.len())
            .field("glyphs", &self.glyphs.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
