//! Rasterized text cache
//!
//! Blocks are keyed by a fingerprint of (text, font, pixel size, color) and
//! shared as `Arc<GlyphBlock>`. The cache remembers the
//! [`RenderConfig::version`] it was filled under and clears itself the first
//! time it sees a different one, so quality changes never serve stale pixels.
//! Rasterization failures are logged and answered with a 1x1 transparent
//! placeholder, which is cached like any other block until the next clear.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::TextResult;
use crate::config::RenderConfig;
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;

/// Estimated advance per character when measurement fails
const FALLBACK_CHAR_WIDTH: f32 = 10.0;

/// Immutable premultiplied RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBlock {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl GlyphBlock {
    /// Fully transparent block
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Zero-sized block returned for empty text
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// 1x1 transparent stand-in for a failed rasterization
    pub fn placeholder() -> Self {
        Self::transparent(1, 1)
    }

    /// Build from raw pixels; `None` if the length does not match
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Size as a float vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// True for the zero-sized block
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Flat byte view, four bytes per pixel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Composite `tint` (premultiplied, 0..1) scaled by per-channel coverage.
    /// Out-of-bounds coordinates are ignored.
    pub(crate) fn blend_coverage(&mut self, x: i32, y: i32, coverage: [f32; 3], tint: [f32; 4]) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let alpha_cov = coverage[0].max(coverage[1]).max(coverage[2]);
        if alpha_cov <= 0.0 {
            return;
        }
        let index = (y as u32 * self.width + x as u32) as usize;
        let dst = self.pixels[index].map(|c| f32::from(c) / 255.0);
        let src = [
            tint[0] * coverage[0],
            tint[1] * coverage[1],
            tint[2] * coverage[2],
            tint[3] * alpha_cov,
        ];
        let keep = 1.0 - src[3];
        let mut out = [0u8; 4];
        for channel in 0..4 {
            out[channel] = ((src[channel] + dst[channel] * keep).clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        self.pixels[index] = out;
    }
}

/// Cache fingerprint of a rasterization request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// Text content
    pub text: String,
    /// Logical font name
    pub font: String,
    /// Pixel size as raw float bits
    pub size_bits: u32,
    /// Packed RGBA color
    pub color: u32,
}

impl GlyphKey {
    /// Fingerprint a request
    pub fn new(text: &str, font: &str, pixel_size: f32, color: Color) -> Self {
        Self {
            text: text.to_string(),
            font: font.to_string(),
            size_bits: pixel_size.to_bits(),
            color: color.packed(),
        }
    }
}

/// Rasterization service used by [`GlyphCache`] on a miss
pub trait GlyphRenderer: Send {
    /// Shape and rasterize `text` into a new block
    fn render(
        &mut self,
        text: &str,
        font: &str,
        pixel_size: f32,
        color: Color,
        config: &RenderConfig,
    ) -> TextResult<GlyphBlock>;

    /// Layout size of `text` without rasterizing it
    fn measure(&mut self, text: &str, font: &str, pixel_size: f32) -> TextResult<Vec2>;

    /// Name the renderer uses for the default font
    fn default_font(&self) -> &str;
}

struct CacheState {
    blocks: HashMap<GlyphKey, Arc<GlyphBlock>>,
    version: u64,
    renderer: Box<dyn GlyphRenderer>,
}

/// Shared cache of rasterized text blocks
pub struct GlyphCache {
    state: Mutex<CacheState>,
    empty: Arc<GlyphBlock>,
}

impl GlyphCache {
    /// Create an empty cache backed by `renderer`
    pub fn new(renderer: impl GlyphRenderer + 'static) -> Self {
        Self {
            state: Mutex::new(CacheState {
                blocks: HashMap::new(),
                version: 0,
                renderer: Box::new(renderer),
            }),
            empty: Arc::new(GlyphBlock::empty()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached block for the request, rasterizing on a miss.
    ///
    /// Empty text returns a shared zero-sized block and leaves the cache
    /// untouched.
    pub fn get_or_render(
        &self,
        text: &str,
        font: &str,
        pixel_size: f32,
        color: Color,
        config: &RenderConfig,
    ) -> Arc<GlyphBlock> {
        if text.is_empty() {
            return Arc::clone(&self.empty);
        }

        let mut state = self.lock();
        if state.version != config.version() {
            if !state.blocks.is_empty() {
                log::debug!(
                    "[GlyphCache] Render config version {} -> {}, dropping {} blocks",
                    state.version,
                    config.version(),
                    state.blocks.len()
                );
            }
            state.blocks.clear();
            state.version = config.version();
        }

        let key = GlyphKey::new(text, font, pixel_size, color);
        if let Some(block) = state.blocks.get(&key) {
            return Arc::clone(block);
        }

        let block = match state.renderer.render(text, font, pixel_size, color, config) {
            Ok(block) => block,
            Err(err) => {
                log::warn!("[GlyphCache] Failed to render '{text}' ({font}, {pixel_size}px): {err}");
                GlyphBlock::placeholder()
            }
        };
        let block = Arc::new(block);
        state.blocks.insert(key, Arc::clone(&block));
        block
    }

    /// Layout size of `text`. Empty text measures zero; failures fall back
    /// to an estimate of ten pixels per character at `pixel_size` height.
    pub fn measure(&self, text: &str, font: &str, pixel_size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::zeros();
        }
        match self.lock().renderer.measure(text, font, pixel_size) {
            Ok(size) => size,
            Err(err) => {
                log::warn!("[GlyphCache] Failed to measure '{text}': {err}");
                Vec2::new(FALLBACK_CHAR_WIDTH * text.chars().count() as f32, pixel_size)
            }
        }
    }

    /// Default font name of the underlying renderer
    pub fn default_font(&self) -> String {
        self.lock().renderer.default_font().to_string()
    }

    /// Release every cached block
    pub fn clear_all(&self) {
        let mut state = self.lock();
        log::debug!("[GlyphCache] Clearing {} blocks", state.blocks.len());
        state.blocks.clear();
    }

    /// Number of cached blocks
    pub fn len(&self) -> usize {
        self.lock().blocks.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
