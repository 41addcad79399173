//! Text rasterization
//!
//! Text is shaped and rasterized on the CPU with `fontdue` into immutable
//! RGBA blocks, which are cached by content fingerprint so each distinct
//! (text, font, size, color) combination is rasterized once.
//!
//! - [`font`]: font discovery, default resolution and fallback
//! - [`shaper`]: glyph positioning and line metrics
//! - [`raster`]: coverage to pixels, honouring [`RenderConfig`](crate::config::RenderConfig)
//! - [`renderer`]: the `fontdue` implementation of [`GlyphRenderer`]
//! - [`cache`]: the shared block cache

pub mod font;
pub mod shaper;
pub mod raster;
pub mod renderer;
pub mod cache;

pub use cache::{GlyphBlock, GlyphCache, GlyphKey, GlyphRenderer};
pub use font::{FontFace, FontLibrary, SYSTEM_FONT_NAME};
pub use renderer::FontdueRenderer;

/// Result type for text operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors raised while loading fonts or rasterizing text
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// No file matched the font name in the font directory
    #[error("Font '{0}' not found")]
    FontNotFound(String),

    /// The font file exists but could not be parsed
    #[error("Failed to load font '{name}': {reason}")]
    FontLoad {
        /// Logical font name
        name: String,
        /// Parser message
        reason: String,
    },

    /// Pixel size was zero, negative or not finite
    #[error("Invalid pixel size {0}")]
    InvalidSize(f32),

    /// The rasterized block would exceed the supported dimensions
    #[error("Text block {width}x{height} exceeds the maximum size")]
    TooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// IO error while reading a font file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
