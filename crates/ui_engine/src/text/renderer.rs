//! `fontdue` backed [`GlyphRenderer`]

use super::cache::{GlyphBlock, GlyphRenderer};
use super::font::FontLibrary;
use super::{raster, shaper, TextError, TextResult};
use crate::config::RenderConfig;
use crate::foundation::color::Color;
use crate::foundation::math::Vec2;

/// Rasterizes text with fonts from a [`FontLibrary`]
pub struct FontdueRenderer {
    library: FontLibrary,
}

impl FontdueRenderer {
    /// Create a renderer over `library`
    pub const fn new(library: FontLibrary) -> Self {
        Self { library }
    }

    /// Access the font library, e.g. to register embedded fonts
    pub fn library_mut(&mut self) -> &mut FontLibrary {
        &mut self.library
    }
}

fn check_size(pixel_size: f32) -> TextResult<()> {
    if pixel_size.is_finite() && pixel_size > 0.0 {
        Ok(())
    } else {
        Err(TextError::InvalidSize(pixel_size))
    }
}

impl GlyphRenderer for FontdueRenderer {
    fn render(
        &mut self,
        text: &str,
        font: &str,
        pixel_size: f32,
        color: Color,
        config: &RenderConfig,
    ) -> TextResult<GlyphBlock> {
        check_size(pixel_size)?;
        let face = self.library.face(font, pixel_size);
        let run = shaper::shape(&face, text, pixel_size);
        raster::rasterize(&face, &run, pixel_size, color, config)
    }

    fn measure(&mut self, text: &str, font: &str, pixel_size: f32) -> TextResult<Vec2> {
        check_size(pixel_size)?;
        let face = self.library.face(font, pixel_size);
        let run = shaper::shape(&face, text, pixel_size);
        Ok(Vec2::new(run.width, run.line_height()))
    }

    fn default_font(&self) -> &str {
        self.library.default_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::GlyphCache;

    #[test]
    fn test_invalid_size_becomes_placeholder() {
        let cache = GlyphCache::new(FontdueRenderer::new(FontLibrary::system_only()));
        let block = cache.get_or_render("Title", "", 0.0, Color::WHITE, &RenderConfig::default());
        assert_eq!((block.width(), block.height()), (1, 1));
    }

    #[test]
    fn test_measure_matches_block_size() {
        let mut renderer = FontdueRenderer::new(FontLibrary::system_only());
        let config = RenderConfig::default();

        let size = renderer.measure("Settings", "", 32.0).expect("measure");
        let block = renderer
            .render("Settings", "", 32.0, Color::WHITE, &config)
            .expect("render");

        assert_eq!(block.width(), size.x.ceil().max(1.0) as u32);
        assert_eq!(block.height(), size.y.ceil().max(1.0) as u32);
        assert!(size.x > 0.0);
    }
}
