//! Glyph coverage to premultiplied RGBA
//!
//! The block is sized from the shaped run: width is the advance width,
//! height is the line height with spacing, both rounded up and at least one
//! pixel. The baseline sits `ascent` pixels below the top edge.

use super::cache::GlyphBlock;
use super::font::FontFace;
use super::shaper::ShapedRun;
use super::{TextError, TextResult};
use crate::config::{HintingLevel, RenderConfig, TextFlags};
use crate::foundation::color::Color;

/// Largest block edge accepted, in pixels
pub const MAX_BLOCK_DIMENSION: u32 = 16_384;

/// Largest block area accepted, in pixels (64 MiB of RGBA8)
pub const MAX_BLOCK_AREA: u64 = 1 << 24;

/// True when a block of this size may be allocated
pub fn fits_limits(width: u32, height: u32) -> bool {
    width <= MAX_BLOCK_DIMENSION
        && height <= MAX_BLOCK_DIMENSION
        && u64::from(width) * u64::from(height) <= MAX_BLOCK_AREA
}

/// Pixel dimensions for a shaped run
pub fn block_size(run: &ShapedRun) -> (u32, u32) {
    let width = run.width.ceil().max(1.0) as u32;
    let height = run.line_height().ceil().max(1.0) as u32;
    (width, height)
}

/// Rasterize a shaped run in `color` onto a transparent block
pub fn rasterize(
    face: &FontFace,
    run: &ShapedRun,
    px: f32,
    color: Color,
    config: &RenderConfig,
) -> TextResult<GlyphBlock> {
    let (width, height) = block_size(run);
    if !fits_limits(width, height) {
        return Err(TextError::TooLarge { width, height });
    }

    let mut block = GlyphBlock::transparent(width, height);
    let Some(font) = face.font() else {
        return Ok(block);
    };

    let flags = config.text_flags();
    let antialias = flags.contains(TextFlags::ANTIALIAS);
    let lcd = flags.contains(TextFlags::LCD);
    let snap_x = !flags.contains(TextFlags::SUBPIXEL) || config.hinting() == HintingLevel::Full;

    let mut baseline = run.metrics.ascent;
    if config.hinting() != HintingLevel::None || flags.contains(TextFlags::AUTOHINT) {
        baseline = baseline.round();
    }

    let tint = color.premultiplied().map(|c| f32::from(c) / 255.0);

    for glyph in run.glyphs.iter().filter(|g| !g.ch.is_whitespace()) {
        let (metrics, coverage, channels) = if lcd {
            let (metrics, coverage) = font.rasterize_subpixel(glyph.ch, px);
            (metrics, coverage, 3)
        } else {
            let (metrics, coverage) = font.rasterize(glyph.ch, px);
            (metrics, coverage, 1)
        };
        if metrics.width == 0 || metrics.height == 0 {
            continue;
        }

        let origin_x = glyph.x + metrics.xmin as f32;
        let top = (baseline - (metrics.height as f32 + metrics.ymin as f32)).round() as i32;
        let (left, frac) = if snap_x {
            (origin_x.round() as i32, 0.0)
        } else {
            let floor = origin_x.floor();
            (floor as i32, origin_x - floor)
        };

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let base = (row * metrics.width + col) * channels;
                let mut cov = if channels == 3 {
                    [coverage[base], coverage[base + 1], coverage[base + 2]].map(|c| f32::from(c) / 255.0)
                } else {
                    [f32::from(coverage[base]) / 255.0; 3]
                };
                if !antialias {
                    cov = cov.map(|c| if c >= 0.5 { 1.0 } else { 0.0 });
                }

                let x = left + col as i32;
                let y = top + row as i32;
                if frac > 0.0 {
                    block.blend_coverage(x, y, cov.map(|c| c * (1.0 - frac)), tint);
                    block.blend_coverage(x + 1, y, cov.map(|c| c * frac), tint);
                } else {
                    block.blend_coverage(x, y, cov, tint);
                }
            }
        }
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::shaper::shape;

    #[test]
    fn test_blank_face_block_is_transparent_and_sized() {
        let face = FontFace::blank("blank", 20.0);
        let run = shape(&face, "abcd", 20.0);
        let block = rasterize(&face, &run, 20.0, Color::WHITE, &RenderConfig::default())
            .expect("rasterize");

        // 4 chars * 10px advance, (16 + 4) * 1.2 line height
        assert_eq!(block.width(), 40);
        assert!((24..=25).contains(&block.height()));
        assert!(block.pixels().iter().all(|p| p[3] == 0));
    }

    #[test]
    fn test_minimum_one_pixel() {
        let face = FontFace::blank("blank", 0.1);
        let run = shape(&face, "\n", 0.1);
        assert_eq!(block_size(&run), (1, 1));
    }

    #[test]
    fn test_oversized_block_rejected() {
        let face = FontFace::blank("blank", 1000.0);
        let text = "x".repeat(40);
        let run = shape(&face, &text, 1000.0);
        let result = rasterize(&face, &run, 1000.0, Color::WHITE, &RenderConfig::default());
        assert!(matches!(result, Err(TextError::TooLarge { .. })));
    }

    #[test]
    fn test_area_limit_applies_below_edge_limit() {
        // 3 chars * 5000px advance by 12000px line height: both edges fit
        let face = FontFace::blank("blank", 10_000.0);
        let run = shape(&face, "xyz", 10_000.0);
        let (width, height) = block_size(&run);
        assert!(width <= MAX_BLOCK_DIMENSION && height <= MAX_BLOCK_DIMENSION);

        let result = rasterize(&face, &run, 10_000.0, Color::WHITE, &RenderConfig::default());
        assert!(matches!(result, Err(TextError::TooLarge { .. })));
        assert!(fits_limits(4096, 4096));
        assert!(!fits_limits(4097, 4096));
    }
}
