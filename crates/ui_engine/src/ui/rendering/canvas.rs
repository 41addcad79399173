//! Software render target
//!
//! Premultiplied RGBA8 pixels composited with the "over" operator. Used by
//! headless hosts and tests to turn a frame into pixels without a GPU.

use std::path::Path;
use std::sync::Arc;

use crate::config::SamplerMode;
use crate::foundation::color::Color;
use crate::foundation::math::{Point2, Rect};
use crate::output::{self, OutputSurface, VirtualCanvas};
use crate::text::GlyphBlock;
use crate::ui::backend::DrawBatch;

/// Errors raised while exporting a canvas
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// Encoding or writing the image failed
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),

    /// Pixel buffer and dimensions disagree
    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
}

/// CPU-side RGBA8 image that implements [`DrawBatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    sampler: SamplerMode,
}

impl PixelCanvas {
    /// Transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            sampler: SamplerMode::default(),
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixels, row-major
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Flat byte view for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Premultiplied pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Overwrite every pixel
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.premultiplied());
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    fn blend(&mut self, x: i32, y: i32, src: [f32; 4]) {
        let index = (y as u32 * self.width + x as u32) as usize;
        let dst = &mut self.pixels[index];
        let keep = 1.0 - src[3] / 255.0;
        for channel in 0..4 {
            let value = src[channel] + f32::from(dst[channel]) * keep;
            dst[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Scale this canvas into the destination rectangle of a
    /// `surface_width` x `surface_height` output, with black bars elsewhere
    pub fn present(&self, surface_width: u32, surface_height: u32, sampler: SamplerMode) -> Self {
        let mut out = Self::new(surface_width, surface_height);
        out.clear(Color::BLACK);

        let canvas = VirtualCanvas::new(self.width, self.height, self.height);
        let dest = output::destination_rect(canvas, OutputSurface::windowed(surface_width, surface_height));
        if dest.is_empty() {
            return out;
        }

        let sx = self.width as f32 / dest.width as f32;
        let sy = self.height as f32 / dest.height as f32;
        for y in dest.y..dest.bottom() {
            for x in dest.x..dest.right() {
                let u = (x - dest.x) as f32 + 0.5;
                let v = (y - dest.y) as f32 + 0.5;
                let src = sample(&self.pixels, self.width, self.height, u * sx, v * sy, sampler);
                out.blend(x, y, src);
            }
        }
        out
    }

    /// Straight-alpha copy as an `image` buffer
    pub fn to_image(&self) -> Result<image::RgbaImage, CanvasError> {
        let raw = self.pixels.iter().flat_map(|&p| unpremultiply(p)).collect();
        image::RgbaImage::from_raw(self.width, self.height, raw).ok_or(CanvasError::BufferSize {
            width: self.width,
            height: self.height,
        })
    }

    /// Write a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let path = path.as_ref();
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} frame to {:?}", self.width, self.height, path);
        Ok(())
    }
}

impl DrawBatch for PixelCanvas {
    fn begin(&mut self, sampler: SamplerMode) {
        self.sampler = sampler;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clip) = rect.intersection(&self.bounds()) else {
            return;
        };
        let src = color.premultiplied().map(f32::from);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.blend(x, y, src);
            }
        }
    }

    fn draw_block(&mut self, block: &Arc<GlyphBlock>, position: Point2, scale: f32, tint: Color) {
        if block.is_empty() || scale <= 0.0 || tint.a == 0 {
            return;
        }
        let target = Rect::new(
            position.x.round() as i32,
            position.y.round() as i32,
            (block.width() as f32 * scale).round() as i32,
            (block.height() as f32 * scale).round() as i32,
        );
        let Some(clip) = target.intersection(&self.bounds()) else {
            return;
        };

        let tint = tint.premultiplied().map(|c| f32::from(c) / 255.0);
        let inv = 1.0 / scale;
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let u = ((x - target.x) as f32 + 0.5) * inv;
                let v = ((y - target.y) as f32 + 0.5) * inv;
                let texel = sample(block.pixels(), block.width(), block.height(), u, v, self.sampler);
                let src = [
                    texel[0] * tint[0],
                    texel[1] * tint[1],
                    texel[2] * tint[2],
                    texel[3] * tint[3],
                ];
                if src[3] > 0.0 {
                    self.blend(x, y, src);
                }
            }
        }
    }
}

fn unpremultiply(p: [u8; 4]) -> [u8; 4] {
    let a = p[3];
    if a == 0 {
        return [0; 4];
    }
    let undo = |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
    [undo(p[0]), undo(p[1]), undo(p[2]), a]
}

/// Sample at continuous source coordinates (pixel centers at +0.5)
fn sample(pixels: &[[u8; 4]], width: u32, height: u32, u: f32, v: f32, sampler: SamplerMode) -> [f32; 4] {
    let max_x = width as i32 - 1;
    let max_y = height as i32 - 1;
    let fetch = |x: i32, y: i32| {
        let x = x.clamp(0, max_x) as usize;
        let y = y.clamp(0, max_y) as usize;
        pixels[y * width as usize + x].map(f32::from)
    };

    match sampler {
        SamplerMode::PointClamp => fetch(u.floor() as i32, v.floor() as i32),
        SamplerMode::LinearClamp | SamplerMode::AnisotropicClamp => {
            let fx = u - 0.5;
            let fy = v - 0.5;
            let x0 = fx.floor();
            let y0 = fy.floor();
            let tx = fx - x0;
            let ty = fy - y0;
            let (x0, y0) = (x0 as i32, y0 as i32);

            let a = fetch(x0, y0);
            let b = fetch(x0 + 1, y0);
            let c = fetch(x0, y0 + 1);
            let d = fetch(x0 + 1, y0 + 1);
            let mut out = [0.0; 4];
            for channel in 0..4 {
                let top = a[channel] + (b[channel] - a[channel]) * tx;
                let bottom = c[channel] + (d[channel] - c[channel]) * tx;
                out[channel] = top + (bottom - top) * ty;
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_blends_over() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.clear(Color::BLACK);
        canvas.fill_rect(Rect::new(1, 1, 2, 2), Color::rgba(255, 255, 255, 128));

        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([128, 128, 128, 255]));
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_clips_to_canvas() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(Rect::new(-10, -10, 12, 12), Color::WHITE);
        assert_eq!(canvas.pixel(1, 1), Some([255; 4]));
        assert_eq!(canvas.pixel(2, 2), Some([0; 4]));
    }

    #[test]
    fn test_block_tinted_nearest() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.begin(SamplerMode::PointClamp);
        let block = Arc::new(GlyphBlock::from_pixels(1, 1, vec![[255; 4]]).expect("1x1"));

        canvas.draw_block(&block, Point2::new(2.0, 0.0), 2.0, Color::rgb(255, 0, 0));
        assert_eq!(canvas.pixel(2, 0), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(3, 1), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([0; 4]));
    }

    #[test]
    fn test_present_letterboxes() {
        let mut canvas = PixelCanvas::new(16, 9);
        canvas.clear(Color::WHITE);

        let out = canvas.present(16, 16, SamplerMode::PointClamp);
        // 16x9 content centered vertically: rows 3..12
        assert_eq!(out.pixel(8, 0), Some([0, 0, 0, 255]));
        assert_eq!(out.pixel(8, 3), Some([255; 4]));
        assert_eq!(out.pixel(8, 11), Some([255; 4]));
        assert_eq!(out.pixel(8, 12), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_to_image_unpremultiplies() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.fill_rect(Rect::new(0, 0, 1, 1), Color::rgba(255, 0, 0, 128));
        let image = canvas.to_image().expect("image");
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 128]);
    }
}
