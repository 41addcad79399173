//! RGBA8 colors

use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Create a color from its four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Multiply every channel by `factor` (clamped to `0.0..=1.0`).
    ///
    /// This is how element alpha and the disabled look are applied, so
    /// `color.scale(0.5)` halves both brightness and opacity.
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let mul = |c: u8| (f32::from(c) * f).round() as u8;
        Self::rgba(mul(self.r), mul(self.g), mul(self.b), mul(self.a))
    }

    /// Channels with color premultiplied by alpha
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let mul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
        [mul(self.r), mul(self.g), mul(self.b), self.a]
    }

    /// Pack into a single `0xRRGGBBAA` value, used as a cache fingerprint
    pub const fn packed(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Channels as an array
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_halves_all_channels() {
        let c = Color::rgba(50, 50, 50, 200).scale(0.5);
        assert_eq!(c, Color::rgba(25, 25, 25, 100));
    }

    #[test]
    fn test_packed_distinguishes_channels() {
        assert_eq!(Color::rgba(1, 2, 3, 4).packed(), 0x0102_0304);
        assert_ne!(Color::WHITE.packed(), Color::rgba(255, 255, 255, 254).packed());
    }

    #[test]
    fn test_premultiplied() {
        assert_eq!(Color::rgba(255, 128, 0, 128).premultiplied(), [128, 64, 0, 128]);
        assert_eq!(Color::WHITE.premultiplied(), [255, 255, 255, 255]);
    }
}
