//! Parent-relative layout rectangles

use crate::foundation::math::Rect;

/// Rectangle expressed as fractions of the parent's resolved rectangle.
///
/// Width and height are clamped non-negative on construction; position may
/// be negative or exceed 1 to place content outside the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    /// Left edge as a fraction of parent width
    pub x: f32,
    /// Top edge as a fraction of parent height
    pub y: f32,
    /// Width as a fraction of parent width
    pub width: f32,
    /// Height as a fraction of parent height
    pub height: f32,
}

impl NormalizedRect {
    /// Covers the whole parent
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Create a rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle of the given size centered in the parent
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new((1.0 - width) / 2.0, (1.0 - height) / 2.0, width, height)
    }

    /// Resolve against the parent's pixel rectangle, truncating toward zero
    pub fn to_rect(&self, parent: Rect) -> Rect {
        let pw = parent.width as f32;
        let ph = parent.height as f32;
        Rect::new(
            parent.x + (self.x * pw) as i32,
            parent.y + (self.y * ph) as i32,
            (self.width * pw) as i32,
            (self.height * ph) as i32,
        )
    }
}

impl Default for NormalizedRect {
    fn default() -> Self {
        Self::FULL
    }
}
