//! Text label

use super::base::{draw_background, Widget};
use crate::events::HandlerResult;
use crate::foundation::color::Color;
use crate::foundation::math::{Point2, Rect};
use crate::ui::context::DrawCx;
use crate::ui::tree::Node;

/// Horizontal placement inside the node's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Flush left, top aligned
    #[default]
    Left,
    /// Centered on both axes
    Center,
    /// Flush right, top aligned
    Right,
}

/// Single line of text.
///
/// The glyph block is rasterized in white at the oversampled pixel size and
/// tinted with `color` when drawn, so recoloring a label never re-rasterizes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Content
    pub text: String,
    /// Logical font name; empty selects the default font
    pub font: String,
    /// Semantic size, authored against the canvas reference height
    pub size: f32,
    /// Tint
    pub color: Color,
    /// Placement
    pub alignment: TextAlignment,
}

impl TextLabel {
    /// White, left-aligned label at semantic size 16 in the default font
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: String::new(),
            size: 16.0,
            color: Color::WHITE,
            alignment: TextAlignment::Left,
        }
    }

    /// Set font and semantic size
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>, size: f32) -> Self {
        self.font = font.into();
        self.size = size;
        self
    }

    /// Set the tint
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the alignment
    #[must_use]
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn origin(&self, bounds: Rect, size: (f32, f32)) -> Point2 {
        let (w, h) = size;
        let x = bounds.x as f32;
        let y = bounds.y as f32;
        match self.alignment {
            TextAlignment::Left => Point2::new(x, y),
            TextAlignment::Center => Point2::new(
                x + (bounds.width as f32 - w) / 2.0,
                y + (bounds.height as f32 - h) / 2.0,
            ),
            TextAlignment::Right => Point2::new(x + bounds.width as f32 - w, y),
        }
    }
}

impl Widget for TextLabel {
    fn draw(&self, node: &Node, bounds: Rect, cx: &mut DrawCx<'_>) -> HandlerResult {
        if self.text.is_empty() {
            return Ok(());
        }
        draw_background(node, bounds, cx);

        let size = cx.measure_text(&self.text, &self.font, self.size);
        let origin = self.origin(bounds, (size.x, size.y));
        cx.draw_text(&self.text, &self.font, self.size, self.color.scale(node.alpha), origin);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_origin() {
        let bounds = Rect::new(100, 50, 400, 100);
        let mut label = TextLabel::new("Start");

        assert_eq!(label.origin(bounds, (200.0, 40.0)), Point2::new(100.0, 50.0));

        label.alignment = TextAlignment::Center;
        assert_eq!(label.origin(bounds, (200.0, 40.0)), Point2::new(200.0, 80.0));

        label.alignment = TextAlignment::Right;
        assert_eq!(label.origin(bounds, (200.0, 40.0)), Point2::new(300.0, 50.0));
    }
}
