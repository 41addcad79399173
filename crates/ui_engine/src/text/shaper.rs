//! Single-line glyph positioning

use super::font::{FontFace, LineMetrics};

/// Horizontal advance used per character when a face has no outlines
const BLANK_ADVANCE_RATIO: f32 = 0.5;

/// Line height multiplier applied to ascent minus descent
pub const LINE_SPACING: f32 = 1.2;

/// One positioned character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    /// Source character
    pub ch: char,
    /// Pen position in pixels from the start of the line
    pub x: f32,
    /// Horizontal advance in pixels
    pub advance: f32,
}

/// Result of shaping a single line of text
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRun {
    /// Glyphs in logical order
    pub glyphs: Vec<PositionedGlyph>,
    /// Total advance width in pixels
    pub width: f32,
    /// Line metrics of the face at the shaped size
    pub metrics: LineMetrics,
}

impl ShapedRun {
    /// Height of the line including spacing
    pub fn line_height(&self) -> f32 {
        self.metrics.height() * LINE_SPACING
    }
}

/// Position `text` on a single line at `px` pixels.
///
/// Kerning pairs from the font are applied between consecutive characters.
/// Control characters are skipped.
pub fn shape(face: &FontFace, text: &str, px: f32) -> ShapedRun {
    let metrics = face.line_metrics(px);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen = 0.0_f32;
    let mut previous: Option<char> = None;

    for ch in text.chars().filter(|c| !c.is_control()) {
        let advance = match face.font() {
            Some(font) => {
                if let Some(kern) = previous.and_then(|left| font.horizontal_kern(left, ch, px)) {
                    pen += kern;
                }
                font.metrics(ch, px).advance_width
            }
            None => px * BLANK_ADVANCE_RATIO,
        };
        glyphs.push(PositionedGlyph { ch, x: pen, advance });
        pen += advance;
        previous = Some(ch);
    }

    ShapedRun {
        glyphs,
        width: pen.max(0.0),
        metrics,
    }
}
