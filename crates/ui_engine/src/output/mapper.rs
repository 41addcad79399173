//! Virtual canvas to output surface mapping
//!
//! The canvas is scaled uniformly to fit the surface. A surface wider than
//! the canvas aspect gets vertical bars left and right (pillarbox), a
//! narrower one gets horizontal bars top and bottom (letterbox). Nothing here
//! is cached: callers recompute the destination rectangle whenever they need
//! it, so a resize is picked up on the next pass.

use crate::foundation::math::{Point2, Rect};

/// Fixed logical drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualCanvas {
    /// Width in canvas pixels
    pub width: u32,
    /// Height in canvas pixels
    pub height: u32,
    /// Height semantic font sizes are authored against
    pub reference_height: u32,
}

impl VirtualCanvas {
    /// Create a canvas description
    pub const fn new(width: u32, height: u32, reference_height: u32) -> Self {
        Self {
            width,
            height,
            reference_height,
        }
    }

    /// The whole canvas as a rectangle
    pub const fn rect(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    /// Multiplier from semantic font size to canvas pixels
    pub fn font_scale(&self) -> f32 {
        if self.reference_height == 0 {
            return 1.0;
        }
        self.height as f32 / self.reference_height as f32
    }

    /// Canvas pixel size for a semantic font size
    pub fn pixel_size(&self, semantic_size: f32) -> f32 {
        semantic_size * self.font_scale()
    }
}

impl Default for VirtualCanvas {
    fn default() -> Self {
        Self::new(2560, 1440, 720)
    }
}

/// Physical output surface reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputSurface {
    /// Width in physical pixels
    pub width: u32,
    /// Height in physical pixels
    pub height: u32,
    /// Whether the surface covers the display in fullscreen mode
    pub fullscreen: bool,
}

impl OutputSurface {
    /// Windowed surface of the given size
    pub const fn windowed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: false,
        }
    }

    /// Fullscreen surface of the given size
    pub const fn fullscreen(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: true,
        }
    }
}

/// Largest aspect-preserving rectangle of the canvas centered in the surface.
///
/// Aspect ratios are compared by cross-multiplication so an exact match is
/// detected without float error. Degenerate sizes produce an empty rectangle
/// at the origin.
pub fn destination_rect(canvas: VirtualCanvas, surface: OutputSurface) -> Rect {
    if surface.width == 0 || surface.height == 0 || canvas.width == 0 || canvas.height == 0 {
        return Rect::default();
    }

    let (sw, sh) = (u64::from(surface.width), u64::from(surface.height));
    let (cw, ch) = (u64::from(canvas.width), u64::from(canvas.height));
    let (surface_w, surface_h) = (surface.width as i32, surface.height as i32);

    match (sw * ch).cmp(&(cw * sh)) {
        std::cmp::Ordering::Greater => {
            // Pillarbox
            let width = (sh as f64 * cw as f64 / ch as f64).round() as i32;
            Rect::new((surface_w - width) / 2, 0, width, surface_h)
        }
        std::cmp::Ordering::Less => {
            // Letterbox
            let height = (sw as f64 * ch as f64 / cw as f64).round() as i32;
            Rect::new(0, (surface_h - height) / 2, surface_w, height)
        }
        std::cmp::Ordering::Equal => Rect::from_size(surface_w, surface_h),
    }
}

/// Map a physical pointer position into canvas coordinates.
///
/// Returns `None` when the point falls outside `dest` (on the bars or off
/// the surface). A zero-sized destination axis maps to zero.
pub fn map_physical_to_canvas(canvas: VirtualCanvas, point: Point2, dest: Rect) -> Option<Point2> {
    if !dest.contains(point) {
        return None;
    }

    let scale_x = if dest.width > 0 {
        canvas.width as f32 / dest.width as f32
    } else {
        0.0
    };
    let scale_y = if dest.height > 0 {
        canvas.height as f32 / dest.height as f32
    } else {
        0.0
    };

    Some(Point2::new(
        (point.x - dest.x as f32) * scale_x,
        (point.y - dest.y as f32) * scale_y,
    ))
}

/// Map a canvas position onto the physical surface
pub fn map_canvas_to_physical(canvas: VirtualCanvas, point: Point2, dest: Rect) -> Point2 {
    let scale_x = if canvas.width > 0 {
        dest.width as f32 / canvas.width as f32
    } else {
        0.0
    };
    let scale_y = if canvas.height > 0 {
        dest.height as f32 / canvas.height as f32
    } else {
        0.0
    };

    Point2::new(
        dest.x as f32 + point.x * scale_x,
        dest.y as f32 + point.y * scale_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CANVAS: VirtualCanvas = VirtualCanvas::new(2560, 1440, 720);

    #[test]
    fn test_pillarbox_is_centered() {
        let dest = destination_rect(CANVAS, OutputSurface::windowed(1920, 1000));
        assert_eq!(dest, Rect::new(71, 0, 1778, 1000));
    }

    #[test]
    fn test_letterbox_is_centered() {
        let dest = destination_rect(CANVAS, OutputSurface::windowed(1280, 1024));
        assert_eq!(dest, Rect::new(0, 152, 1280, 720));
        // Equal margins up to one pixel
        let top = dest.y;
        let bottom = 1024 - dest.bottom();
        assert!((top - bottom).abs() <= 1);
    }

    #[test]
    fn test_matching_aspect_fills_surface() {
        let dest = destination_rect(CANVAS, OutputSurface::fullscreen(1920, 1080));
        assert_eq!(dest, Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn test_degenerate_surface() {
        assert_eq!(destination_rect(CANVAS, OutputSurface::windowed(0, 600)), Rect::default());
        assert_eq!(destination_rect(CANVAS, OutputSurface::windowed(800, 0)), Rect::default());
    }

    #[test]
    fn test_round_trip_inside_dest() {
        let dest = destination_rect(CANVAS, OutputSurface::windowed(1920, 1000));
        let physical = Point2::new(500.0, 321.0);

        let canvas_point = map_physical_to_canvas(CANVAS, physical, dest).expect("inside dest");
        let back = map_canvas_to_physical(CANVAS, canvas_point, dest);

        assert_relative_eq!(back.x, physical.x, epsilon = 0.01);
        assert_relative_eq!(back.y, physical.y, epsilon = 0.01);
    }

    #[test]
    fn test_bars_map_to_none() {
        let dest = destination_rect(CANVAS, OutputSurface::windowed(1920, 1000));

        assert_eq!(map_physical_to_canvas(CANVAS, Point2::new(70.0, 500.0), dest), None);
        assert_eq!(map_physical_to_canvas(CANVAS, Point2::new(1849.0, 500.0), dest), None);

        let origin = map_physical_to_canvas(CANVAS, Point2::new(71.0, 0.0), dest).expect("inside");
        assert_relative_eq!(origin.x, 0.0);
        assert_relative_eq!(origin.y, 0.0);
    }

    #[test]
    fn test_font_scale() {
        assert_relative_eq!(CANVAS.font_scale(), 2.0);
        assert_relative_eq!(CANVAS.pixel_size(24.0), 48.0);
        assert_relative_eq!(VirtualCanvas::new(100, 100, 0).font_scale(), 1.0);
    }
}
