//! Physical pointer to canvas pointer

use crate::foundation::math::Point2;
use crate::output::{self, OutputSurface, PointerCorrection, VirtualCanvas};

/// Pointer state for one update pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    /// Position in canvas coordinates; `None` over the bars or off the surface
    pub position: Option<Point2>,
    /// Primary button held
    pub down: bool,
    /// Primary button went down since the previous pass
    pub pressed: bool,
    /// Primary button went up since the previous pass
    pub released: bool,
}

/// Accumulates raw pointer events between passes
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    raw_position: Option<Point2>,
    down: bool,
    was_down: bool,
}

impl InputProcessor {
    /// No pointer known yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved to a physical position
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.raw_position = Some(Point2::new(x, y));
    }

    /// Pointer left the surface
    pub fn clear_pointer(&mut self) {
        self.raw_position = None;
    }

    /// Primary button state changed
    pub fn set_button(&mut self, down: bool) {
        self.down = down;
    }

    /// Last raw physical position
    pub const fn raw_position(&self) -> Option<Point2> {
        self.raw_position
    }

    /// Produce the frame for this pass.
    ///
    /// The destination rectangle is recomputed from the current surface every
    /// call, so resizes take effect immediately.
    pub fn poll(
        &mut self,
        canvas: VirtualCanvas,
        surface: OutputSurface,
        correction: PointerCorrection,
    ) -> PointerFrame {
        let dest = output::destination_rect(canvas, surface);
        let position = self
            .raw_position
            .map(|raw| correction.apply(raw))
            .and_then(|p| output::map_physical_to_canvas(canvas, p, dest));

        let frame = PointerFrame {
            position,
            down: self.down,
            pressed: self.down && !self.was_down,
            released: !self.down && self.was_down,
        };
        self.was_down = self.down;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edges_last_one_poll() {
        let canvas = VirtualCanvas::default();
        let surface = OutputSurface::windowed(2560, 1440);
        let mut input = InputProcessor::new();

        input.set_button(true);
        let first = input.poll(canvas, surface, PointerCorrection::NONE);
        assert!(first.pressed && first.down && !first.released);

        let held = input.poll(canvas, surface, PointerCorrection::NONE);
        assert!(held.down && !held.pressed);

        input.set_button(false);
        let up = input.poll(canvas, surface, PointerCorrection::NONE);
        assert!(up.released && !up.down);
    }

    #[test]
    fn test_position_mapped_through_bars() {
        let canvas = VirtualCanvas::default();
        let surface = OutputSurface::windowed(1920, 1000);
        let mut input = InputProcessor::new();

        input.set_pointer(71.0, 0.0);
        let frame = input.poll(canvas, surface, PointerCorrection::NONE);
        let p = frame.position.expect("inside destination");
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);

        input.set_pointer(70.0, 500.0);
        assert_eq!(input.poll(canvas, surface, PointerCorrection::NONE).position, None);
    }
}
