//! Display quirks affecting raw pointer input

use crate::foundation::math::Point2;

/// Vertical pointer inset reported by notched displays in fullscreen
pub const NOTCH_POINTER_OFFSET: f32 = 36.0;

/// Facts about the display the surface lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Whether the host runs on macOS
    pub is_macos: bool,
    /// Native height of the primary display in pixels
    pub native_height: u32,
}

impl DisplayInfo {
    /// Describe a display on the current platform
    pub const fn current(native_height: u32) -> Self {
        Self {
            is_macos: cfg!(target_os = "macos"),
            native_height,
        }
    }

    /// Heuristic for a display with a camera notch.
    ///
    /// Only applies on macOS. Notched panels report native heights whose last
    /// digit is neither 0 nor 1 (1964, 2234, ...), unlike common panel heights.
    pub const fn likely_notched(&self) -> bool {
        if !self.is_macos {
            return false;
        }
        let last_digit = self.native_height % 10;
        last_digit != 0 && last_digit != 1
    }
}

/// Offset subtracted from raw pointer positions before mapping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerCorrection {
    y_offset: f32,
}

impl PointerCorrection {
    /// No correction
    pub const NONE: Self = Self { y_offset: 0.0 };

    /// Correction for the given display and surface mode
    pub fn for_display(display: DisplayInfo, fullscreen: bool) -> Self {
        if fullscreen && display.likely_notched() {
            log::debug!(
                "[Display] Native height {} looks notched, shifting pointer by {}px",
                display.native_height,
                NOTCH_POINTER_OFFSET
            );
            Self {
                y_offset: NOTCH_POINTER_OFFSET,
            }
        } else {
            Self::NONE
        }
    }

    /// Vertical offset in physical pixels
    pub const fn y_offset(&self) -> f32 {
        self.y_offset
    }

    /// Apply to a raw pointer position
    pub fn apply(&self, point: Point2) -> Point2 {
        Point2::new(point.x, point.y - self.y_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(native_height: u32) -> DisplayInfo {
        DisplayInfo {
            is_macos: true,
            native_height,
        }
    }

    #[test]
    fn test_notch_heuristic() {
        assert!(mac(1964).likely_notched());
        assert!(mac(2234).likely_notched());
        assert!(!mac(1080).likely_notched());
        assert!(!mac(1441).likely_notched());

        let linux = DisplayInfo {
            is_macos: false,
            native_height: 1964,
        };
        assert!(!linux.likely_notched());
    }

    #[test]
    fn test_correction_only_in_fullscreen() {
        let windowed = PointerCorrection::for_display(mac(1964), false);
        assert_eq!(windowed, PointerCorrection::NONE);

        let fullscreen = PointerCorrection::for_display(mac(1964), true);
        let corrected = fullscreen.apply(Point2::new(10.0, 100.0));
        assert!((corrected.y - 64.0).abs() < f32::EPSILON);
        assert!((corrected.x - 10.0).abs() < f32::EPSILON);
    }
}
