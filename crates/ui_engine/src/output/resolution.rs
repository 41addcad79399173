//! Window size catalogue and display mode switching
//!
//! The host owns the actual window. This module decides which sizes to offer
//! and which surface the host should create next; the answer is always a
//! [`SurfaceRequest`] for the host to apply.

/// Standard 16:9 window sizes offered on every display
pub const STANDARD_SIZES: [(u32, u32); 5] = [
    (960, 540),
    (1280, 720),
    (1600, 900),
    (1920, 1080),
    (2560, 1440),
];

/// One selectable window size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEntry {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Display label such as `"1920 x 1080"`
    pub label: String,
    /// Whether this is the size derived from the display
    pub recommended: bool,
}

impl ResolutionEntry {
    fn new(width: u32, height: u32, recommended: bool) -> Self {
        let label = if recommended {
            format!("{width} x {height} (recommended)")
        } else {
            format!("{width} x {height}")
        };
        Self {
            width,
            height,
            label,
            recommended,
        }
    }
}

/// Ordered list of window sizes for a given display
#[derive(Debug, Clone)]
pub struct ResolutionCatalog {
    entries: Vec<ResolutionEntry>,
    recommended: (u32, u32),
}

impl ResolutionCatalog {
    /// Build the catalogue for a display `display_width` pixels wide.
    ///
    /// A 16:9 size matching the display width is added (sorted by height) and
    /// marked as recommended; if it is already a standard size that entry is
    /// relabelled instead.
    pub fn new(display_width: u32) -> Self {
        let mut entries: Vec<ResolutionEntry> = STANDARD_SIZES
            .iter()
            .map(|&(w, h)| ResolutionEntry::new(w, h, false))
            .collect();

        let dynamic_height = (f64::from(display_width) * 9.0 / 16.0).round() as u32;
        let dynamic = (display_width, dynamic_height);
        log::info!(
            "[Resolution] Dynamic 16:9 size for display width {}: {}x{}",
            display_width,
            dynamic.0,
            dynamic.1
        );

        if let Some(existing) = entries.iter_mut().find(|e| (e.width, e.height) == dynamic) {
            *existing = ResolutionEntry::new(dynamic.0, dynamic.1, true);
        } else {
            let index = entries
                .iter()
                .position(|e| e.height >= dynamic.1)
                .unwrap_or(entries.len());
            entries.insert(index, ResolutionEntry::new(dynamic.0, dynamic.1, true));
        }

        Self {
            entries,
            recommended: dynamic,
        }
    }

    /// All entries, smallest first
    pub fn entries(&self) -> &[ResolutionEntry] {
        &self.entries
    }

    /// Labels in entry order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&ResolutionEntry> {
        self.entries.get(index)
    }

    /// Index of an exact size
    pub fn index_of(&self, width: u32, height: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.width == width && e.height == height)
    }

    /// Size derived from the display
    pub const fn recommended(&self) -> (u32, u32) {
        self.recommended
    }
}

/// Surface the host should (re)create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRequest {
    /// Back buffer width
    pub width: u32,
    /// Back buffer height
    pub height: u32,
    /// Fullscreen flag
    pub fullscreen: bool,
}

/// Windowed/fullscreen state machine
#[derive(Debug, Clone)]
pub struct DisplayModeController {
    window_size: (u32, u32),
    last_windowed: (u32, u32),
    fullscreen: Option<(u32, u32)>,
}

impl DisplayModeController {
    /// Start windowed at `initial`
    pub const fn new(initial: (u32, u32)) -> Self {
        Self {
            window_size: initial,
            last_windowed: initial,
            fullscreen: None,
        }
    }

    /// Request describing the current state
    pub const fn current_request(&self) -> SurfaceRequest {
        match self.fullscreen {
            Some((width, height)) => SurfaceRequest {
                width,
                height,
                fullscreen: true,
            },
            None => SurfaceRequest {
                width: self.window_size.0,
                height: self.window_size.1,
                fullscreen: false,
            },
        }
    }

    /// Whether the surface is currently fullscreen
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_some()
    }

    /// Current windowed size
    pub const fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Resize the window. Ignored while fullscreen.
    pub fn change_resolution(&mut self, width: u32, height: u32) -> Option<SurfaceRequest> {
        if self.is_fullscreen() {
            log::debug!("[Resolution] Ignoring {}x{} while fullscreen", width, height);
            return None;
        }
        self.window_size = (width, height);
        self.last_windowed = (width, height);
        Some(self.current_request())
    }

    /// Go fullscreen at the display size, remembering the window size
    pub fn set_fullscreen(&mut self, display_width: u32, display_height: u32) -> SurfaceRequest {
        if !self.is_fullscreen() {
            self.last_windowed = self.window_size;
        }
        self.fullscreen = Some((display_width, display_height));
        self.current_request()
    }

    /// Leave fullscreen, restoring the last windowed size
    pub fn set_windowed(&mut self) -> Option<SurfaceRequest> {
        self.fullscreen.take()?;
        self.window_size = self.last_windowed;
        Some(self.current_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_size_inserted_sorted() {
        let catalog = ResolutionCatalog::new(1440);
        let sizes: Vec<_> = catalog.entries().iter().map(|e| (e.width, e.height)).collect();
        assert_eq!(
            sizes,
            vec![(960, 540), (1280, 720), (1440, 810), (1600, 900), (1920, 1080), (2560, 1440)]
        );
        assert_eq!(catalog.get(2).map(|e| e.label.as_str()), Some("1440 x 810 (recommended)"));
        assert_eq!(catalog.recommended(), (1440, 810));
    }

    #[test]
    fn test_existing_size_marked_recommended() {
        let catalog = ResolutionCatalog::new(1920);
        assert_eq!(catalog.entries().len(), 5);
        let index = catalog.index_of(1920, 1080).expect("standard size");
        assert!(catalog.entries()[index].recommended);
        assert_eq!(catalog.entries()[index].label, "1920 x 1080 (recommended)");
        assert_eq!(catalog.labels().filter(|l| l.contains("recommended")).count(), 1);
    }

    #[test]
    fn test_wide_display_appends() {
        let catalog = ResolutionCatalog::new(3456);
        let last = catalog.entries().last().expect("entries");
        assert_eq!((last.width, last.height), (3456, 1944));
    }

    #[test]
    fn test_fullscreen_restores_window_size() {
        let mut modes = DisplayModeController::new((1600, 900));

        let full = modes.set_fullscreen(2560, 1600);
        assert!(full.fullscreen);
        assert_eq!((full.width, full.height), (2560, 1600));

        // Resolution changes are ignored while fullscreen
        assert_eq!(modes.change_resolution(960, 540), None);

        let back = modes.set_windowed().expect("was fullscreen");
        assert_eq!(back, SurfaceRequest { width: 1600, height: 900, fullscreen: false });

        // Already windowed
        assert_eq!(modes.set_windowed(), None);
    }

    #[test]
    fn test_change_resolution_windowed() {
        let mut modes = DisplayModeController::new((1280, 720));
        let request = modes.change_resolution(1920, 1080).expect("windowed");
        assert_eq!((request.width, request.height), (1920, 1080));
        assert_eq!(modes.window_size(), (1920, 1080));
    }
}
