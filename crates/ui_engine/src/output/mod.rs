//! Output mapping
//!
//! Everything between the fixed virtual canvas and the physical surface the
//! host presents to:
//! - [`mapper`]: destination rectangle and pointer mapping
//! - [`display`]: display quirks that distort raw pointer positions
//! - [`resolution`]: window size catalogue and windowed/fullscreen switching

pub mod mapper;
pub mod display;
pub mod resolution;

pub use display::{DisplayInfo, PointerCorrection};
pub use mapper::{
    destination_rect, map_canvas_to_physical, map_physical_to_canvas, OutputSurface, VirtualCanvas,
};
pub use resolution::{DisplayModeController, ResolutionCatalog, ResolutionEntry, SurfaceRequest};
