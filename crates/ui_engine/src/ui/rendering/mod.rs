//! Concrete [`DrawBatch`](super::backend::DrawBatch) implementations
//!
//! - [`commands`]: records draw calls, for tests and GPU backends that
//!   replay them
//! - [`canvas`]: software compositing into RGBA pixels, with PNG export

pub mod commands;
pub mod canvas;

pub use canvas::{CanvasError, PixelCanvas};
pub use commands::{CommandList, DrawCommand};
