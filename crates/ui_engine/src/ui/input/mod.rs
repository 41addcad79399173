//! Pointer input
//!
//! The host reports raw physical pointer state; [`InputProcessor`] turns it
//! into one [`PointerFrame`] per update pass in canvas coordinates.

pub mod processor;

pub use processor::{InputProcessor, PointerFrame};
