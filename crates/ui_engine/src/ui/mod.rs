//! UI layer
//!
//! Retained node trees, widgets, menus and the frame driver:
//! - [`tree`]: node arena, layout and the overlay channel
//! - [`widgets`]: buttons, dropdowns, labels
//! - [`menu`]: menus and the exclusive/overlay stack
//! - [`input`]: pointer polling into canvas space
//! - [`context`]: per-pass contexts and deferred commands
//! - [`backend`] and [`rendering`]: where draw calls go
//! - [`manager`]: the frame driver

pub mod backend;
pub mod context;
pub mod input;
pub mod manager;
pub mod menu;
pub mod rendering;
pub mod tree;
pub mod widgets;

pub use backend::DrawBatch;
pub use context::{Commands, CursorShape, DisplayChange, DrawCx, UiCommand, UpdateCx};
pub use input::{InputProcessor, PointerFrame};
pub use manager::UiManager;
pub use menu::{Menu, MenuContent, MenuKind, MenuStack, MenuState};
pub use rendering::{CommandList, DrawCommand, PixelCanvas};
pub use tree::{Node, NodeId, NodeTree, NormalizedRect, OverlayQueue, TreeError};
