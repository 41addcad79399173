//! Retained node hierarchy
//!
//! - [`node`]: per-element data and the [`NodeId`] handle
//! - [`rect`]: parent-relative layout
//! - [`tree`]: the arena, structural operations and the update/draw passes
//! - [`overlay`]: the deferred overlay channel

pub mod node;
pub mod rect;
#[allow(clippy::module_inception)]
pub mod tree;
pub mod overlay;

pub use node::{Node, NodeId};
pub use overlay::OverlayQueue;
pub use rect::NormalizedRect;
pub use tree::{NodeTree, TreeError};
