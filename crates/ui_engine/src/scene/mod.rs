//! Flat scene registry
//!
//! Top-level scene content (backgrounds, characters, HUD trees) lives in a
//! [`SceneCollector`] that paints by ascending layer. The node tree itself
//! never sorts; only this collector does.

pub mod layers;
pub mod collector;

pub use collector::{SceneCollector, SceneObject, TreeObject};
pub use layers::LayerConstants;
