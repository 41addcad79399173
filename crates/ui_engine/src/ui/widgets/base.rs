//! Widget behaviour trait

use std::any::Any;

use crate::events::HandlerResult;
use crate::foundation::math::Rect;
use crate::ui::context::{DrawCx, UpdateCx};
use crate::ui::tree::{Node, NodeId};

/// Upcast helper so trees can hand out typed widget references
pub trait AsAny: Any {
    /// `&dyn Any` view
    fn as_any(&self) -> &dyn Any;
    /// `&mut dyn Any` view
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to a [`Node`].
///
/// `bounds` is the node's rectangle resolved against the virtual canvas for
/// the current pass. Errors and panics are caught by the tree and logged with
/// the node's name.
pub trait Widget: AsAny {
    /// Interaction check, called while the node is visible and enabled
    fn update(&mut self, _id: NodeId, _bounds: Rect, _cx: &mut UpdateCx<'_>) -> HandlerResult {
        Ok(())
    }

    /// Paint the node; children are drawn by the tree afterwards
    fn draw(&self, node: &Node, bounds: Rect, cx: &mut DrawCx<'_>) -> HandlerResult {
        draw_background(node, bounds, cx);
        Ok(())
    }

    /// Called instead of [`update`](Widget::update) while the node or an
    /// ancestor is hidden or disabled. Transient interaction state resets here.
    fn on_suspended(&mut self) {}
}

/// Fill `bounds` with the node's background, faded by its alpha
pub fn draw_background(node: &Node, bounds: Rect, cx: &mut DrawCx<'_>) {
    if node.alpha > 0.0 && node.background.a > 0 {
        cx.fill(bounds, node.background.scale(node.alpha));
    }
}
