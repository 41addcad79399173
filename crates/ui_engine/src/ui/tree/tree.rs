//! Arena-backed node hierarchy

use slotmap::SlotMap;

use super::node::{Node, NodeId};
use crate::events::{self, HandlerResult};
use crate::foundation::math::Rect;
use crate::output::VirtualCanvas;
use crate::ui::context::{DrawCx, UpdateCx};
use crate::ui::widgets::{self, Widget};

/// Structural errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// The handle does not refer to a live node
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Prospective parent
        parent: NodeId,
        /// Node being attached
        child: NodeId,
    },
}

/// Owns every node of one hierarchy.
///
/// Children are held by handle in insertion order; the parent back-reference
/// is a lookup aid only. A node belongs to at most one parent: attaching it
/// elsewhere detaches it first.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
}

impl NodeTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node
    pub fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Insert a node and record it as a root
    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = self.insert(node);
        self.roots.push(id);
        id
    }

    /// Root nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Insert `node` and attach it as the last child of `parent`
    pub fn spawn(&mut self, parent: NodeId, node: Node) -> Result<NodeId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::MissingNode(parent));
        }
        let id = self.insert(node);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::MissingNode(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::MissingNode(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::WouldCreateCycle { parent, child });
        }

        self.detach(child);
        self.roots.retain(|&root| root != child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// The child stays alive in the arena with no parent. Returns `false`
    /// when `child` was not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let before = node.children.len();
        node.children.retain(|&c| c != child);
        if node.children.len() == before {
            return false;
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
        true
    }

    /// Remove `id` and its whole subtree, parents before children
    pub fn destroy(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        self.roots.retain(|&root| root != id);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children.into_iter().rev());
            }
        }
    }

    /// First node with `name`, depth-first from the roots, then any detached node
    pub fn find(&self, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// Pixel rectangle of `id` in canvas space, resolved through its ancestors
    pub fn resolve_rect(&self, id: NodeId, canvas: VirtualCanvas) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let parent = match node.parent {
            Some(parent) => self.resolve_rect(parent, canvas)?,
            None => canvas.rect(),
        };
        Some(node.rect.to_rect(parent))
    }

    /// Attach or replace the behaviour of `id`
    pub fn set_widget(&mut self, id: NodeId, widget: impl Widget + 'static) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::MissingNode(id))?;
        node.widget = Some(Box::new(widget));
        Ok(())
    }

    /// Typed view of the behaviour attached to `id`
    pub fn widget<T: Widget>(&self, id: NodeId) -> Option<&T> {
        self.nodes
            .get(id)?
            .widget
            .as_deref()
            .and_then(|w| w.as_any().downcast_ref::<T>())
    }

    /// Typed mutable view of the behaviour attached to `id`
    pub fn widget_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes
            .get_mut(id)?
            .widget
            .as_deref_mut()
            .and_then(|w| w.as_any_mut().downcast_mut::<T>())
    }

    /// Run the interaction pass for `id` and its subtree.
    ///
    /// Hidden or disabled nodes are not updated; their widgets (and those of
    /// their descendants) get [`Widget::on_suspended`] instead.
    pub fn update(&mut self, id: NodeId, cx: &mut UpdateCx<'_>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible || !node.enabled {
            self.suspend(id);
            return;
        }

        let bounds = self.resolve_rect(id, cx.canvas).unwrap_or_default();
        let children = node.children.clone();

        if let Some(node) = self.nodes.get_mut(id) {
            let name = &node.name;
            if let Some(widget) = node.widget.as_deref_mut() {
                let result = events::isolate(|| widget.update(id, bounds, cx));
                if let Err(err) = result {
                    log::error!("[{name}] update failed: {err}");
                }
            }
        }

        for child in children {
            // A handler may have detached the child this frame
            if self.nodes.get(child).is_some_and(|c| c.parent == Some(id)) {
                self.update(child, cx);
            }
        }
    }

    /// Reset transient widget state for `id` and its subtree
    pub fn suspend(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next) {
                if let Some(widget) = node.widget.as_deref_mut() {
                    widget.on_suspended();
                }
                pending.extend(node.children.iter().copied());
            }
        }
    }

    /// Draw `id` and its subtree onto a target of `width` x `height` pixels.
    ///
    /// The target is expected to be the virtual canvas; a mismatch is logged
    /// and drawing continues.
    pub fn draw(&self, id: NodeId, cx: &mut DrawCx<'_>, width: u32, height: u32) {
        if width != cx.canvas.width || height != cx.canvas.height {
            log::warn!(
                "Drawing UI onto {width}x{height}, expected the {}x{} canvas",
                cx.canvas.width,
                cx.canvas.height
            );
        }
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let parent = match node.parent {
            Some(parent) => self.resolve_rect(parent, cx.canvas).unwrap_or_default(),
            None => cx.canvas.rect(),
        };
        self.draw_node(id, parent, cx);
    }

    fn draw_node(&self, id: NodeId, parent: Rect, cx: &mut DrawCx<'_>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }

        let bounds = node.rect.to_rect(parent);
        let result: HandlerResult = match node.widget.as_deref() {
            Some(widget) => events::isolate(|| widget.draw(node, bounds, cx)),
            None => {
                widgets::draw_background(node, bounds, cx);
                Ok(())
            }
        };
        if let Err(err) = result {
            log::error!("[{}] draw failed: {err}", node.name);
        }

        for &child in &node.children {
            self.draw_node(child, bounds, cx);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return;
        };
        self.remove_child(parent, child);
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tree::NormalizedRect;
    use crate::ui::widgets::Panel;

    fn node(name: &str) -> Node {
        Node::new(name, 0, NormalizedRect::FULL)
    }

    #[test]
    fn test_add_child_sets_parent() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(node("root"));
        let child = tree.insert(node("child"));

        tree.add_child(root, child).expect("attach");
        assert_eq!(tree.get(child).and_then(Node::parent), Some(root));
        assert_eq!(tree.get(root).map(Node::children), Some(&[child][..]));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = NodeTree::new();
        let a = tree.add_root(node("a"));
        let b = tree.spawn(a, node("b")).expect("spawn");

        assert_eq!(
            tree.add_child(b, a),
            Err(TreeError::WouldCreateCycle { parent: b, child: a })
        );
        assert!(matches!(tree.add_child(a, a), Err(TreeError::WouldCreateCycle { .. })));
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(node("root"));
        let mid = tree.spawn(root, node("mid")).expect("spawn");
        let leaf = tree.spawn(mid, node("leaf")).expect("spawn");

        tree.destroy(mid);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.get(root).is_some_and(|n| n.children().is_empty()));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_resolve_rect_is_recursive() {
        let mut tree = NodeTree::new();
        let canvas = VirtualCanvas::default();
        let root = tree.add_root(Node::new("root", 0, NormalizedRect::new(0.5, 0.5, 0.5, 0.5)));
        let child = tree
            .spawn(root, Node::new("child", 0, NormalizedRect::new(0.5, 0.0, 0.5, 0.5)))
            .expect("spawn");

        assert_eq!(tree.resolve_rect(root, canvas), Some(Rect::new(1280, 720, 1280, 720)));
        assert_eq!(tree.resolve_rect(child, canvas), Some(Rect::new(1920, 720, 640, 360)));
    }

    #[test]
    fn test_find_and_typed_widget_access() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(node("root"));
        let panel = tree.spawn(root, node("panel").with_widget(Panel)).expect("spawn");

        assert_eq!(tree.find("panel"), Some(panel));
        assert_eq!(tree.find("missing"), None);
        assert!(tree.widget::<Panel>(panel).is_some());
        assert!(tree.widget::<Panel>(root).is_none());
    }
}
