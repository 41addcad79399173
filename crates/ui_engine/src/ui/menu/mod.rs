//! Menus and the menu stack
//!
//! A menu is a full-canvas node tree plus screen-specific content. The
//! [`MenuStack`] decides which menus receive updates and which are drawn:
//! - An **exclusive** menu blocks everything below it
//! - An **overlay** menu stacks on top without blocking what is below

pub mod stack;

pub use stack::MenuStack;

use crate::events::{self, HandlerResult};
use crate::foundation::color::Color;
use crate::scene::LayerConstants;
use crate::ui::context::{DrawCx, UpdateCx};
use crate::ui::tree::{Node, NodeId, NodeTree, NormalizedRect};

/// How a menu interacts with menus below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// Covers the stack below; pushing or popping it toggles the previous top
    Exclusive,
    /// Transparent to the stack below
    Overlay,
}

/// Lifecycle position of a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    /// Never pushed
    #[default]
    Inactive,
    /// On the stack and enabled
    Active,
    /// On the stack but covered
    Deactivated,
    /// Popped
    Removed,
}

/// Screen-specific part of a menu
pub trait MenuContent {
    /// Build the menu's nodes under `root`; runs on first activation only
    fn initialize(&mut self, tree: &mut NodeTree, root: NodeId) -> HandlerResult;

    /// Per-frame logic after the menu's nodes were updated
    fn update_logic(&mut self, _tree: &mut NodeTree, _root: NodeId, _cx: &mut UpdateCx<'_>) -> HandlerResult {
        Ok(())
    }

    /// The menu became the active top (or was pushed)
    fn on_activate(&mut self, _tree: &mut NodeTree, _root: NodeId) {}

    /// The menu was covered or is being popped
    fn on_deactivate(&mut self, _tree: &mut NodeTree, _root: NodeId) {}

    /// The menu left the stack
    fn on_remove(&mut self, _tree: &mut NodeTree, _root: NodeId) {}
}

/// Content that only builds nodes, see [`Menu::from_fn`]
pub struct FnContent<F>(F);

impl<F> MenuContent for FnContent<F>
where
    F: FnMut(&mut NodeTree, NodeId) -> HandlerResult,
{
    fn initialize(&mut self, tree: &mut NodeTree, root: NodeId) -> HandlerResult {
        (self.0)(tree, root)
    }
}

/// One screen on the menu stack
pub struct Menu {
    id: String,
    kind: MenuKind,
    state: MenuState,
    initialized: bool,
    tree: NodeTree,
    root: NodeId,
    content: Box<dyn MenuContent>,
}

impl Menu {
    /// Create an inactive menu; content is initialized on first activation
    pub fn new(id: impl Into<String>, kind: MenuKind, content: impl MenuContent + 'static) -> Self {
        let id = id.into();
        let mut tree = NodeTree::new();
        let root = tree.add_root(
            Node::new(id.clone(), LayerConstants::MENU_BACKGROUND, NormalizedRect::FULL)
                .with_background(Color::TRANSPARENT),
        );
        Self {
            id,
            kind,
            state: MenuState::Inactive,
            initialized: false,
            tree,
            root,
            content: Box::new(content),
        }
    }

    /// Menu whose content is a node builder and nothing else
    pub fn from_fn(
        id: impl Into<String>,
        kind: MenuKind,
        build: impl FnMut(&mut NodeTree, NodeId) -> HandlerResult + 'static,
    ) -> Self {
        Self::new(id, kind, FnContent(build))
    }

    /// Identity used in logs
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Exclusive or overlay
    pub const fn kind(&self) -> MenuKind {
        self.kind
    }

    /// Lifecycle state
    pub const fn state(&self) -> MenuState {
        self.state
    }

    /// Whether the menu receives updates
    pub fn is_enabled(&self) -> bool {
        self.tree.get(self.root).is_some_and(|n| n.enabled)
    }

    /// Whether the menu is drawn
    pub fn is_visible(&self) -> bool {
        self.tree.get(self.root).is_some_and(|n| n.visible)
    }

    /// Enable or disable updates without running lifecycle hooks
    pub fn set_enabled(&mut self, enabled: bool) {
        if let Some(root) = self.tree.get_mut(self.root) {
            root.enabled = enabled;
        }
    }

    /// Show or hide without running lifecycle hooks
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(root) = self.tree.get_mut(self.root) {
            root.visible = visible;
        }
    }

    /// Root node of the menu's tree
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The menu's nodes
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// The menu's nodes, mutably
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Initialize on first call, then show and enable
    pub fn activate(&mut self) {
        if !self.initialized {
            self.initialized = true;
            let (tree, root, content) = (&mut self.tree, self.root, &mut self.content);
            if events::run_logged(&self.id, "initialize", || content.initialize(tree, root)) {
                log::debug!("[{}] initialized with {} nodes", self.id, self.tree.len());
            }
        }
        self.set_visible(true);
        self.set_enabled(true);
        self.state = MenuState::Active;
        self.content.on_activate(&mut self.tree, self.root);
    }

    /// Stop updates, keep drawing
    pub fn deactivate(&mut self) {
        self.set_enabled(false);
        self.tree.suspend(self.root);
        self.state = MenuState::Deactivated;
        self.content.on_deactivate(&mut self.tree, self.root);
    }

    /// Stop updates and drawing
    pub fn remove(&mut self) {
        self.set_visible(false);
        self.set_enabled(false);
        self.tree.suspend(self.root);
        self.state = MenuState::Removed;
        self.content.on_remove(&mut self.tree, self.root);
    }

    /// Update the menu's nodes, then its content logic
    pub fn update(&mut self, cx: &mut UpdateCx<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.tree.update(self.root, cx);

        let (tree, root, content) = (&mut self.tree, self.root, &mut self.content);
        events::run_logged(&self.id, "update_logic", || content.update_logic(tree, root, cx));
    }

    /// Draw the menu's nodes
    pub fn draw(&self, cx: &mut DrawCx<'_>, width: u32, height: u32) {
        if self.is_visible() {
            self.tree.draw(self.root, cx, width, height);
        }
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("nodes", &self.tree.len())
            .finish_non_exhaustive()
    }
}
