//! Node data

use super::rect::NormalizedRect;
use crate::foundation::color::Color;
use crate::ui::widgets::Widget;

slotmap::new_key_type! {
    /// Handle to a node inside a [`NodeTree`](super::NodeTree)
    pub struct NodeId;
}

/// One element of the retained UI hierarchy
pub struct Node {
    /// Identity used in logs and name lookups
    pub name: String,
    /// Layer ordinal, informational inside a container
    pub layer: i32,
    /// Layout relative to the parent
    pub rect: NormalizedRect,
    /// Hidden nodes and their subtrees are neither drawn nor updated
    pub visible: bool,
    /// Disabled nodes and their subtrees are drawn but not updated
    pub enabled: bool,
    /// Opacity multiplier in `0.0..=1.0`
    pub alpha: f32,
    /// Background fill
    pub background: Color,
    /// Foreground (text, glyph) color
    pub foreground: Color,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) widget: Option<Box<dyn Widget>>,
}

impl Node {
    /// Plain visible, enabled container
    pub fn new(name: impl Into<String>, layer: i32, rect: NormalizedRect) -> Self {
        Self {
            name: name.into(),
            layer,
            rect,
            visible: true,
            enabled: true,
            alpha: 1.0,
            background: Color::TRANSPARENT,
            foreground: Color::WHITE,
            children: Vec::new(),
            parent: None,
            widget: None,
        }
    }

    /// Set the background color
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the foreground color
    #[must_use]
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    /// Set the opacity
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Attach behaviour
    #[must_use]
    pub fn with_widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widget = Some(Box::new(widget));
        self
    }

    /// Start hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Children in insertion (draw) order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent back-reference
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether behaviour is attached
    pub const fn has_widget(&self) -> bool {
        self.widget.is_some()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("layer", &self.layer)
            .field("rect", &self.rect)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("children", &self.children.len())
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
