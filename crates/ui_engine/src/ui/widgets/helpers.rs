//! Composite widget construction

use super::button::{Button, ButtonColors, DEFAULT_BACKGROUND};
use super::text::{TextAlignment, TextLabel};
use crate::events::HandlerResult;
use crate::foundation::color::Color;
use crate::ui::context::Commands;
use crate::ui::tree::{Node, NodeId, NodeTree, NormalizedRect, TreeError};

/// Parameters for [`create_button`]
#[derive(Debug, Clone)]
pub struct ButtonSpec {
    /// Node name; the label child is named `{name}_Text`
    pub name: String,
    /// Layer ordinal
    pub layer: i32,
    /// Layout relative to the parent
    pub rect: NormalizedRect,
    /// Caption
    pub text: String,
    /// Caption semantic size
    pub text_size: f32,
    /// Caption font; empty selects the default
    pub font: String,
    /// Normal-state fill
    pub background: Color,
    /// Hover and pressed fills
    pub colors: ButtonColors,
}

impl ButtonSpec {
    /// Button with default colors and a 24pt caption
    pub fn new(name: impl Into<String>, layer: i32, rect: NormalizedRect, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layer,
            rect,
            text: text.into(),
            text_size: 24.0,
            font: String::new(),
            background: DEFAULT_BACKGROUND,
            colors: ButtonColors::default(),
        }
    }

    /// Override the caption font
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>, size: f32) -> Self {
        self.font = font.into();
        self.text_size = size;
        self
    }

    /// Override the fills
    #[must_use]
    pub fn with_colors(mut self, background: Color, colors: ButtonColors) -> Self {
        self.background = background;
        self.colors = colors;
        self
    }
}

fn label_name(name: &str) -> String {
    format!("{name}_Text")
}

/// Create a button under `parent` with a centered caption child
pub fn create_button(
    tree: &mut NodeTree,
    parent: NodeId,
    spec: ButtonSpec,
    on_click: impl FnMut(&(), &mut Commands) -> HandlerResult + 'static,
) -> Result<NodeId, TreeError> {
    let button = Button::new(spec.name.clone())
        .with_colors(spec.colors)
        .on_click(on_click);
    let node = Node::new(spec.name.clone(), spec.layer, spec.rect)
        .with_background(spec.background)
        .with_widget(button);
    let id = tree.spawn(parent, node)?;

    let label = TextLabel::new(spec.text)
        .with_font(spec.font, spec.text_size)
        .with_alignment(TextAlignment::Center);
    let label_node = Node::new(label_name(&spec.name), spec.layer + 1, NormalizedRect::FULL)
        .with_widget(label);
    tree.spawn(id, label_node)?;
    Ok(id)
}

fn caption(tree: &NodeTree, button: NodeId) -> Option<NodeId> {
    let node = tree.get(button)?;
    let wanted = label_name(&node.name);
    node.children()
        .iter()
        .copied()
        .find(|&child| tree.get(child).is_some_and(|c| c.name == wanted))
}

/// Caption of a button made by [`create_button`]
pub fn button_text(tree: &NodeTree, button: NodeId) -> Option<&str> {
    let label = caption(tree, button)?;
    tree.widget::<TextLabel>(label).map(|l| l.text.as_str())
}

/// Replace the caption of a button made by [`create_button`].
///
/// Returns `false` when the node has no caption child.
pub fn set_button_text(tree: &mut NodeTree, button: NodeId, text: impl Into<String>) -> bool {
    let Some(label) = caption(tree, button) else {
        return false;
    };
    match tree.widget_mut::<TextLabel>(label) {
        Some(widget) => {
            widget.text = text.into();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::Button;

    #[test]
    fn test_create_button_with_caption() {
        let mut tree = NodeTree::new();
        let root = tree.add_root(Node::new("root", 0, NormalizedRect::FULL));
        let spec = ButtonSpec::new("StartButton", 10, NormalizedRect::centered(0.2, 0.1), "Start");

        let id = create_button(&mut tree, root, spec, |_, _| Ok(())).expect("create");

        assert!(tree.widget::<Button>(id).is_some());
        assert_eq!(tree.find("StartButton_Text").and_then(|l| tree.get(l)).map(|n| n.layer), Some(11));
        assert_eq!(button_text(&tree, id), Some("Start"));

        assert!(set_button_text(&mut tree, id, "Resume"));
        assert_eq!(button_text(&tree, id), Some("Resume"));
        assert!(!set_button_text(&mut tree, root, "nope"));
    }
}
