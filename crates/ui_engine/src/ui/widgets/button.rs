//! Clickable button

use super::base::Widget;
use crate::events::{HandlerResult, Observers};
use crate::foundation::color::Color;
use crate::foundation::math::Rect;
use crate::ui::context::{Commands, CursorShape, DrawCx, UpdateCx};
use crate::ui::tree::{Node, NodeId};

/// Background used by [`create_button`](super::create_button) for the normal state
pub const DEFAULT_BACKGROUND: Color = Color::rgba(50, 50, 50, 200);

/// Visual interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Idle
    #[default]
    Normal,
    /// Pointer over the button
    Hover,
    /// Pointer over the button with the primary button held
    Pressed,
}

/// Colors for the hover and pressed states; the normal state uses the
/// node's background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    /// Fill while hovered
    pub hover: Color,
    /// Fill while pressed
    pub pressed: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            hover: Color::rgba(100, 100, 100, 200),
            pressed: Color::rgba(80, 80, 80, 200),
        }
    }
}

/// Rectangle that fires click observers when pressed and released over it.
///
/// A click is reported on the release that follows a press while the
/// pointer stayed over the button. Moving off the button while held cancels
/// the press.
pub struct Button {
    name: String,
    /// State colors
    pub colors: ButtonColors,
    interactive: bool,
    state: ButtonState,
    hovered: bool,
    pressed: bool,
    on_click: Observers<(), Commands>,
}

impl Button {
    /// Create an interactive button; `name` identifies it in logs
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: ButtonColors::default(),
            interactive: true,
            state: ButtonState::Normal,
            hovered: false,
            pressed: false,
            on_click: Observers::new(),
        }
    }

    /// Replace the state colors
    #[must_use]
    pub fn with_colors(mut self, colors: ButtonColors) -> Self {
        self.colors = colors;
        self
    }

    /// Subscribe to clicks
    #[must_use]
    pub fn on_click(mut self, handler: impl FnMut(&(), &mut Commands) -> HandlerResult + 'static) -> Self {
        self.on_click.subscribe(handler);
        self
    }

    /// Subscribe to clicks on an existing button
    pub fn subscribe(&mut self, handler: impl FnMut(&(), &mut Commands) -> HandlerResult + 'static) {
        self.on_click.subscribe(handler);
    }

    /// Current interaction state
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Whether the pointer is over the button
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the button reacts to input
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Enable or disable input; a disabled button draws dimmed
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        if !interactive {
            self.reset();
        }
    }

    /// Fire click observers as if the button had been clicked.
    ///
    /// Returns how many observers failed.
    pub fn click(&mut self, commands: &mut Commands) -> usize {
        if !self.interactive {
            return 0;
        }
        self.on_click.notify(&self.name, &(), commands)
    }

    fn reset(&mut self) {
        self.state = ButtonState::Normal;
        self.hovered = false;
        self.pressed = false;
    }

    fn fill_color(&self, node: &Node) -> Color {
        let base = if !self.interactive {
            node.background.scale(0.5)
        } else {
            match self.state {
                ButtonState::Normal => node.background,
                ButtonState::Hover => self.colors.hover,
                ButtonState::Pressed => self.colors.pressed,
            }
        };
        base.scale(node.alpha)
    }
}

impl Widget for Button {
    fn update(&mut self, _id: NodeId, bounds: Rect, cx: &mut UpdateCx<'_>) -> HandlerResult {
        if !self.interactive {
            self.reset();
            return Ok(());
        }

        let was_hovered = self.hovered;
        self.hovered = cx.pointer.position.is_some_and(|p| bounds.contains(p));

        if self.hovered {
            cx.commands.set_cursor(CursorShape::Hand);
            if !was_hovered {
                log::trace!("[{}] hover enter", self.name);
            }
        } else if was_hovered {
            log::trace!("[{}] hover exit", self.name);
        }

        if !self.hovered {
            self.state = ButtonState::Normal;
            self.pressed = false;
            return Ok(());
        }

        if cx.pointer.down {
            self.state = ButtonState::Pressed;
            self.pressed = true;
        } else {
            if self.pressed {
                self.click(cx.commands);
            }
            self.state = ButtonState::Hover;
            self.pressed = false;
        }
        Ok(())
    }

    fn draw(&self, node: &Node, bounds: Rect, cx: &mut DrawCx<'_>) -> HandlerResult {
        if node.alpha > 0.0 {
            cx.fill(bounds, self.fill_color(node));
        }
        Ok(())
    }

    fn on_suspended(&mut self) {
        self.reset();
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("name", &self.name)
            .field("interactive", &self.interactive)
            .field("state", &self.state)
            .field("on_click", &self.on_click)
            .finish_non_exhaustive()
    }
}
