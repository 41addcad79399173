//! Interactive elements
//!
//! Widgets are behaviour attached to tree nodes. Layout and colors stay on
//! the [`Node`](crate::ui::tree::Node); a widget adds hit testing and
//! custom painting on top.

pub mod base;
pub mod panel;
pub mod button;
pub mod dropdown;
pub mod text;
pub mod helpers;

pub use base::{draw_background, AsAny, Widget};
pub use button::{Button, ButtonColors, ButtonState};
pub use dropdown::{Dropdown, DropdownColors, SelectionChanged};
pub use helpers::{button_text, create_button, set_button_text, ButtonSpec};
pub use panel::Panel;
pub use text::{TextAlignment, TextLabel};
