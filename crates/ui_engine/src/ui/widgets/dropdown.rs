//! Single-choice dropdown list
//!
//! The closed box shows the selected item and an arrow marker. While
//! expanded, the item list is painted through the overlay channel so it lands
//! above every menu drawn after the dropdown's own node.

use super::base::{draw_background, Widget};
use crate::events::{HandlerResult, Observers};
use crate::foundation::color::Color;
use crate::foundation::math::{Point2, Rect};
use crate::ui::context::{Commands, DrawCx, UpdateCx};
use crate::ui::tree::{Node, NodeId};

/// Items shown at once; the rest are unreachable until scrolling exists
pub const MAX_VISIBLE_ITEMS: usize = 5;

const TEXT_INSET: f32 = 5.0;

/// Payload for selection observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    /// Newly selected index
    pub index: usize,
    /// Newly selected item
    pub item: String,
}

/// Colors for the expanded list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownColors {
    /// List background
    pub list: Color,
    /// Item under the pointer
    pub hover: Color,
    /// Currently selected item
    pub selected: Color,
}

impl Default for DropdownColors {
    fn default() -> Self {
        Self {
            list: Color::rgba(60, 60, 60, 230),
            hover: Color::rgba(80, 80, 80, 230),
            selected: Color::rgba(100, 150, 100, 220),
        }
    }
}

/// Dropdown selector
pub struct Dropdown {
    name: String,
    items: Vec<String>,
    selected: Option<usize>,
    expanded: bool,
    hovered: bool,
    hovered_item: Option<usize>,
    font: String,
    font_size: f32,
    /// Item height relative to the closed box height
    pub item_height_ratio: f32,
    /// List colors
    pub colors: DropdownColors,
    on_change: Observers<SelectionChanged, Commands>,
}

impl Dropdown {
    /// Empty dropdown using the default font at semantic size 16
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            selected: None,
            expanded: false,
            hovered: false,
            hovered_item: None,
            font: String::new(),
            font_size: 16.0,
            item_height_ratio: 1.0,
            colors: DropdownColors::default(),
            on_change: Observers::new(),
        }
    }

    /// Append items
    #[must_use]
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add_item(item);
        }
        self
    }

    /// Set the font; an empty name means the default font
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>, semantic_size: f32) -> Self {
        self.set_font(font, semantic_size);
        self
    }

    /// Subscribe to selection changes made through input
    #[must_use]
    pub fn on_change(
        mut self,
        handler: impl FnMut(&SelectionChanged, &mut Commands) -> HandlerResult + 'static,
    ) -> Self {
        self.on_change.subscribe(handler);
        self
    }

    /// Set the font; an empty name means the default font
    pub fn set_font(&mut self, font: impl Into<String>, semantic_size: f32) {
        self.font = font.into();
        self.font_size = semantic_size;
    }

    /// Append an item; the first item added to an unselected dropdown is selected
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    /// Remove every item and the selection
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.selected = None;
        self.hovered_item = None;
        self.expanded = false;
    }

    /// All items
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selected index
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected item
    pub fn selected_item(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    /// Select without notifying observers; out-of-range indices clamp to the last item
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.selected = match (index, self.items.len()) {
            (_, 0) | (None, _) => None,
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }

    /// Whether the list is open
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Item under the pointer while expanded
    pub const fn hovered_item(&self) -> Option<usize> {
        self.hovered_item
    }

    /// Bounds of the expanded list below the box at `bounds`
    pub fn list_bounds(&self, bounds: Rect) -> Rect {
        let count = self.items.len().min(MAX_VISIBLE_ITEMS);
        let height = (count as f32 * self.item_height(bounds)) as i32;
        Rect::new(bounds.x, bounds.bottom() + 1, bounds.width, height)
    }

    /// Bounds of each visible item, top to bottom
    pub fn item_bounds(&self, bounds: Rect) -> Vec<Rect> {
        let list = self.list_bounds(bounds);
        let item_height = self.item_height(bounds);
        (0..self.items.len().min(MAX_VISIBLE_ITEMS))
            .map(|i| {
                let y = list.y as f32 + i as f32 * item_height;
                Rect::new(list.x, y as i32, list.width, item_height as i32)
            })
            .collect()
    }

    fn item_height(&self, bounds: Rect) -> f32 {
        bounds.height as f32 * self.item_height_ratio
    }

    fn select_from_input(&mut self, index: usize, commands: &mut Commands) {
        if self.selected == Some(index) {
            return;
        }
        self.selected = Some(index);
        let event = SelectionChanged {
            index,
            item: self.items[index].clone(),
        };
        self.on_change.notify(&self.name, &event, commands);
    }

    fn arrow_bounds(bounds: Rect) -> Rect {
        let size = (bounds.height as f32 * 0.8) as i32;
        Rect::new(
            bounds.right() - size - 2,
            bounds.y + (bounds.height - size) / 2,
            size,
            size,
        )
    }

    fn arrow_marker(arrow: Rect) -> Rect {
        let cx = arrow.x + arrow.width / 2;
        let cy = arrow.y + arrow.height / 2;
        Rect::new(cx - arrow.width / 4, cy - arrow.height / 8, arrow.width / 2, arrow.height / 4)
    }
}

impl Widget for Dropdown {
    fn update(&mut self, _id: NodeId, bounds: Rect, cx: &mut UpdateCx<'_>) -> HandlerResult {
        let mut click = cx.pointer.pressed;
        self.hovered = false;
        self.hovered_item = None;

        let Some(point) = cx.pointer.position else {
            if click && self.expanded {
                self.expanded = false;
            }
            return Ok(());
        };

        if bounds.contains(point) {
            self.hovered = true;
            if click {
                self.expanded = !self.expanded;
                click = false;
            }
        }

        if self.expanded {
            if self.list_bounds(bounds).contains(point) {
                let hit = self.item_bounds(bounds).iter().position(|r| r.contains(point));
                if let Some(index) = hit {
                    self.hovered_item = Some(index);
                    if click {
                        self.select_from_input(index, cx.commands);
                        self.expanded = false;
                    }
                }
            } else if click && !self.hovered {
                self.expanded = false;
            }
        }
        Ok(())
    }

    fn draw(&self, node: &Node, bounds: Rect, cx: &mut DrawCx<'_>) -> HandlerResult {
        draw_background(node, bounds, cx);

        let foreground = node.foreground.scale(node.alpha);
        if let Some(item) = self.selected_item() {
            let text_height = cx.measure_text(item, &self.font, self.font_size).y;
            let y = bounds.y as f32 + (bounds.height as f32 - text_height) / 2.0;
            let origin = Point2::new(bounds.x as f32 + TEXT_INSET, y);
            cx.draw_text(item, &self.font, self.font_size, foreground, origin);
        }
        cx.fill(Self::arrow_marker(Self::arrow_bounds(bounds)), foreground);

        if self.expanded && !self.items.is_empty() {
            let list = ExpandedList {
                bounds: self.list_bounds(bounds),
                items: self
                    .item_bounds(bounds)
                    .into_iter()
                    .zip(self.items.iter().cloned())
                    .collect(),
                hovered: self.hovered_item,
                selected: self.selected,
                font: self.font.clone(),
                font_size: self.font_size,
                colors: self.colors,
                foreground,
                alpha: node.alpha,
            };
            cx.overlays.register(move |cx| {
                list.draw(cx);
                Ok(())
            });
        }
        Ok(())
    }

    fn on_suspended(&mut self) {
        self.expanded = false;
        self.hovered = false;
        self.hovered_item = None;
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("name", &self.name)
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("expanded", &self.expanded)
            .finish_non_exhaustive()
    }
}

/// Snapshot of an expanded list, painted during the overlay flush
struct ExpandedList {
    bounds: Rect,
    items: Vec<(Rect, String)>,
    hovered: Option<usize>,
    selected: Option<usize>,
    font: String,
    font_size: f32,
    colors: DropdownColors,
    foreground: Color,
    alpha: f32,
}

impl ExpandedList {
    fn draw(&self, cx: &mut DrawCx<'_>) {
        cx.fill(self.bounds, self.colors.list.scale(self.alpha));

        for (index, (rect, text)) in self.items.iter().enumerate() {
            let highlight = if self.hovered == Some(index) {
                self.colors.hover
            } else if self.selected == Some(index) {
                self.colors.selected
            } else {
                Color::TRANSPARENT
            };
            cx.fill(*rect, highlight.scale(self.alpha));

            let text_height = cx.measure_text(text, &self.font, self.font_size).y;
            let y = rect.y as f32 + (rect.height as f32 - text_height) / 2.0;
            let origin = Point2::new(rect.x as f32 + TEXT_INSET, y);
            cx.draw_text(text, &self.font, self.font_size, self.foreground, origin);
        }
    }
}
