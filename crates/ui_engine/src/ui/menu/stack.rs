//! Menu stack controller

use super::{Menu, MenuKind};
use crate::ui::context::{DrawCx, UpdateCx};

/// Ordered stack of menus; the last element is the top
#[derive(Debug, Default)]
pub struct MenuStack {
    menus: Vec<Menu>,
}

impl MenuStack {
    /// Empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push and activate `menu`.
    ///
    /// The previous top is deactivated when either it or `menu` is exclusive.
    pub fn push(&mut self, mut menu: Menu) {
        if let Some(top) = self.menus.last_mut() {
            if menu.kind() == MenuKind::Exclusive || top.kind() == MenuKind::Exclusive {
                top.deactivate();
            }
        }
        log::info!("[MenuStack] Push '{}' ({:?})", menu.id(), menu.kind());
        menu.set_enabled(true);
        menu.activate();
        self.menus.push(menu);
    }

    /// Remove the top menu, reactivating the new top if it was covered
    pub fn pop(&mut self) -> Option<Menu> {
        let mut menu = self.menus.pop()?;
        log::info!("[MenuStack] Pop '{}'", menu.id());
        menu.deactivate();
        menu.remove();

        if let Some(top) = self.menus.last_mut() {
            if !top.is_enabled() {
                top.activate();
            }
        }
        Some(menu)
    }

    /// Pop the top (if any), then push `menu`
    pub fn replace(&mut self, menu: Menu) -> Option<Menu> {
        let previous = self.pop();
        self.push(menu);
        previous
    }

    /// Pop every menu, top first
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// The top menu
    pub fn active(&self) -> Option<&Menu> {
        self.menus.last()
    }

    /// The top menu, mutably
    pub fn active_mut(&mut self) -> Option<&mut Menu> {
        self.menus.last_mut()
    }

    /// Menus bottom to top
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Menus bottom to top, mutably
    pub fn menus_mut(&mut self) -> &mut [Menu] {
        &mut self.menus
    }

    /// Menu with `id`, searching from the top
    pub fn find(&self, id: &str) -> Option<&Menu> {
        self.menus.iter().rev().find(|m| m.id() == id)
    }

    /// Menu with `id`, searching from the top, mutably
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Menu> {
        self.menus.iter_mut().rev().find(|m| m.id() == id)
    }

    /// Number of menus
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// True when no menu is on the stack
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Update menus top-down.
    ///
    /// Every enabled menu is updated until an enabled exclusive menu has been
    /// seen; after that the scan stops at the first menu that is not an
    /// overlay. The exclusive menu is itself such a menu, so the scan ends on
    /// it: overlays above it update, everything below it does not.
    pub fn update(&mut self, cx: &mut UpdateCx<'_>) {
        let mut exclusive_found = false;
        for menu in self.menus.iter_mut().rev() {
            if menu.is_enabled() {
                menu.update(cx);
            }
            if menu.is_enabled() && menu.kind() == MenuKind::Exclusive {
                exclusive_found = true;
            }
            if exclusive_found && menu.kind() != MenuKind::Overlay {
                break;
            }
        }
    }

    /// Index drawing starts from: the topmost enabled exclusive menu, else the bottom
    pub fn draw_start(&self) -> usize {
        self.menus
            .iter()
            .rposition(|m| m.is_enabled() && m.kind() == MenuKind::Exclusive)
            .unwrap_or(0)
    }

    /// Draw visible menus from [`draw_start`](Self::draw_start) upward
    pub fn draw(&self, cx: &mut DrawCx<'_>, width: u32, height: u32) {
        for menu in &self.menus[self.draw_start()..] {
            if menu.is_visible() {
                menu.draw(cx, width, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::HandlerResult;
    use crate::output::VirtualCanvas;
    use crate::ui::context::Commands;
    use crate::ui::input::PointerFrame;
    use crate::ui::menu::{MenuContent, MenuState};
    use crate::ui::tree::{NodeId, NodeTree};
    use std::cell::Cell;
    use std::rc::Rc;

    fn menu(id: &str, kind: MenuKind) -> Menu {
        Menu::from_fn(id, kind, |_, _| Ok(()))
    }

    struct CountUpdates(Rc<Cell<u32>>);

    impl MenuContent for CountUpdates {
        fn initialize(&mut self, _tree: &mut NodeTree, _root: NodeId) -> HandlerResult {
            Ok(())
        }

        fn update_logic(&mut self, _tree: &mut NodeTree, _root: NodeId, _cx: &mut UpdateCx<'_>) -> HandlerResult {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    fn run_update(stack: &mut MenuStack) {
        let pointer = PointerFrame::default();
        let mut commands = Commands::new();
        let mut cx = UpdateCx {
            pointer: &pointer,
            canvas: VirtualCanvas::default(),
            commands: &mut commands,
            dt: 0.016,
        };
        stack.update(&mut cx);
    }

    /// Push `kinds` bottom to top, force-enable all, update once and return
    /// each menu's update count in stack order
    fn update_counts(kinds: &[MenuKind]) -> Vec<u32> {
        let mut stack = MenuStack::new();
        let counters: Vec<Rc<Cell<u32>>> = kinds.iter().map(|_| Rc::new(Cell::new(0))).collect();
        for (i, (&kind, counter)) in kinds.iter().zip(&counters).enumerate() {
            stack.push(Menu::new(format!("m{i}"), kind, CountUpdates(Rc::clone(counter))));
        }
        for m in stack.menus_mut() {
            m.set_enabled(true);
        }

        run_update(&mut stack);
        counters.iter().map(|c| c.get()).collect()
    }

    #[test]
    fn test_overlay_on_overlay_keeps_both_enabled() {
        let mut stack = MenuStack::new();
        stack.push(menu("hud", MenuKind::Overlay));
        stack.push(menu("toast", MenuKind::Overlay));

        assert!(stack.menus().iter().all(Menu::is_enabled));
        assert_eq!(stack.active().map(Menu::id), Some("toast"));
    }

    #[test]
    fn test_overlay_on_exclusive_covers_it() {
        let mut stack = MenuStack::new();
        stack.push(menu("main", MenuKind::Exclusive));
        stack.push(menu("tip", MenuKind::Overlay));

        assert_eq!(stack.menus()[0].state(), MenuState::Deactivated);
        assert!(stack.menus()[0].is_visible());
    }

    #[test]
    fn test_pop_empty_and_replace() {
        let mut stack = MenuStack::new();
        assert!(stack.pop().is_none());

        stack.push(menu("main", MenuKind::Exclusive));
        let old = stack.replace(menu("settings", MenuKind::Exclusive)).expect("replaced");
        assert_eq!(old.state(), MenuState::Removed);
        assert!(!old.is_visible());
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.active().map(Menu::id), Some("settings"));
        assert!(stack.active().is_some_and(Menu::is_enabled));

        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_draw_start() {
        let mut stack = MenuStack::new();
        assert_eq!(stack.draw_start(), 0);

        stack.push(menu("a", MenuKind::Overlay));
        stack.push(menu("b", MenuKind::Exclusive));
        stack.push(menu("c", MenuKind::Overlay));
        for m in stack.menus_mut() {
            m.set_enabled(true);
        }
        assert_eq!(stack.draw_start(), 1);
    }

    #[test]
    fn test_update_scan_ends_at_exclusive() {
        use MenuKind::{Exclusive, Overlay};

        assert_eq!(update_counts(&[Exclusive, Overlay, Exclusive]), [0, 0, 1]);
        assert_eq!(update_counts(&[Overlay, Overlay, Exclusive]), [0, 0, 1]);
    }

    #[test]
    fn test_update_scan_passes_overlays_above_exclusive() {
        use MenuKind::{Exclusive, Overlay};

        assert_eq!(update_counts(&[Exclusive, Exclusive, Overlay, Overlay]), [0, 1, 1, 1]);
        assert_eq!(update_counts(&[Overlay, Overlay]), [1, 1]);
    }

    #[test]
    fn test_update_scan_skips_disabled_exclusive() {
        use MenuKind::{Exclusive, Overlay};

        let mut stack = MenuStack::new();
        let counters: Vec<Rc<Cell<u32>>> = (0..3).map(|_| Rc::new(Cell::new(0))).collect();
        for (i, kind) in [Overlay, Exclusive, Overlay].into_iter().enumerate() {
            stack.push(Menu::new(format!("m{i}"), kind, CountUpdates(Rc::clone(&counters[i]))));
        }
        stack.menus_mut()[0].set_enabled(true);
        stack.menus_mut()[1].set_enabled(false);

        run_update(&mut stack);
        let counts: Vec<u32> = counters.iter().map(|c| c.get()).collect();
        assert_eq!(counts, [1, 0, 1]);
    }
}
