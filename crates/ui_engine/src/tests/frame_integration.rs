//! Frame-level tests: pointer mapping, overlays, widgets talking to the stack

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::foundation::color::Color;
use crate::foundation::math::Rect;
use crate::output::{DisplayInfo, OutputSurface, SurfaceRequest, VirtualCanvas};
use crate::scene::{LayerConstants, TreeObject};
use crate::text::{FontLibrary, FontdueRenderer};
use crate::ui::context::{CursorShape, DisplayChange};
use crate::ui::rendering::CommandList;
use crate::ui::tree::{Node, NodeTree, NormalizedRect};
use crate::ui::widgets::{self, ButtonSpec, Dropdown};
use crate::ui::{Menu, MenuKind, UiManager};

fn manager(surface: OutputSurface) -> UiManager {
    UiManager::with_renderer(
        VirtualCanvas::new(2560, 1440, 720),
        surface,
        DisplayInfo {
            is_macos: false,
            native_height: 1080,
        },
        FontdueRenderer::new(FontLibrary::system_only()),
    )
}

fn click_at(ui: &mut UiManager, x: f32, y: f32) {
    ui.input_mut().set_pointer(x, y);
    ui.input_mut().set_button(true);
    ui.update(0.016);
    ui.input_mut().set_button(false);
    ui.update(0.016);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pointer_mapped_through_pillarbox() {
        let mut ui = manager(OutputSurface::windowed(1920, 1000));
        assert_eq!(ui.destination_rect(), Rect::new(71, 0, 1778, 1000));

        ui.input_mut().set_pointer(71.0, 0.0);
        ui.update(0.016);
        let p = ui.pointer().position.expect("inside the canvas");
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-3);

        ui.input_mut().set_pointer(70.0, 500.0);
        ui.update(0.016);
        assert!(ui.pointer().position.is_none());
    }

    #[test]
    fn test_resize_takes_effect_next_update() {
        let mut ui = manager(OutputSurface::windowed(2560, 1440));
        ui.input_mut().set_pointer(0.0, 100.0);
        ui.update(0.016);
        assert!(ui.pointer().position.is_some());

        ui.set_surface(OutputSurface::windowed(3440, 1440));
        ui.update(0.016);
        assert!(ui.pointer().position.is_none());
    }

    #[test]
    fn test_overlay_flushed_once_and_reregistration_deferred() {
        let mut ui = manager(OutputSurface::windowed(2560, 1440));
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let (f, s) = (Arc::clone(&first), Arc::clone(&second));
        ui.overlays().register(move |cx| {
            f.fetch_add(1, Ordering::SeqCst);
            cx.overlays.register(move |_| {
                s.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            Ok(())
        });

        let mut batch = CommandList::new();
        ui.draw(&mut batch);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
        assert_eq!(ui.overlays().len(), 1);

        ui.draw(&mut batch);
        ui.draw(&mut batch);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert!(ui.overlays().is_empty());
    }

    #[test]
    fn test_failing_overlay_does_not_stop_others() {
        let mut ui = manager(OutputSurface::windowed(2560, 1440));
        ui.overlays().register(|_| Err("broken overlay".into()));
        ui.overlays().register(|cx| {
            cx.fill(Rect::new(0, 0, 10, 10), Color::WHITE);
            Ok(())
        });

        let mut batch = CommandList::new();
        ui.draw(&mut batch);
        assert_eq!(batch.fills().collect::<Vec<_>>(), [(Rect::new(0, 0, 10, 10), Color::WHITE)]);
    }

    #[test]
    fn test_button_click_pushes_menu_after_update() {
        let mut ui = manager(OutputSurface::windowed(2560, 1440));
        ui.push_menu(Menu::from_fn("Main", MenuKind::Exclusive, |tree, root| {
            let spec = ButtonSpec::new(
                "Start",
                LayerConstants::MENU_ELEMENTS,
                NormalizedRect::new(0.4, 0.4, 0.2, 0.1),
                "Start",
            );
            widgets::create_button(tree, root, spec, |_, commands| {
                commands.push_menu(Menu::from_fn("Settings", MenuKind::Exclusive, |_, _| Ok(())));
                Ok(())
            })?;
            Ok(())
        }));

        ui.input_mut().set_pointer(1280.0, 640.0);
        ui.update(0.016);
        assert_eq!(ui.take_cursor_change(), Some(CursorShape::Hand));

        click_at(&mut ui, 1280.0, 640.0);
        assert_eq!(ui.menus().len(), 2);
        assert_eq!(ui.menus().active().map(Menu::id), Some("Settings"));
        assert!(!ui.menus().menus()[0].is_enabled());

        ui.update(0.016);
        assert_eq!(ui.take_cursor_change(), Some(CursorShape::Arrow));
        assert_eq!(ui.take_cursor_change(), None);
    }

    #[test]
    fn test_expanded_dropdown_draws_list_last() {
        let mut ui = manager(OutputSurface::windowed(2560, 1440));
        ui.push_menu(Menu::from_fn("Settings", MenuKind::Exclusive, |tree, root| {
            let dropdown = Dropdown::new("Sampler").with_items(["Point", "Linear"]);
            tree.spawn(
                root,
                Node::new("Sampler", LayerConstants::MENU_ELEMENTS, NormalizedRect::new(0.25, 0.25, 0.25, 0.05))
                    .with_background(Color::rgb(40, 40, 40))
                    .with_widget(dropdown),
            )?;
            tree.spawn(
                root,
                Node::new("Footer", LayerConstants::MENU_ELEMENTS, NormalizedRect::new(0.25, 0.31, 0.25, 0.05))
                    .with_background(Color::rgb(10, 20, 30)),
            )?;
            Ok(())
        }));
        ui.update(0.016);

        click_at(&mut ui, 700.0, 380.0);
        let mut batch = CommandList::new();
        ui.draw(&mut batch);

        let fills: Vec<_> = batch.fills().collect();
        let footer = fills
            .iter()
            .position(|(_, c)| *c == Color::rgb(10, 20, 30))
            .expect("footer drawn");
        let list = fills
            .iter()
            .position(|(_, c)| *c == Color::rgba(60, 60, 60, 230))
            .expect("list drawn");
        assert!(list > footer);
        assert!(ui.overlays().is_empty());
    }

    #[test]
    fn test_scene_paints_beneath_menus() {
        let mut ui = manager(OutputSurface::windowed(2560, 1440));
        let mut tree = NodeTree::new();
        let root = tree.add_root(
            Node::new("Backdrop", LayerConstants::BACKGROUND, NormalizedRect::FULL)
                .with_background(Color::rgb(0, 0, 255)),
        );
        ui.scene_mut().add(TreeObject::new("backdrop", LayerConstants::BACKGROUND, tree, root));
        ui.push_menu(Menu::from_fn("Hud", MenuKind::Overlay, |tree, root| {
            tree.spawn(
                root,
                Node::new("Bar", LayerConstants::UI_ELEMENTS, NormalizedRect::new(0.0, 0.0, 1.0, 0.1))
                    .with_background(Color::rgb(255, 0, 0)),
            )?;
            Ok(())
        }));

        let frame = ui.render_frame();
        assert_eq!(frame.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(10, 1000), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_display_and_exit_commands_reach_host() {
        let mut ui = manager(OutputSurface::windowed(1920, 1080));
        ui.set_display_size(2560, 1440);
        ui.push_menu(Menu::from_fn("Main", MenuKind::Exclusive, |tree, root| {
            let spec = ButtonSpec::new(
                "Fullscreen",
                LayerConstants::MENU_ELEMENTS,
                NormalizedRect::new(0.0, 0.0, 0.5, 0.5),
                "Fullscreen",
            );
            widgets::create_button(tree, root, spec, |_, commands| {
                commands.display(DisplayChange::Fullscreen);
                commands.configure(|render| render.set_antialias(false));
                commands.request_exit();
                Ok(())
            })?;
            Ok(())
        }));

        click_at(&mut ui, 100.0, 100.0);
        assert_eq!(
            ui.take_surface_request(),
            Some(SurfaceRequest {
                width: 2560,
                height: 1440,
                fullscreen: true,
            })
        );
        assert!(ui.take_surface_request().is_none());
        assert!(!ui.render_config().antialias());
        assert!(ui.exit_requested());
    }

    #[test]
    fn test_present_frame_letterboxes_canvas() {
        let mut ui = manager(OutputSurface::windowed(256, 256));
        ui.push_menu(Menu::from_fn("Fill", MenuKind::Overlay, |tree, root| {
            tree.spawn(
                root,
                Node::new("White", LayerConstants::UI_BACKGROUND, NormalizedRect::FULL)
                    .with_background(Color::WHITE),
            )?;
            Ok(())
        }));

        let frame = ui.present_frame();
        // 2560x1440 lands on rows 56..200
        assert_eq!((frame.width(), frame.height()), (256, 256));
        assert_eq!(frame.pixel(128, 10), Some([0, 0, 0, 255]));
        assert_eq!(frame.pixel(128, 128), Some([255; 4]));
        assert_eq!(frame.pixel(128, 240), Some([0, 0, 0, 255]));
    }
}
