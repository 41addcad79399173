//! Main menu and settings menu
//!
//! Both menus read and write one shared [`DisplaySettings`] value, which the
//! host saves on exit.

use std::cell::RefCell;
use std::rc::Rc;

use ui_engine::config::HintingLevel;
use ui_engine::prelude::*;
use ui_engine::ui::context::UpdateCx;
use ui_engine::ui::widgets::SelectionChanged;

/// Settings shared between the host and the menu handlers
pub type SharedSettings = Rc<RefCell<DisplaySettings>>;

const HINTING_LEVELS: [(HintingLevel, &str); 4] = [
    (HintingLevel::None, "None"),
    (HintingLevel::Slight, "Slight"),
    (HintingLevel::Normal, "Normal"),
    (HintingLevel::Full, "Full"),
];

const LABEL_X: f32 = 0.05;
const LABEL_WIDTH: f32 = 0.3;
const CONTROL_X: f32 = LABEL_X + LABEL_WIDTH + 0.01;
const CONTROL_WIDTH: f32 = 0.5;
const CONTROL_HEIGHT: f32 = 0.05;
const SPACING: f32 = 0.01;
const CONTROL_TEXT_SIZE: f32 = 16.0;

/// Queue the current text and sampler settings for the render config
fn push_render_settings(settings: &DisplaySettings, commands: &mut Commands) {
    let snapshot = settings.clone();
    commands.configure(move |render| snapshot.apply_to(render));
}

fn add_label(tree: &mut NodeTree, root: NodeId, name: &str, text: &str, y: f32) -> Result<NodeId, HandlerError> {
    let offset = (CONTROL_HEIGHT - 0.03) / 2.0;
    let label = TextLabel::new(text).with_font("", CONTROL_TEXT_SIZE);
    let node = Node::new(name, LayerConstants::MENU_TEXT, NormalizedRect::new(LABEL_X, y + offset, LABEL_WIDTH, 0.03))
        .with_widget(label);
    Ok(tree.spawn(root, node)?)
}

fn add_dropdown(
    tree: &mut NodeTree,
    root: NodeId,
    name: &str,
    dropdown: Dropdown,
    y: f32,
) -> Result<NodeId, HandlerError> {
    let node = Node::new(
        name,
        LayerConstants::MENU_ELEMENTS,
        NormalizedRect::new(CONTROL_X, y, CONTROL_WIDTH, CONTROL_HEIGHT),
    )
    .with_background(Color::rgba(50, 50, 50, 200))
    .with_widget(dropdown.with_font("", CONTROL_TEXT_SIZE));
    Ok(tree.spawn(root, node)?)
}

/// The title screen
pub fn main_menu(settings: SharedSettings, display_width: u32) -> Menu {
    Menu::from_fn("MainMenu", MenuKind::Exclusive, move |tree, root| {
        let title = TextLabel::new("UI Engine Demo")
            .with_font("", 32.0)
            .with_alignment(TextAlignment::Center);
        tree.spawn(
            root,
            Node::new("Title", LayerConstants::MENU_TEXT, NormalizedRect::new(0.1, 0.15, 0.8, 0.1)).with_widget(title),
        )?;

        let button = |name: &str, y: f32| {
            ButtonSpec::new(name, LayerConstants::MENU_ELEMENTS, NormalizedRect::new(0.4, y, 0.2, 0.08), name)
        };

        widgets::create_button(tree, root, button("Start", 0.4), |_, _| {
            log::info!("[MainMenu] Start pressed");
            Ok(())
        })?;

        let shared = Rc::clone(&settings);
        widgets::create_button(tree, root, button("Settings", 0.5), move |_, commands| {
            commands.push_menu(settings_menu(Rc::clone(&shared), display_width));
            Ok(())
        })?;

        widgets::create_button(tree, root, button("Quit", 0.6), |_, commands| {
            commands.request_exit();
            Ok(())
        })?;
        Ok(())
    })
}

/// The display and text quality screen
pub fn settings_menu(settings: SharedSettings, display_width: u32) -> Menu {
    Menu::new(
        "SettingsMenu",
        MenuKind::Exclusive,
        SettingsMenu {
            settings,
            display_width,
            antialias_button: None,
            subpixel_button: None,
        },
    )
}

struct SettingsMenu {
    settings: SharedSettings,
    display_width: u32,
    antialias_button: Option<NodeId>,
    subpixel_button: Option<NodeId>,
}

impl SettingsMenu {
    fn handler(
        &self,
        apply: impl Fn(&mut DisplaySettings, &SelectionChanged, &mut Commands) + 'static,
    ) -> impl FnMut(&SelectionChanged, &mut Commands) -> HandlerResult + 'static {
        let settings = Rc::clone(&self.settings);
        move |event, commands| {
            apply(&mut settings.borrow_mut(), event, commands);
            Ok(())
        }
    }

    fn toggle(
        &self,
        flip: impl Fn(&mut DisplaySettings) + 'static,
    ) -> impl FnMut(&(), &mut Commands) -> HandlerResult + 'static {
        let settings = Rc::clone(&self.settings);
        move |_, commands| {
            let mut current = settings.borrow_mut();
            flip(&mut current);
            push_render_settings(&current, commands);
            Ok(())
        }
    }
}

impl MenuContent for SettingsMenu {
    fn initialize(&mut self, tree: &mut NodeTree, root: NodeId) -> HandlerResult {
        let current = self.settings.borrow().clone();
        let mut y = 0.15;

        let title = TextLabel::new("Settings")
            .with_font("", 24.0)
            .with_alignment(TextAlignment::Center);
        tree.spawn(
            root,
            Node::new("SettingsTitle", LayerConstants::MENU_TEXT, NormalizedRect::new(0.1, 0.05, 0.8, 0.08))
                .with_widget(title),
        )?;

        add_label(tree, root, "DisplayModeLabel", "Display mode:", y)?;
        let mut mode = Dropdown::new("DisplayMode")
            .with_items(["Windowed", "Fullscreen"])
            .on_change(self.handler(|s, event, commands| {
                s.fullscreen = event.index == 1;
                commands.display(if s.fullscreen {
                    DisplayChange::Fullscreen
                } else {
                    DisplayChange::Windowed
                });
            }));
        mode.set_selected_index(Some(usize::from(current.fullscreen)));
        add_dropdown(tree, root, "DisplayModeDropdown", mode, y)?;
        y += CONTROL_HEIGHT + SPACING;

        add_label(tree, root, "ResolutionLabel", "Resolution:", y)?;
        let catalog = ResolutionCatalog::new(self.display_width);
        let sizes: Vec<(u32, u32)> = catalog.entries().iter().map(|e| (e.width, e.height)).collect();
        let mut resolution = Dropdown::new("Resolution")
            .with_items(catalog.labels())
            .on_change(self.handler(move |s, event, commands| {
                if let Some(&(width, height)) = sizes.get(event.index) {
                    s.resolution_width = width;
                    s.resolution_height = height;
                    commands.display(DisplayChange::Resolution { width, height });
                }
            }));
        resolution.set_selected_index(if current.fullscreen {
            None
        } else {
            catalog.index_of(current.resolution_width, current.resolution_height)
        });
        add_dropdown(tree, root, "ResolutionDropdown", resolution, y)?;
        y += CONTROL_HEIGHT + SPACING;

        let heading = TextLabel::new("--- Rendering ---")
            .with_font("", 18.0)
            .with_color(Color::rgb(0, 255, 255))
            .with_alignment(TextAlignment::Center);
        tree.spawn(
            root,
            Node::new("RenderingTitle", LayerConstants::MENU_TEXT, NormalizedRect::new(0.1, y, 0.8, 0.05))
                .with_widget(heading),
        )?;
        y += 0.05 + SPACING;

        add_label(tree, root, "ScaleLabel", "Text scale:", y)?;
        let mut scale = Dropdown::new("Scale")
            .with_items((1..=8).map(|i| format!("{i}x")))
            .on_change(self.handler(|s, event, commands| {
                s.scale_factor = (event.index + 1) as f32;
                push_render_settings(s, commands);
            }));
        let scale_index = (current.scale_factor.round() as usize).clamp(1, 8) - 1;
        scale.set_selected_index(Some(scale_index));
        add_dropdown(tree, root, "ScaleDropdown", scale, y)?;
        y += CONTROL_HEIGHT + SPACING;

        add_label(tree, root, "SamplerLabel", "Texture sampling:", y)?;
        let mut sampler = Dropdown::new("Sampler")
            .with_items(["Nearest", "Linear"])
            .on_change(self.handler(|s, event, commands| {
                s.sampler = if event.index == 0 {
                    SamplerMode::PointClamp
                } else {
                    SamplerMode::LinearClamp
                };
                push_render_settings(s, commands);
            }));
        sampler.set_selected_index(Some(usize::from(current.sampler != SamplerMode::PointClamp)));
        add_dropdown(tree, root, "SamplerDropdown", sampler, y)?;
        y += CONTROL_HEIGHT + SPACING;

        add_label(tree, root, "HintingLabel", "Hinting:", y)?;
        let mut hinting = Dropdown::new("Hinting")
            .with_items(HINTING_LEVELS.iter().map(|(_, name)| *name))
            .on_change(self.handler(|s, event, commands| {
                if let Some(&(level, _)) = HINTING_LEVELS.get(event.index) {
                    s.hinting = level;
                    push_render_settings(s, commands);
                }
            }));
        hinting.set_selected_index(HINTING_LEVELS.iter().position(|(level, _)| *level == current.hinting));
        add_dropdown(tree, root, "HintingDropdown", hinting, y)?;
        y += CONTROL_HEIGHT + SPACING;

        let toggle_spec = |name: &str, y: f32| {
            ButtonSpec::new(
                name,
                LayerConstants::MENU_ELEMENTS,
                NormalizedRect::new(CONTROL_X, y, CONTROL_WIDTH, CONTROL_HEIGHT),
                "",
            )
            .with_font("", CONTROL_TEXT_SIZE)
        };

        add_label(tree, root, "AntialiasLabel", "Antialiasing:", y)?;
        let antialias = self.toggle(|s| s.antialias = !s.antialias);
        self.antialias_button = Some(widgets::create_button(tree, root, toggle_spec("ToggleAntialias", y), antialias)?);
        y += CONTROL_HEIGHT + SPACING;

        add_label(tree, root, "SubpixelLabel", "Subpixel text:", y)?;
        let subpixel = self.toggle(|s| s.subpixel = !s.subpixel);
        self.subpixel_button = Some(widgets::create_button(tree, root, toggle_spec("ToggleSubpixel", y), subpixel)?);
        y += CONTROL_HEIGHT + SPACING * 2.0;

        let back_y = y.max(1.0 - 0.05 - 0.03);
        let back = ButtonSpec::new(
            "Back",
            LayerConstants::MENU_ELEMENTS,
            NormalizedRect::new(0.4, back_y, 0.2, 0.05),
            "Back",
        )
        .with_font("", 18.0);
        widgets::create_button(tree, root, back, |_, commands| {
            commands.pop_menu();
            Ok(())
        })?;
        Ok(())
    }

    fn update_logic(&mut self, tree: &mut NodeTree, _root: NodeId, _cx: &mut UpdateCx<'_>) -> HandlerResult {
        let current = self.settings.borrow();
        let on_off = |on: bool| if on { "On" } else { "Off" };
        if let Some(button) = self.antialias_button {
            widgets::set_button_text(tree, button, on_off(current.antialias));
        }
        if let Some(button) = self.subpixel_button {
            widgets::set_button_text(tree, button, on_off(current.subpixel));
        }
        Ok(())
    }
}
