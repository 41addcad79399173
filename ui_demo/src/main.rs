//! UI demo application
//!
//! Runs the main menu and settings menu headlessly: a scripted pointer walks
//! through the menus, selected frames are written as PNG files, and the
//! resulting display settings are persisted on exit.
//!
//! Usage: `ui_demo [output-dir]` (defaults to `frames`)

mod menus;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ui_engine::foundation::logging;
use ui_engine::output::map_canvas_to_physical;
use ui_engine::prelude::*;
use ui_engine::ui::rendering::CanvasError;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DISPLAY_WIDTH: u32 = 2560;
const DISPLAY_HEIGHT: u32 = 1440;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Frame export failed: {0}")]
    Canvas(#[from] CanvasError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One scripted input step, in canvas pixels
#[derive(Debug, Clone, Copy)]
enum Step {
    Move(f32, f32),
    Click(f32, f32),
    Snapshot(&'static str),
    Idle(u32),
}

/// Walk main menu -> settings -> change sampler -> toggle antialiasing -> back -> quit
fn script() -> Vec<Step> {
    vec![
        Step::Idle(2),
        Step::Snapshot("01_main_menu"),
        Step::Move(1280.0, 777.0),
        Step::Snapshot("02_settings_hovered"),
        Step::Click(1280.0, 777.0),
        Step::Idle(1),
        Step::Snapshot("03_settings_menu"),
        // Sampler dropdown, then its first item just below the box
        Step::Click(1561.0, 597.0),
        Step::Snapshot("04_sampler_open"),
        Step::Click(1561.0, 640.0),
        Step::Click(1561.0, 770.0),
        Step::Idle(1),
        Step::Snapshot("05_settings_changed"),
        Step::Click(1280.0, 1360.0),
        Step::Idle(1),
        Step::Click(1280.0, 921.0),
    ]
}

fn load_config() -> UiConfig {
    let path = Path::new("ui.toml");
    if !path.exists() {
        return UiConfig::default();
    }
    match UiConfig::load_from_file(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read {}: {e}. Using defaults.", path.display());
            UiConfig::default()
        }
    }
}

struct Demo {
    ui: UiManager,
    settings: menus::SharedSettings,
    out_dir: PathBuf,
}

impl Demo {
    fn new(config: &UiConfig, out_dir: PathBuf) -> Self {
        let loaded = DisplaySettings::load(&config.settings_path);
        let request = loaded.surface_request();
        let surface = if request.fullscreen {
            OutputSurface::fullscreen(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        } else {
            OutputSurface::windowed(request.width, request.height)
        };

        let mut ui = UiManager::new(config, surface, DisplayInfo::current(DISPLAY_HEIGHT));
        ui.set_display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT);
        loaded.apply_to(ui.render_config_mut());

        let settings = Rc::new(RefCell::new(loaded));
        ui.push_menu(menus::main_menu(Rc::clone(&settings), DISPLAY_WIDTH));

        Self { ui, settings, out_dir }
    }

    fn to_surface(&self, x: f32, y: f32) -> Point2 {
        map_canvas_to_physical(self.ui.canvas(), Point2::new(x, y), self.ui.destination_rect())
    }

    fn frame(&mut self) {
        self.ui.update(FRAME_TIME);

        while let Some(request) = self.ui.take_surface_request() {
            log::info!(
                "Host: switching to {}x{}{}",
                request.width,
                request.height,
                if request.fullscreen { " fullscreen" } else { "" }
            );
            self.ui.set_surface(OutputSurface {
                width: request.width,
                height: request.height,
                fullscreen: request.fullscreen,
            });
        }
        if let Some(cursor) = self.ui.take_cursor_change() {
            log::debug!("Host: cursor -> {cursor:?}");
        }
    }

    fn snapshot(&mut self, name: &str) -> Result<(), DemoError> {
        let frame = self.ui.present_frame();
        frame.save_png(self.out_dir.join(format!("{name}.png")))?;
        Ok(())
    }

    fn run(&mut self, steps: &[Step]) -> Result<(), DemoError> {
        for &step in steps {
            if self.ui.exit_requested() {
                break;
            }
            match step {
                Step::Move(x, y) => {
                    let p = self.to_surface(x, y);
                    self.ui.input_mut().set_pointer(p.x, p.y);
                    self.frame();
                }
                Step::Click(x, y) => {
                    let p = self.to_surface(x, y);
                    self.ui.input_mut().set_pointer(p.x, p.y);
                    self.ui.input_mut().set_button(true);
                    self.frame();
                    self.ui.input_mut().set_button(false);
                    self.frame();
                }
                Step::Snapshot(name) => self.snapshot(name)?,
                Step::Idle(frames) => {
                    for _ in 0..frames {
                        self.frame();
                    }
                }
            }
        }
        Ok(())
    }

    fn save_settings(&self, path: &Path) -> Result<(), DemoError> {
        let mut settings = self.settings.borrow_mut();
        settings.capture(self.ui.render_config());
        settings.save(path)?;
        Ok(())
    }
}

fn main() -> Result<(), DemoError> {
    let config = load_config();
    logging::init(&config.engine.log_level);
    log::info!("Starting {}", config.engine.app_name);

    let out_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("frames"), PathBuf::from);
    std::fs::create_dir_all(&out_dir)?;

    let mut demo = Demo::new(&config, out_dir);
    demo.run(&script())?;

    log::info!(
        "Script finished (exit requested: {}), {} menu(s) left on the stack",
        demo.ui.exit_requested(),
        demo.ui.menus().len()
    );
    demo.save_settings(&config.settings_path)?;
    Ok(())
}
