//! # UI Engine
//!
//! Resolution-independent 2D UI composition. Layout is authored once against
//! a fixed virtual canvas and scaled onto whatever surface the host provides.
//!
//! ## Features
//!
//! - **Output Mapping**: Aspect-preserving canvas placement with black bars and
//!   inverse pointer mapping
//! - **Node Trees**: Normalized layout, widgets and a per-frame overlay channel
//! - **Menu Stack**: Exclusive and overlay menus with lazy initialization
//! - **Text Cache**: `fontdue` rasterization cached by content fingerprint and
//!   invalidated by render configuration changes
//! - **Fault Isolation**: A failing handler is logged and never stops the frame
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ui_engine::prelude::*;
//!
//! let config = UiConfig::default();
//! let mut ui = UiManager::new(
//!     &config,
//!     OutputSurface::windowed(1920, 1080),
//!     DisplayInfo::current(1080),
//! );
//!
//! ui.push_menu(Menu::from_fn("Main", MenuKind::Exclusive, |tree, root| {
//!     let spec = ButtonSpec::new(
//!         "Quit",
//!         LayerConstants::MENU_ELEMENTS,
//!         NormalizedRect::centered(0.2, 0.08),
//!         "Quit",
//!     );
//!     widgets::create_button(tree, root, spec, |_, commands| {
//!         commands.request_exit();
//!         Ok(())
//!     })?;
//!     Ok(())
//! }));
//!
//! ui.input_mut().set_pointer(960.0, 540.0);
//! ui.update(1.0 / 60.0);
//! let frame = ui.present_frame();
//! # let _ = frame;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod output;
pub mod text;
pub mod ui;
pub mod scene;
pub mod settings;

#[cfg(test)]
mod tests;

/// Common imports for UI hosts
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, RenderConfig, SamplerMode, UiConfig},
        events::{HandlerError, HandlerResult},
        foundation::{
            color::Color,
            math::{Point2, Rect, Vec2},
        },
        output::{DisplayInfo, OutputSurface, ResolutionCatalog, SurfaceRequest, VirtualCanvas},
        scene::{LayerConstants, SceneCollector, SceneObject, TreeObject},
        settings::DisplaySettings,
        ui::{
            widgets::{self, Button, ButtonSpec, Dropdown, Panel, TextAlignment, TextLabel, Widget},
            Commands, CursorShape, DisplayChange, DrawBatch, Menu, MenuContent, MenuKind, Node, NodeId,
            NodeTree, NormalizedRect, PixelCanvas, UiManager,
        },
    };
}
