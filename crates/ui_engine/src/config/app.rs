//! # Application Configuration
//!
//! Static configuration read once at startup: logging, the virtual canvas
//! the UI is authored against, and where fonts and persisted settings live.
//! Everything here is serializable through [`Config`] so a host can ship a
//! `ui.toml` or `ui.ron` next to its binary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Config;
use crate::output::VirtualCanvas;

/// # Engine Configuration
///
/// Core behaviour that is not tied to a particular subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Application name used in log output
    pub app_name: String,
    /// `env_logger` filter directive (e.g. `"info"`, `"ui_engine=debug"`)
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "ui_engine".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// # Canvas Configuration
///
/// Fixed virtual canvas dimensions. All layout is authored against these
/// numbers; the output mapper scales the result to whatever surface the
/// host provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Height that semantic font sizes are authored against
    pub reference_height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 2560,
            height: 1440,
            reference_height: 720,
        }
    }
}

impl CanvasConfig {
    /// Build the immutable canvas description
    pub const fn canvas(&self) -> VirtualCanvas {
        VirtualCanvas::new(self.width, self.height, self.reference_height)
    }
}

/// # Font Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Directory scanned for `.ttf`/`.otf`/`.ttc` files
    pub directory: PathBuf,
    /// Name tried first when choosing the default font
    pub preferred_default: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets/fonts"),
            preferred_default: "SourceHanSansCN-Medium".to_string(),
        }
    }
}

/// # UI Configuration
///
/// Aggregates every static section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Engine behaviour
    pub engine: EngineConfig,
    /// Virtual canvas
    pub canvas: CanvasConfig,
    /// Font discovery
    pub fonts: FontConfig,
    /// Location of the persisted display settings file
    pub settings_path: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            canvas: CanvasConfig::default(),
            fonts: FontConfig::default(),
            settings_path: PathBuf::from("settings.toml"),
        }
    }
}

impl Config for UiConfig {}

impl UiConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application name
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.engine.app_name = name.into();
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.engine.log_level = level.into();
        self
    }

    /// Set the virtual canvas size
    #[must_use]
    pub fn with_canvas(mut self, width: u32, height: u32, reference_height: u32) -> Self {
        self.canvas = CanvasConfig {
            width,
            height,
            reference_height,
        };
        self
    }

    /// Set the font directory
    #[must_use]
    pub fn with_font_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.fonts.directory = directory.into();
        self
    }

    /// Set the preferred default font name
    #[must_use]
    pub fn with_preferred_font(mut self, name: impl Into<String>) -> Self {
        self.fonts.preferred_default = name.into();
        self
    }

    /// Set where display settings are persisted
    #[must_use]
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }
}
