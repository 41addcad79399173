//! Persisted display settings
//!
//! A small TOML file holding the user's window and text quality choices.
//! Loading never fails: a missing file yields defaults, and a damaged file
//! keeps whatever leading lines still parse.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{Config, ConfigError, HintingLevel, RenderConfig, SamplerMode};
use crate::output::SurfaceRequest;

/// User-facing display and text quality settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Windowed width
    pub resolution_width: u32,
    /// Windowed height
    pub resolution_height: u32,
    /// Start fullscreen
    pub fullscreen: bool,
    /// Text oversampling factor
    pub scale_factor: f32,
    /// Present sampler
    #[serde(deserialize_with = "lenient_sampler")]
    pub sampler: SamplerMode,
    /// Antialiased glyph edges
    pub antialias: bool,
    /// Hinting strength
    #[serde(deserialize_with = "lenient_hinting")]
    pub hinting: HintingLevel,
    /// Subpixel positioning and LCD coverage
    pub subpixel: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            resolution_width: 1920,
            resolution_height: 1080,
            fullscreen: false,
            scale_factor: 2.0,
            sampler: SamplerMode::LinearClamp,
            antialias: true,
            hinting: HintingLevel::Full,
            subpixel: true,
        }
    }
}

impl Config for DisplaySettings {}

impl DisplaySettings {
    /// Read settings from `path`, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_lenient(&contents, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("[Settings] No settings at {:?}, using defaults", path);
                Self::default()
            }
            Err(err) => {
                log::warn!("[Settings] Failed to read {:?}: {}. Using defaults.", path, err);
                Self::default()
            }
        }
    }

    /// Parse TOML text, dropping trailing lines until the rest parses.
    ///
    /// Fields absent from the surviving prefix keep their defaults.
    pub fn parse_lenient(contents: &str, origin: &Path) -> Self {
        let lines: Vec<&str> = contents.lines().collect();
        let mut first_error = None;

        for keep in (0..=lines.len()).rev() {
            match toml::from_str::<Self>(&lines[..keep].join("\n")) {
                Ok(settings) => {
                    if let Some(err) = first_error {
                        log::warn!(
                            "[Settings] {:?} is incomplete or damaged ({}). Kept {} of {} lines, \
                             the rest use defaults.",
                            origin,
                            err,
                            keep,
                            lines.len()
                        );
                    }
                    return settings;
                }
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }

        log::warn!("[Settings] Nothing in {:?} could be read, using defaults", origin);
        Self::default()
    }

    /// Write the settings as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.save_to_file(path)?;
        log::info!("[Settings] Saved to {:?}", path);
        Ok(())
    }

    /// Push the text and sampler choices into `render`.
    ///
    /// Subpixel rendering drives both subpixel positioning and LCD coverage;
    /// normal and full hinting also turn on automatic hinting.
    pub fn apply_to(&self, render: &mut RenderConfig) {
        render.set_text_scale(self.scale_factor);
        render.set_sampler(self.sampler);
        render.set_antialias(self.antialias);
        render.set_hinting(self.hinting);
        render.set_autohint(matches!(self.hinting, HintingLevel::Normal | HintingLevel::Full));
        render.set_subpixel(self.subpixel);
        render.set_lcd(self.subpixel);
    }

    /// Copy the text and sampler choices out of `render`
    pub fn capture(&mut self, render: &RenderConfig) {
        self.scale_factor = render.text_scale();
        self.sampler = render.sampler();
        self.antialias = render.antialias();
        self.hinting = render.hinting();
        self.subpixel = render.subpixel();
    }

    /// Surface the host should open with
    pub const fn surface_request(&self) -> SurfaceRequest {
        SurfaceRequest {
            width: self.resolution_width,
            height: self.resolution_height,
            fullscreen: self.fullscreen,
        }
    }
}

fn lenient_sampler<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SamplerMode, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(SamplerMode::from_name(&name).unwrap_or_else(|| {
        log::warn!("[Settings] Unknown sampler '{}', using LinearClamp", name);
        SamplerMode::LinearClamp
    }))
}

fn lenient_hinting<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HintingLevel, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(match name.as_str() {
        "NoHinting" => HintingLevel::None,
        "Slight" => HintingLevel::Slight,
        "Normal" => HintingLevel::Normal,
        "Full" => HintingLevel::Full,
        _ => {
            log::warn!("[Settings] Unknown hinting '{}', using Full", name);
            HintingLevel::Full
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextFlags;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ui_engine_settings_{}_{}.toml", tag, std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = DisplaySettings::load(temp_path("missing"));
        assert_eq!(settings, DisplaySettings::default());
        assert_eq!((settings.resolution_width, settings.resolution_height), (1920, 1080));
        assert_eq!(settings.sampler, SamplerMode::LinearClamp);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("round");
        let settings = DisplaySettings {
            resolution_width: 1280,
            resolution_height: 720,
            fullscreen: true,
            sampler: SamplerMode::PointClamp,
            hinting: HintingLevel::None,
            ..DisplaySettings::default()
        };

        settings.save(&path).expect("save");
        let loaded = DisplaySettings::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_damaged_tail_keeps_prefix() {
        let text = "resolution_width = 1600\nresolution_height = 900\nfullscreen = tru\nantialias = false\n";
        let settings = DisplaySettings::parse_lenient(text, Path::new("damaged.toml"));

        assert_eq!(settings.resolution_width, 1600);
        assert_eq!(settings.resolution_height, 900);
        assert!(!settings.fullscreen);
        assert!(settings.antialias);
    }

    #[test]
    fn test_garbage_gives_defaults() {
        let settings = DisplaySettings::parse_lenient("\u{0}\u{1}binary", Path::new("garbage.toml"));
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let text = "sampler = \"Trilinear\"\nhinting = \"Extreme\"\nscale_factor = 3.0\n";
        let settings = DisplaySettings::parse_lenient(text, Path::new("names.toml"));

        assert_eq!(settings.sampler, SamplerMode::LinearClamp);
        assert_eq!(settings.hinting, HintingLevel::Full);
        assert!((settings.scale_factor - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_apply_and_capture() {
        let settings = DisplaySettings {
            scale_factor: 4.0,
            sampler: SamplerMode::PointClamp,
            antialias: false,
            hinting: HintingLevel::Slight,
            subpixel: false,
            ..DisplaySettings::default()
        };
        let mut render = RenderConfig::new();
        settings.apply_to(&mut render);

        assert!((render.text_scale() - 4.0).abs() < f32::EPSILON);
        assert_eq!(render.sampler(), SamplerMode::PointClamp);
        assert!(!render.text_flags().intersects(TextFlags::ANTIALIAS | TextFlags::LCD | TextFlags::AUTOHINT));
        assert!(render.version() > 0);

        let mut captured = DisplaySettings::default();
        captured.capture(&render);
        assert_eq!(captured.hinting, HintingLevel::Slight);
        assert!(!captured.subpixel);
        assert_eq!(captured.sampler, SamplerMode::PointClamp);
    }
}
