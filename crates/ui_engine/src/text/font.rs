//! Font discovery and loading
//!
//! Fonts are looked up by logical name in a single directory, trying the
//! `.ttf`, `.otf` and `.ttc` extensions in that order. The default font is
//! the preferred name if present, else the first `.ttf`/`.otf` file in the
//! directory, else the system font under the internal name
//! [`SYSTEM_FONT_NAME`]. A name that fails to load resolves to the system
//! font and that fallback is cached under the failing name, so the failure
//! is reported once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};

use super::{TextError, TextResult};
use crate::config::FontConfig;

/// Internal name of the system font
pub const SYSTEM_FONT_NAME: &str = "default";

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

const SYSTEM_FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Vertical line metrics in pixels. `descent` is negative below the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to the top of the line
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line (negative)
    pub descent: f32,
}

impl LineMetrics {
    /// Full line height
    pub fn height(&self) -> f32 {
        self.ascent - self.descent
    }
}

/// A typeface resolved for one logical name and pixel size
#[derive(Clone)]
pub struct FontFace {
    requested: String,
    size: f32,
    font: Option<Arc<Font>>,
    fallback: bool,
}

impl FontFace {
    /// Face without outlines; glyphs render blank but still take up space
    pub fn blank(name: impl Into<String>, size: f32) -> Self {
        Self {
            requested: name.into(),
            size,
            font: None,
            fallback: true,
        }
    }

    /// Name the face was requested under
    pub fn name(&self) -> &str {
        &self.requested
    }

    /// Pixel size the face was resolved for
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Whether the system font stands in for the requested one
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Parsed outlines, absent when no system font could be found
    pub fn font(&self) -> Option<&Font> {
        self.font.as_deref()
    }

    /// Line metrics at `px`.
    ///
    /// Faces without outlines use fixed proportions so layout still works.
    pub fn line_metrics(&self, px: f32) -> LineMetrics {
        self.font
            .as_ref()
            .and_then(|f| f.horizontal_line_metrics(px))
            .map_or(
                LineMetrics {
                    ascent: px * 0.8,
                    descent: -px * 0.2,
                },
                |m| LineMetrics {
                    ascent: m.ascent,
                    descent: m.descent,
                },
            )
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("requested", &self.requested)
            .field("size", &self.size)
            .field("has_outlines", &self.font.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Font registry with per (name, size) caching
pub struct FontLibrary {
    directory: PathBuf,
    default_name: String,
    typefaces: HashMap<String, Arc<Font>>,
    faces: HashMap<(String, u32), FontFace>,
    system: Option<Option<Arc<Font>>>,
}

impl FontLibrary {
    /// Scan the configured directory and resolve the default font
    pub fn new(config: &FontConfig) -> Self {
        let mut library = Self {
            directory: config.directory.clone(),
            default_name: SYSTEM_FONT_NAME.to_string(),
            typefaces: HashMap::new(),
            faces: HashMap::new(),
            system: None,
        };

        if library.try_set_default(&config.preferred_default) {
            log::info!("[Fonts] Using preferred default font '{}'", library.default_name);
        } else if let Some(first) = library.first_available() {
            if library.try_set_default(&first) {
                log::info!("[Fonts] Using first available font '{}' as default", first);
            }
        }

        if library.default_name == SYSTEM_FONT_NAME {
            log::warn!(
                "[Fonts] No usable font in {}, falling back to the system font",
                library.directory.display()
            );
        }
        library
    }

    /// Library without a font directory; everything resolves to the system font
    pub fn system_only() -> Self {
        Self::new(&FontConfig {
            directory: PathBuf::new(),
            preferred_default: String::new(),
        })
    }

    /// Name used when callers ask for the default font
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Resolve an empty name or [`SYSTEM_FONT_NAME`] to the default font name
    pub fn resolve_name<'a>(&'a self, name: &'a str) -> &'a str {
        if name.is_empty() || name == SYSTEM_FONT_NAME {
            &self.default_name
        } else {
            name
        }
    }

    /// Register font bytes under a logical name, replacing any cached entry
    pub fn register_bytes(&mut self, name: &str, bytes: &[u8]) -> TextResult<()> {
        let font = parse_font(name, bytes)?;
        self.typefaces.insert(name.to_string(), Arc::new(font));
        self.faces.retain(|(cached, _), _| cached != name);
        Ok(())
    }

    /// Face for `name` at `size` pixels, falling back to the system font
    pub fn face(&mut self, name: &str, size: f32) -> FontFace {
        let resolved = self.resolve_name(name).to_string();
        let key = (resolved.clone(), size.to_bits());
        if let Some(face) = self.faces.get(&key) {
            return face.clone();
        }

        let face = if resolved == SYSTEM_FONT_NAME {
            FontFace {
                requested: resolved.clone(),
                size,
                font: self.system_font(),
                fallback: false,
            }
        } else {
            match self.typeface(&resolved) {
                Ok(font) => FontFace {
                    requested: resolved.clone(),
                    size,
                    font: Some(font),
                    fallback: false,
                },
                Err(err) => {
                    log::warn!("[Fonts] {err}; using the system font for '{resolved}'");
                    FontFace {
                        requested: resolved.clone(),
                        size,
                        font: self.system_font(),
                        fallback: true,
                    }
                }
            }
        };

        self.faces.insert(key, face.clone());
        face
    }

    /// Number of cached (name, size) faces
    pub fn cached_faces(&self) -> usize {
        self.faces.len()
    }

    fn try_set_default(&mut self, name: &str) -> bool {
        if name.is_empty() || name == SYSTEM_FONT_NAME {
            return false;
        }
        match self.typeface(name) {
            Ok(_) => {
                self.default_name = name.to_string();
                true
            }
            Err(err) => {
                log::debug!("[Fonts] Default candidate rejected: {err}");
                false
            }
        }
    }

    fn first_available(&self) -> Option<String> {
        let entries = std::fs::read_dir(&self.directory).ok()?;
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
            })
            .collect();
        candidates.sort();
        candidates
            .first()
            .and_then(|path| path.file_stem())
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        FONT_EXTENSIONS
            .iter()
            .map(|ext| self.directory.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }

    fn typeface(&mut self, name: &str) -> TextResult<Arc<Font>> {
        if let Some(font) = self.typefaces.get(name) {
            return Ok(Arc::clone(font));
        }
        let path = self
            .locate(name)
            .ok_or_else(|| TextError::FontNotFound(name.to_string()))?;
        let font = Arc::new(load_font_file(name, &path)?);
        log::debug!("[Fonts] Loaded '{}' from {}", name, path.display());
        self.typefaces.insert(name.to_string(), Arc::clone(&font));
        Ok(font)
    }

    fn system_font(&mut self) -> Option<Arc<Font>> {
        if let Some(cached) = &self.system {
            return cached.clone();
        }
        let found = SYSTEM_FONT_CANDIDATES.iter().find_map(|candidate| {
            let path = Path::new(candidate);
            if !path.is_file() {
                return None;
            }
            load_font_file(SYSTEM_FONT_NAME, path).ok().map(Arc::new)
        });
        if found.is_none() {
            log::warn!("[Fonts] No system font found, text will render as blank blocks");
        }
        self.system = Some(found.clone());
        found
    }
}

fn load_font_file(name: &str, path: &Path) -> TextResult<Font> {
    let bytes = std::fs::read(path)?;
    parse_font(name, &bytes)
}

fn parse_font(name: &str, bytes: &[u8]) -> TextResult<Font> {
    Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| TextError::FontLoad {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_font_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ui_engine_fonts_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn test_missing_directory_uses_system_name() {
        let library = FontLibrary::new(&FontConfig {
            directory: PathBuf::from("/definitely/not/a/font/dir"),
            preferred_default: "Nope".to_string(),
        });
        assert_eq!(library.default_name(), SYSTEM_FONT_NAME);
        assert_eq!(library.resolve_name(""), SYSTEM_FONT_NAME);
    }

    #[test]
    fn test_unparsable_font_falls_back_and_is_cached() {
        let dir = temp_font_dir("broken");
        std::fs::write(dir.join("Broken.ttf"), b"not a font").expect("write");

        let mut library = FontLibrary::new(&FontConfig {
            directory: dir.clone(),
            preferred_default: "Broken".to_string(),
        });
        // A broken preferred font is not accepted as the default
        assert_eq!(library.default_name(), SYSTEM_FONT_NAME);

        let face = library.face("Broken", 32.0);
        assert!(face.is_fallback());
        assert_eq!(face.name(), "Broken");
        assert_eq!(library.cached_faces(), 1);

        // Second lookup is served from the cache
        let again = library.face("Broken", 32.0);
        assert!(again.is_fallback());
        assert_eq!(library.cached_faces(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_faces_cached_per_size() {
        let mut library = FontLibrary::system_only();
        library.face("", 16.0);
        library.face(SYSTEM_FONT_NAME, 16.0);
        library.face("", 24.0);
        assert_eq!(library.cached_faces(), 2);
    }

    #[test]
    fn test_metrics_without_outlines_are_proportional() {
        let face = FontFace::blank("x", 10.0);
        let metrics = face.line_metrics(10.0);
        assert!((metrics.height() - 10.0).abs() < 1e-4);
        assert!(metrics.descent < 0.0);
    }
}
