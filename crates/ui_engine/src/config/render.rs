//! Runtime rendering parameters
//!
//! [`RenderConfig`] is passed explicitly to everything that rasterizes or
//! presents. Any change that alters how glyphs are rasterized moves
//! [`RenderConfig::version`] to a fresh process-wide generation; caches
//! holding rasterized output compare the version on access and drop stale
//! entries themselves. Two configs with different text parameters never share
//! a version, even when built independently.

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Boolean text rasterization switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextFlags: u8 {
        /// Smooth glyph edges with coverage instead of a hard threshold
        const ANTIALIAS = 1 << 0;
        /// Keep fractional glyph positions instead of snapping to whole pixels
        const SUBPIXEL = 1 << 1;
        /// Per-channel (LCD) coverage
        const LCD = 1 << 2;
        /// Prefer automatic hinting over font-provided hints
        const AUTOHINT = 1 << 3;
    }
}

/// Glyph outline hinting strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintingLevel {
    /// No hinting
    #[serde(rename = "NoHinting")]
    None,
    /// Light vertical hinting
    Slight,
    /// Default hinting
    Normal,
    /// Strong hinting, snaps glyph origins to the pixel grid
    Full,
}

/// Image filtering quality used when text blocks are resampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterQuality {
    /// Nearest neighbour
    None,
    /// Bilinear
    Low,
    /// Bilinear with mipmaps
    Medium,
    /// Best available
    High,
}

/// Sampler used when the canvas is scaled onto the output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SamplerMode {
    /// Nearest neighbour, clamped
    PointClamp,
    /// Bilinear, clamped
    #[default]
    LinearClamp,
    /// Anisotropic, clamped
    AnisotropicClamp,
}

impl SamplerMode {
    /// Parse the persisted name, `None` if unknown
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PointClamp" => Some(Self::PointClamp),
            "LinearClamp" => Some(Self::LinearClamp),
            "AnisotropicClamp" => Some(Self::AnisotropicClamp),
            _ => None,
        }
    }

    /// Persisted name
    pub const fn name(self) -> &'static str {
        match self {
            Self::PointClamp => "PointClamp",
            Self::LinearClamp => "LinearClamp",
            Self::AnisotropicClamp => "AnisotropicClamp",
        }
    }
}

/// Next text quality generation. Zero is never issued.
static GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Versioned rendering parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    text_flags: TextFlags,
    hinting: HintingLevel,
    filter: FilterQuality,
    sampler: SamplerMode,
    text_scale: f32,
    version: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text_flags: TextFlags::ANTIALIAS | TextFlags::SUBPIXEL,
            hinting: HintingLevel::Full,
            filter: FilterQuality::Medium,
            sampler: SamplerMode::LinearClamp,
            text_scale: 1.0,
            version: next_generation(),
        }
    }
}

impl RenderConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation replaced on every change that invalidates rasterized text.
    ///
    /// Clones share it with their source until either side changes.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Current text switches
    pub const fn text_flags(&self) -> TextFlags {
        self.text_flags
    }

    /// Whether glyph edges are antialiased
    pub const fn antialias(&self) -> bool {
        self.text_flags.contains(TextFlags::ANTIALIAS)
    }

    /// Whether fractional glyph positions are kept
    pub const fn subpixel(&self) -> bool {
        self.text_flags.contains(TextFlags::SUBPIXEL)
    }

    /// Hinting level
    pub const fn hinting(&self) -> HintingLevel {
        self.hinting
    }

    /// Filter quality
    pub const fn filter_quality(&self) -> FilterQuality {
        self.filter
    }

    /// Sampler used for the final present
    pub const fn sampler(&self) -> SamplerMode {
        self.sampler
    }

    /// Oversampling factor applied to text rasterization, never below 1
    pub fn text_scale(&self) -> f32 {
        self.text_scale.max(1.0)
    }

    /// Toggle one text switch
    pub fn set_text_flag(&mut self, flag: TextFlags, enabled: bool) {
        let mut flags = self.text_flags;
        flags.set(flag, enabled);
        if flags != self.text_flags {
            self.text_flags = flags;
            self.bump();
        }
    }

    /// Toggle antialiasing
    pub fn set_antialias(&mut self, enabled: bool) {
        self.set_text_flag(TextFlags::ANTIALIAS, enabled);
    }

    /// Toggle subpixel positioning
    pub fn set_subpixel(&mut self, enabled: bool) {
        self.set_text_flag(TextFlags::SUBPIXEL, enabled);
    }

    /// Toggle LCD coverage
    pub fn set_lcd(&mut self, enabled: bool) {
        self.set_text_flag(TextFlags::LCD, enabled);
    }

    /// Toggle automatic hinting
    pub fn set_autohint(&mut self, enabled: bool) {
        self.set_text_flag(TextFlags::AUTOHINT, enabled);
    }

    /// Change the hinting level
    pub fn set_hinting(&mut self, hinting: HintingLevel) {
        if self.hinting != hinting {
            self.hinting = hinting;
            self.bump();
        }
    }

    /// Change the filter quality
    pub fn set_filter_quality(&mut self, filter: FilterQuality) {
        if self.filter != filter {
            self.filter = filter;
            self.bump();
        }
    }

    /// Change the present sampler. Glyph blocks do not depend on it.
    pub fn set_sampler(&mut self, sampler: SamplerMode) {
        self.sampler = sampler;
    }

    /// Change the text oversampling factor.
    ///
    /// The factor feeds into the pixel size that keys the glyph cache, so
    /// this does not need a version bump.
    pub fn set_text_scale(&mut self, scale: f32) {
        self.text_scale = if scale.is_finite() { scale.max(1.0) } else { 1.0 };
    }

    fn bump(&mut self) {
        self.version = next_generation();
        log::debug!("Render config changed, text quality version {}", self.version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_changes_bump_version() {
        let mut config = RenderConfig::new();
        let mut seen = vec![config.version()];

        config.set_antialias(false);
        assert!(!config.antialias());
        seen.push(config.version());

        config.set_hinting(HintingLevel::Slight);
        seen.push(config.version());
        config.set_filter_quality(FilterQuality::High);
        seen.push(config.version());
        config.set_lcd(true);
        seen.push(config.version());

        let mut unique = seen.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn test_redundant_changes_keep_version() {
        let mut config = RenderConfig::new();
        let v0 = config.version();
        config.set_antialias(true);
        config.set_hinting(HintingLevel::Full);
        config.set_sampler(SamplerMode::PointClamp);
        config.set_text_scale(3.0);
        assert_eq!(config.version(), v0);
        assert_eq!(config.sampler(), SamplerMode::PointClamp);
    }

    #[test]
    fn test_independent_configs_never_share_version() {
        let mut a = RenderConfig::new();
        let mut b = RenderConfig::new();
        assert_ne!(a.version(), b.version());

        a.set_antialias(false);
        b.set_hinting(HintingLevel::Slight);
        assert_ne!(a.version(), b.version());

        let copy = a.clone();
        assert_eq!(copy.version(), a.version());
    }

    #[test]
    fn test_text_scale_never_below_one() {
        let mut config = RenderConfig::new();
        config.set_text_scale(0.25);
        assert!((config.text_scale() - 1.0).abs() < f32::EPSILON);
        config.set_text_scale(f32::NAN);
        assert!((config.text_scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sampler_names() {
        for mode in [SamplerMode::PointClamp, SamplerMode::LinearClamp, SamplerMode::AnisotropicClamp] {
            assert_eq!(SamplerMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(SamplerMode::from_name("Bogus"), None);
    }
}
