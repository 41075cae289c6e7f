// src/ops.rs
//
// Composition selectors and presets.
// These are cheap to create and copy - the expensive work happens in compose().

use crate::engine::CanvasSize;
use crate::error::CollageError;

/// Fixed geometric template a collage is laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Template {
    /// One large image on the left, up to three stacked on the right
    HeroGrid,
    /// Two equal columns
    Split,
    /// Three columns: two half-height cells, one full-height cell, two half-height cells
    Masonry,
    /// 2x2 equal cells
    Grid,
    /// Full-bleed hero with up to four small shadowed images on top
    Overlay(OverlayAspect),
}

impl Template {
    /// Templates eligible for automatic selection (overlay is opt-in only).
    pub const COLLAGE: [Template; 4] = [
        Template::HeroGrid,
        Template::Split,
        Template::Masonry,
        Template::Grid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Template::HeroGrid => "hero_grid",
            Template::Split => "split",
            Template::Masonry => "masonry",
            Template::Grid => "grid",
            Template::Overlay(_) => "overlay",
        }
    }

    /// Look up a template by its wire name. `overlay` defaults to the 3:1 canvas.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "hero_grid" => Some(Template::HeroGrid),
            "split" => Some(Template::Split),
            "masonry" => Some(Template::Masonry),
            "grid" => Some(Template::Grid),
            "overlay" => Some(Template::Overlay(OverlayAspect::default())),
            _ => None,
        }
    }

    /// Number of images the template is designed around.
    pub fn ideal_images(&self) -> usize {
        match self {
            Template::Split => 2,
            Template::HeroGrid | Template::Grid => 4,
            Template::Masonry => 5,
            Template::Overlay(_) => 5,
        }
    }

    /// Minimum number of images the template renders with (absent cells stay background).
    pub fn min_images(&self) -> usize {
        1
    }
}

/// Canvas shape of the overlay template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverlayAspect {
    /// 1800x600
    #[default]
    ThreeByOne,
    /// 1600x800
    TwoByOne,
}

impl OverlayAspect {
    /// Parse an aspect label. Anything other than "2:1" is treated as 3:1.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "2:1" => OverlayAspect::TwoByOne,
            _ => OverlayAspect::ThreeByOne,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverlayAspect::ThreeByOne => "3:1",
            OverlayAspect::TwoByOne => "2:1",
        }
    }

    pub fn canvas_size(&self) -> CanvasSize {
        match self {
            OverlayAspect::ThreeByOne => CanvasSize::fixed(1800, 600),
            OverlayAspect::TwoByOne => CanvasSize::fixed(1600, 800),
        }
    }
}

/// Caller's template request: a concrete template or "auto".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemplateSelector {
    #[default]
    Auto,
    Explicit(Template),
}

impl TemplateSelector {
    /// Missing, empty, or "auto" selects automatically. Unrecognized names fall
    /// back to hero_grid rather than failing the request.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => TemplateSelector::Auto,
            Some(name) if name.eq_ignore_ascii_case("auto") => TemplateSelector::Auto,
            Some(name) => {
                TemplateSelector::Explicit(Template::from_name(name).unwrap_or(Template::HeroGrid))
            }
        }
    }
}

/// Abstract pattern drawn over the overlay hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternStyle {
    Geometric,
    Wave,
    Dots,
}

impl PatternStyle {
    pub const ALL: [PatternStyle; 3] = [PatternStyle::Geometric, PatternStyle::Wave, PatternStyle::Dots];

    pub fn name(&self) -> &'static str {
        match self {
            PatternStyle::Geometric => "geometric",
            PatternStyle::Wave => "wave",
            PatternStyle::Dots => "dots",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "geometric" => Some(PatternStyle::Geometric),
            "wave" => Some(PatternStyle::Wave),
            "dots" => Some(PatternStyle::Dots),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatternSelector {
    #[default]
    Auto,
    Explicit(PatternStyle),
}

impl PatternSelector {
    /// "auto" (or nothing) picks at random; unknown names draw dots.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => PatternSelector::Auto,
            Some(name) if name.eq_ignore_ascii_case("auto") => PatternSelector::Auto,
            Some(name) => {
                PatternSelector::Explicit(PatternStyle::from_name(name).unwrap_or(PatternStyle::Dots))
            }
        }
    }
}

/// Decorative preset for the professional design mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// White background, two framed images in the accent color
    ModernMinimal,
    /// Diagonal gradient from the image palette, one white-framed image
    GradientLuxury,
    /// Dark green, hero column with rounded white frames
    ResortMountain,
    /// Natural green, wider hero column with rounded white frames
    EcoNature,
    /// Mint background, hero row with rounded gold frames
    ModernEntrance,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::ModernMinimal,
        Style::GradientLuxury,
        Style::ResortMountain,
        Style::EcoNature,
        Style::ModernEntrance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Style::ModernMinimal => "modern_minimal",
            Style::GradientLuxury => "gradient_luxury",
            Style::ResortMountain => "resort_mountain",
            Style::EcoNature => "eco_nature",
            Style::ModernEntrance => "modern_entrance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "modern_minimal" | "minimal" => Some(Style::ModernMinimal),
            "gradient_luxury" | "luxury" => Some(Style::GradientLuxury),
            "resort_mountain" | "resort" => Some(Style::ResortMountain),
            "eco_nature" | "eco" => Some(Style::EcoNature),
            "modern_entrance" | "entrance" => Some(Style::ModernEntrance),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StyleSelector {
    #[default]
    Auto,
    Explicit(Style),
}

impl StyleSelector {
    pub fn from_label(label: Option<&str>) -> Self {
        label
            .and_then(Style::from_name)
            .map(StyleSelector::Explicit)
            .unwrap_or(StyleSelector::Auto)
    }
}

/// Output format for encoding
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    pub fn from_str(format: &str, quality: Option<u8>) -> Result<Self, CollageError> {
        let q = quality.unwrap_or(90).clamp(1, 100);
        match format.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg { quality: q }),
            other => Err(CollageError::invalid_argument(
                "format",
                other.to_string(),
                "Expected png or jpeg",
            )),
        }
    }
}

// =============================================================================
// CANVAS PRESETS - Size tiers and aspect ratios accepted by the collage service
// =============================================================================

/// Canvas width tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeTier {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl SizeTier {
    /// Unknown labels fall back to MD.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "SM" => SizeTier::Sm,
            "LG" => SizeTier::Lg,
            "XL" => SizeTier::Xl,
            _ => SizeTier::Md,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            SizeTier::Sm => 800,
            SizeTier::Md => 1024,
            SizeTier::Lg => 1920,
            SizeTier::Xl => 2560,
        }
    }
}

/// Width:height ratio of a collage canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self { width: 16, height: 9 }
    }
}

impl AspectRatio {
    /// Supported: 3:1, 2:2, 1:1, 16:9, 4:3, 21:9. Unknown labels fall back to 16:9.
    pub fn from_label(label: &str) -> Self {
        let (width, height) = match label.trim() {
            "3:1" => (3, 1),
            "2:2" => (2, 2),
            "1:1" => (1, 1),
            "4:3" => (4, 3),
            "21:9" => (21, 9),
            _ => (16, 9),
        };
        Self { width, height }
    }

    /// Height for a canvas of the given width (truncated, at least 1).
    pub fn height_for(&self, width: u32) -> u32 {
        let h = width as u64 * self.height as u64 / self.width as u64;
        (h as u32).max(1)
    }
}

/// Canvas size from an aspect-ratio label and a size-tier label, e.g. ("16:9", "MD") -> 1024x576.
pub fn canvas_from_preset(aspect_ratio: Option<&str>, size: Option<&str>) -> CanvasSize {
    let width = size.map(SizeTier::from_label).unwrap_or_default().width();
    let ratio = aspect_ratio.map(AspectRatio::from_label).unwrap_or_default();
    CanvasSize::fixed(width, ratio.height_for(width))
}

/// Social media output formats used by the design mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DesignFormat {
    #[default]
    FacebookPost,
    InstagramFeed,
    InstagramStory,
    Custom16x9,
    Custom4x3,
    Custom1x1,
}

impl DesignFormat {
    /// Unknown labels fall back to facebook_post.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "instagram_feed" => DesignFormat::InstagramFeed,
            "instagram_story" => DesignFormat::InstagramStory,
            "custom_16_9" => DesignFormat::Custom16x9,
            "custom_4_3" => DesignFormat::Custom4x3,
            "custom_1_1" => DesignFormat::Custom1x1,
            _ => DesignFormat::FacebookPost,
        }
    }

    pub fn canvas_size(&self) -> CanvasSize {
        match self {
            DesignFormat::FacebookPost => CanvasSize::fixed(1200, 630),
            DesignFormat::InstagramFeed => CanvasSize::fixed(1080, 1080),
            DesignFormat::InstagramStory => CanvasSize::fixed(1080, 1920),
            DesignFormat::Custom16x9 => CanvasSize::fixed(1920, 1080),
            DesignFormat::Custom4x3 => CanvasSize::fixed(1600, 1200),
            DesignFormat::Custom1x1 => CanvasSize::fixed(1200, 1200),
        }
    }
}
