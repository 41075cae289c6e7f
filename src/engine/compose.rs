// src/engine/compose.rs
//
// Composition orchestrator: resolves automatic choices, sizes the canvas,
// runs the template or style renderer and flattens the result to RGB.

use crate::engine::color::Color;
use crate::engine::draw::flatten;
use crate::engine::encoder;
use crate::engine::geometry::CanvasSize;
use crate::engine::layout::{render_collage, LayoutConfig};
use crate::engine::overlay::render_overlay;
use crate::engine::pool;
use crate::engine::select::{select_pattern, select_style, select_template};
use crate::engine::styles::render_style;
use crate::engine::DEFAULT_MAX_CANVAS_DIMENSION;
use crate::error::{CollageError, Result};
use crate::ops::{
    DesignFormat, OutputFormat, OverlayAspect, PatternSelector, PatternStyle, Style,
    StyleSelector, Template, TemplateSelector,
};
use image::DynamicImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// What kind of picture to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositionMode {
    /// A template collage (including the overlay template).
    Collage(TemplateSelector),
    /// A decorated design preset.
    Design(StyleSelector),
}

impl Default for CompositionMode {
    fn default() -> Self {
        CompositionMode::Collage(TemplateSelector::Auto)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComposeConfig {
    /// Requested canvas. Overlay templates use their own fixed canvas.
    pub canvas: CanvasSize,
    /// Collage canvases are shrunk so neither side exceeds this. `None` disables it.
    pub max_dimension: Option<u32>,
    pub mode: CompositionMode,
    /// Hero photo for the overlay template. Out-of-range values use the first image.
    pub hero_index: usize,
    pub pattern: PatternSelector,
    pub layout: LayoutConfig,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            max_dimension: Some(DEFAULT_MAX_CANVAS_DIMENSION),
            mode: CompositionMode::default(),
            hero_index: 0,
            pattern: PatternSelector::Auto,
            layout: LayoutConfig::default(),
        }
    }
}

impl ComposeConfig {
    pub fn collage(template: TemplateSelector, canvas: CanvasSize) -> Self {
        Self {
            canvas,
            mode: CompositionMode::Collage(template),
            ..Self::default()
        }
    }

    pub fn overlay(aspect: OverlayAspect, hero_index: usize, pattern: PatternSelector) -> Self {
        Self {
            canvas: aspect.canvas_size(),
            mode: CompositionMode::Collage(TemplateSelector::Explicit(Template::Overlay(aspect))),
            hero_index,
            pattern,
            ..Self::default()
        }
    }

    pub fn design(style: StyleSelector, format: DesignFormat) -> Self {
        Self {
            canvas: format.canvas_size(),
            mode: CompositionMode::Design(style),
            ..Self::default()
        }
    }
}

/// A finished picture and what was chosen to make it.
#[derive(Clone, Debug)]
pub struct Composition {
    /// Always RGB8.
    pub image: DynamicImage,
    /// Template or style name.
    pub label: &'static str,
    pub template: Option<Template>,
    pub style: Option<Style>,
    pub pattern: Option<PatternStyle>,
    pub width: u32,
    pub height: u32,
}

impl Composition {
    pub fn encode(&self, format: &OutputFormat) -> Result<Vec<u8>> {
        encoder::encode(&self.image, format)
    }
}

static SEED_SALT: AtomicU64 = AtomicU64::new(0x9E37_79B9_7F4A_7C15);

fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    // composers created in the same instant still get distinct streams
    nanos ^ SEED_SALT.fetch_add(0x9E37_79B9_7F4A_7C15, Ordering::Relaxed)
}

/// Runs compositions with an owned random source for the automatic choices.
pub struct Composer<R = StdRng> {
    rng: R,
}

impl Composer<StdRng> {
    /// Time-seeded.
    pub fn new() -> Self {
        Self::with_seed(time_seed())
    }

    /// Reproducible automatic choices.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Composer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Composer<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn compose(&mut self, images: &[DynamicImage], config: &ComposeConfig) -> Result<Composition> {
        if images.is_empty() {
            return Err(CollageError::no_valid_images());
        }
        let sources = normalize(images);

        match config.mode {
            CompositionMode::Collage(selector) => {
                let template = match selector {
                    TemplateSelector::Explicit(template) => template,
                    TemplateSelector::Auto => {
                        let template = select_template(sources.len(), &mut self.rng);
                        debug!(target: "collage::compose", template = template.name(), images = sources.len(), "auto-selected template");
                        template
                    }
                };
                match template {
                    Template::Overlay(aspect) => {
                        let pattern = self.resolve_pattern(config.pattern);
                        if config.hero_index >= sources.len() {
                            debug!(target: "collage::compose", hero_index = config.hero_index, images = sources.len(), "hero index out of range, using first image");
                        }
                        let canvas = render_overlay(&sources, config.hero_index, aspect, pattern, &config.layout.overlay)?;
                        Ok(finish(canvas, template.name(), Some(template), None, Some(pattern)))
                    }
                    template => {
                        let canvas = collage_canvas(config);
                        let rendered = render_collage(&sources, template, canvas, &config.layout)?;
                        Ok(finish(rendered, template.name(), Some(template), None, None))
                    }
                }
            }
            CompositionMode::Design(selector) => {
                let style = match selector {
                    StyleSelector::Explicit(style) => style,
                    StyleSelector::Auto => {
                        let style = select_style(&mut self.rng);
                        debug!(target: "collage::compose", style = style.name(), "auto-selected style");
                        style
                    }
                };
                let rendered = render_style(&sources, style, config.canvas)?;
                Ok(finish(rendered, style.name(), None, Some(style), None))
            }
        }
    }

    fn resolve_pattern(&mut self, selector: PatternSelector) -> PatternStyle {
        match selector {
            PatternSelector::Explicit(style) => style,
            PatternSelector::Auto => {
                let style = select_pattern(&mut self.rng);
                debug!(target: "collage::compose", pattern = style.name(), "auto-selected pattern");
                style
            }
        }
    }
}

/// Sources as RGB8; anything else (alpha, gray, 16-bit) is converted, which
/// drops transparency.
fn normalize(images: &[DynamicImage]) -> Cow<'_, [DynamicImage]> {
    if images.iter().all(|img| matches!(img, DynamicImage::ImageRgb8(_))) {
        return Cow::Borrowed(images);
    }
    Cow::Owned(
        images
            .iter()
            .map(|img| match img {
                DynamicImage::ImageRgb8(_) => img.clone(),
                other => DynamicImage::ImageRgb8(other.to_rgb8()),
            })
            .collect(),
    )
}

fn collage_canvas(config: &ComposeConfig) -> CanvasSize {
    let Some(max) = config.max_dimension else {
        return config.canvas;
    };
    let clamped = config.canvas.clamped(max);
    if clamped != config.canvas {
        debug!(
            target: "collage::compose",
            from_width = config.canvas.width(),
            from_height = config.canvas.height(),
            width = clamped.width(),
            height = clamped.height(),
            "clamped canvas"
        );
    }
    clamped
}

fn finish(
    canvas: image::RgbaImage,
    label: &'static str,
    template: Option<Template>,
    style: Option<Style>,
    pattern: Option<PatternStyle>,
) -> Composition {
    let rgb = flatten(&canvas, Color::WHITE);
    drop(canvas);
    let (width, height) = rgb.dimensions();
    Composition {
        image: DynamicImage::ImageRgb8(rgb),
        label,
        template,
        style,
        pattern,
        width,
        height,
    }
}

/// One-shot composition with a time-seeded [`Composer`].
pub fn compose(images: &[DynamicImage], config: &ComposeConfig) -> Result<Composition> {
    Composer::new().compose(images, config)
}

/// An independent request for [`compose_batch`].
#[derive(Clone, Debug)]
pub struct BatchJob {
    pub images: Vec<DynamicImage>,
    pub config: ComposeConfig,
    /// Fixed seed for the automatic choices; time-seeded when `None`.
    pub seed: Option<u64>,
}

/// Compose independent jobs in parallel on the shared pool. Results keep the
/// job order; one failing job does not affect the others.
pub fn compose_batch(jobs: &[BatchJob]) -> Vec<Result<Composition>> {
    pool::install(|| {
        jobs.par_iter()
            .map(|job| {
                let mut composer = match job.seed {
                    Some(seed) => Composer::with_seed(seed),
                    None => Composer::new(),
                };
                composer.compose(&job.images, &job.config)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, c: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(c)))
    }

    #[test]
    fn empty_input_fails_fast() {
        let err = Composer::with_seed(1)
            .compose(&[], &ComposeConfig::default())
            .unwrap_err();
        assert!(matches!(err, CollageError::NoValidImages));
    }

    #[test]
    fn collage_canvas_is_clamped() {
        let config = ComposeConfig::collage(
            TemplateSelector::Explicit(Template::Split),
            CanvasSize::new(1920, 1080).unwrap(),
        );
        let out = Composer::with_seed(1)
            .compose(&[solid(64, 64, [5, 5, 5])], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1024, 576));
        assert_eq!(out.label, "split");
    }

    #[test]
    fn clamp_can_be_disabled() {
        let config = ComposeConfig {
            max_dimension: None,
            ..ComposeConfig::collage(
                TemplateSelector::Explicit(Template::Split),
                CanvasSize::new(1300, 200).unwrap(),
            )
        };
        let out = Composer::with_seed(1)
            .compose(&[solid(64, 64, [5, 5, 5])], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1300, 200));
    }

    #[test]
    fn design_canvas_is_not_clamped() {
        let config = ComposeConfig::design(
            StyleSelector::Explicit(Style::EcoNature),
            DesignFormat::InstagramStory,
        );
        let out = Composer::with_seed(1)
            .compose(&[solid(64, 64, [5, 5, 5])], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1080, 1920));
        assert_eq!(out.style, Some(Style::EcoNature));
        assert_eq!(out.label, "eco_nature");
    }

    #[test]
    fn overlay_records_pattern() {
        let config = ComposeConfig::overlay(
            OverlayAspect::TwoByOne,
            0,
            PatternSelector::Explicit(PatternStyle::Wave),
        );
        let out = Composer::with_seed(1)
            .compose(&[solid(64, 64, [5, 5, 5])], &config)
            .unwrap();
        assert_eq!((out.width, out.height), (1600, 800));
        assert_eq!(out.pattern, Some(PatternStyle::Wave));
        assert_eq!(out.label, "overlay");
    }

    #[test]
    fn output_is_rgb_even_for_rgba_input() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 0])));
        let config = ComposeConfig::collage(
            TemplateSelector::Explicit(Template::Grid),
            CanvasSize::new(200, 200).unwrap(),
        );
        let out = Composer::with_seed(1).compose(&[rgba], &config).unwrap();
        assert!(matches!(out.image, DynamicImage::ImageRgb8(_)));
        // transparency is dropped on input, so the cell is black, not white
        assert_eq!(out.image.to_rgb8().get_pixel(40, 40).0, [0, 0, 0]);
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let ok = BatchJob {
            images: vec![solid(16, 16, [1, 2, 3])],
            config: ComposeConfig::collage(TemplateSelector::Auto, CanvasSize::new(300, 200).unwrap()),
            seed: Some(3),
        };
        let empty = BatchJob {
            images: Vec::new(),
            ..ok.clone()
        };
        let results = compose_batch(&[ok.clone(), empty, ok]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(CollageError::NoValidImages)));
        assert!(results[2].is_ok());
    }

    #[test]
    fn composition_encodes() {
        let out = Composer::with_seed(1)
            .compose(&[solid(16, 16, [1, 2, 3])], &ComposeConfig::default())
            .unwrap();
        let png = out.encode(&OutputFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
