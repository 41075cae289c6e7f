// src/engine/layout.rs
//
// Collage templates. Each template is a pure placement plan over the canvas;
// rendering cover-crops every image into its cell and pastes it.

use crate::engine::color::Color;
use crate::engine::decorate::ShadowStyle;
use crate::engine::draw;
use crate::engine::geometry::{cover_crop, CanvasSize, Placement, Rect};
use crate::engine::overlay::{overlay_plan, render_overlay, OverlayConfig};
use crate::error::{CollageError, Result};
use crate::ops::{PatternStyle, Template};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Space between the canvas edge and the outer cells.
    pub padding: u32,
    /// Space between neighbouring cells.
    pub spacing: u32,
    pub background: Color,
    /// Share of the available width given to the hero in `hero_grid`.
    pub hero_ratio: f64,
    /// Drop shadow under every cell. Off by default.
    pub cell_shadow: Option<ShadowStyle>,
    pub overlay: OverlayConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 12,
            spacing: 8,
            background: Color::WHITE,
            hero_ratio: 0.65,
            cell_shadow: None,
            overlay: OverlayConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_cell_shadow(mut self) -> Self {
        self.cell_shadow = Some(ShadowStyle::COLLAGE);
        self
    }
}

/// Candidate cells for a template in fill order, as signed (x, y, w, h).
fn slots(template: Template, canvas: CanvasSize, config: &LayoutConfig) -> Vec<(&'static str, [i64; 4])> {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let p = config.padding as i64;
    let s = config.spacing as i64;

    match template {
        Template::Split => {
            let aw = w - 2 * p - s;
            let ah = h - 2 * p;
            let half = aw.div_euclid(2);
            vec![
                ("split left", [p, p, half, ah]),
                ("split right", [p + half + s, p, half, ah]),
            ]
        }
        Template::Grid => {
            let aw = w - 2 * p - s;
            let ah = h - 2 * p - s;
            let (cw, ch) = (aw.div_euclid(2), ah.div_euclid(2));
            vec![
                ("grid cell", [p, p, cw, ch]),
                ("grid cell", [p + cw + s, p, cw, ch]),
                ("grid cell", [p, p + ch + s, cw, ch]),
                ("grid cell", [p + cw + s, p + ch + s, cw, ch]),
            ]
        }
        Template::HeroGrid => {
            let aw = w - 2 * p - s;
            let ah = h - 2 * p;
            let hero_w = (aw as f64 * config.hero_ratio) as i64;
            let small_w = aw - hero_w;
            let small_h = (ah - 2 * s).div_euclid(3);
            let small_x = p + hero_w + s;
            let mut cells = vec![("hero", [p, p, hero_w, ah])];
            cells.extend((0..3).map(|i| ("hero grid small", [small_x, p + i * (small_h + s), small_w, small_h])));
            cells
        }
        Template::Masonry => {
            let aw = w - 2 * p - 2 * s;
            let ah = h - 2 * p - s;
            let cw = aw.div_euclid(3);
            let hh = ah.div_euclid(2);
            let right = p + 2 * cw + 2 * s;
            vec![
                ("masonry top left", [p, p, cw, hh]),
                ("masonry center", [p + cw + s, p, cw, ah]),
                ("masonry bottom left", [p, p + hh + s, cw, hh]),
                ("masonry top right", [right, p, cw, hh]),
                ("masonry bottom right", [right, p + hh + s, cw, hh]),
            ]
        }
        // overlay geometry lives in overlay.rs
        Template::Overlay(_) => Vec::new(),
    }
}

/// Placement plan for `image_count` images.
///
/// Images beyond the template's slots are ignored; slots beyond the image
/// count are left out, so the background shows there. Only cells that get an
/// image are validated.
pub fn plan(
    template: Template,
    image_count: usize,
    canvas: CanvasSize,
    config: &LayoutConfig,
) -> Result<Vec<Placement>> {
    if image_count < template.min_images() {
        return Err(CollageError::no_valid_images());
    }
    if let Template::Overlay(_) = template {
        return overlay_plan(image_count, 0, canvas, &config.overlay);
    }

    slots(template, canvas, config)
        .into_iter()
        .take(image_count)
        .enumerate()
        .map(|(image_index, (region, [x, y, w, h]))| {
            Ok(Placement {
                rect: Rect::checked(region, x, y, w, h)?,
                image_index,
            })
        })
        .collect()
}

/// Render a collage onto an opaque canvas filled with `config.background`.
///
/// Overlay templates ignore `canvas`: they draw on their own fixed-aspect
/// canvas with the first image as hero and the dots pattern. Use
/// [`render_overlay`] to choose hero and pattern.
pub fn render_collage(
    images: &[DynamicImage],
    template: Template,
    canvas: CanvasSize,
    config: &LayoutConfig,
) -> Result<RgbaImage> {
    if let Template::Overlay(aspect) = template {
        return render_overlay(images, 0, aspect, PatternStyle::Dots, &config.overlay);
    }

    let placements = plan(template, images.len(), canvas, config)?;
    debug!(
        target: "collage::layout",
        template = template.name(),
        width = canvas.width(),
        height = canvas.height(),
        pixels = canvas.pixel_count(),
        cells = placements.len(),
        "rendering collage"
    );

    let mut out = RgbaImage::from_pixel(canvas.width(), canvas.height(), config.background.opaque());
    for placement in &placements {
        let rect = placement.rect;
        let tile = cover_crop(&images[placement.image_index], rect.width, rect.height)?.to_rgba8();
        match config.cell_shadow {
            Some(shadow) => {
                let offset = shadow.offset as i64;
                draw::composite(&mut out, &shadow.apply(&tile), rect.x - offset, rect.y - offset);
            }
            None => draw::paste(&mut out, &tile, rect.x, rect.y),
        }
    }
    Ok(out)
}
