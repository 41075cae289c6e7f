// src/engine/overlay.rs
//
// Overlay template: a full-bleed hero photo tinted with a palette gradient and
// an abstract pattern, with up to four small framed photos floating on top.

use crate::engine::color::Color;
use crate::engine::decorate::{self, GradientDirection, ShadowStyle, DEFAULT_DOTS_SEED};
use crate::engine::draw;
use crate::engine::geometry::{cover_crop, CanvasSize, Placement, Rect};
use crate::engine::palette::extract_palette;
use crate::error::{CollageError, Result};
use crate::ops::{OverlayAspect, PatternStyle};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Distance between a small photo's shadow layer and the canvas edge.
    pub margin: u32,
    /// Small photo width as a fraction of canvas width.
    pub small_width_ratio: f64,
    /// Small photo height is `canvas height * small_width_ratio * small_height_factor`.
    pub small_height_factor: f64,
    /// Border around each small photo (0 disables it).
    pub frame_width: u32,
    pub frame_color: Color,
    pub shadow: ShadowStyle,
    /// Alpha of the palette gradient drawn over the hero.
    pub gradient_opacity: u8,
    pub max_smalls: usize,
    pub dots_seed: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            margin: 40,
            small_width_ratio: 0.22,
            small_height_factor: 1.2,
            frame_width: 4,
            frame_color: Color::WHITE,
            shadow: ShadowStyle::OVERLAY,
            gradient_opacity: 120,
            max_smalls: 4,
            dots_seed: DEFAULT_DOTS_SEED,
        }
    }
}

/// Outer size of a small photo (frame included) on `canvas`.
pub fn small_image_size(canvas: CanvasSize, config: &OverlayConfig) -> (u32, u32) {
    let width = (canvas.width() as f64 * config.small_width_ratio) as u32;
    let height =
        (canvas.height() as f64 * config.small_width_ratio * config.small_height_factor) as u32;
    (width, height)
}

/// Top-left corners of the small photos' shadow layers.
///
/// 1 photo: bottom-right. 2: top-right, bottom-right. 3: adds bottom-left.
/// 4 or more: top-right, bottom-right, top-left, bottom-left.
pub fn overlay_positions(
    count: usize,
    canvas: CanvasSize,
    small: (u32, u32),
    margin: u32,
) -> Vec<(i64, i64)> {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let (iw, ih) = (small.0 as i64, small.1 as i64);
    let m = margin as i64;

    let top_right = (w - iw - m, m);
    let bottom_right = (w - iw - m, h - ih - m);
    let top_left = (m, m);
    let bottom_left = (m, h - ih - m);

    match count {
        0 => Vec::new(),
        1 => vec![bottom_right],
        2 => vec![top_right, bottom_right],
        3 => vec![top_right, bottom_right, bottom_left],
        _ => vec![top_right, bottom_right, top_left, bottom_left],
    }
}

/// Placements for the overlay template: the hero first (whole canvas), then
/// each small photo's framed rectangle. Small photos take the remaining
/// images in order, skipping the hero.
pub(crate) fn overlay_plan(
    image_count: usize,
    hero_index: usize,
    canvas: CanvasSize,
    config: &OverlayConfig,
) -> Result<Vec<Placement>> {
    if image_count == 0 {
        return Err(CollageError::no_valid_images());
    }
    let hero_index = if hero_index < image_count { hero_index } else { 0 };

    let mut placements = vec![Placement {
        rect: Rect::new(0, 0, canvas.width(), canvas.height()),
        image_index: hero_index,
    }];

    let others: Vec<usize> = (0..image_count)
        .filter(|&i| i != hero_index)
        .take(config.max_smalls.min(4))
        .collect();
    if others.is_empty() {
        return Ok(placements);
    }

    let (iw, ih) = small_image_size(canvas, config);
    let inner_w = iw as i64 - 2 * config.frame_width as i64;
    let inner_h = ih as i64 - 2 * config.frame_width as i64;
    // the photo inside the frame must be non-empty
    Rect::checked("overlay small photo", 0, 0, inner_w, inner_h)?;

    let offset = config.shadow.offset as i64;
    for (&(x, y), &image_index) in overlay_positions(others.len(), canvas, (iw, ih), config.margin)
        .iter()
        .zip(&others)
    {
        placements.push(Placement {
            rect: Rect::checked("overlay small photo", x + offset, y + offset, iw as i64, ih as i64)?,
            image_index,
        });
    }
    Ok(placements)
}

/// Render the overlay design. `hero_index` past the end falls back to the
/// first image; at most four other images are drawn as small photos.
pub fn render_overlay(
    images: &[DynamicImage],
    hero_index: usize,
    aspect: OverlayAspect,
    pattern: PatternStyle,
    config: &OverlayConfig,
) -> Result<RgbaImage> {
    let canvas_size = aspect.canvas_size();
    let placements = overlay_plan(images.len(), hero_index, canvas_size, config)?;
    let (hero, smalls) = placements
        .split_first()
        .ok_or_else(|| CollageError::internal("overlay plan produced no hero"))?;
    let hero_image = &images[hero.image_index];

    let mut canvas = cover_crop(hero_image, canvas_size.width(), canvas_size.height())?.to_rgba8();

    let colors = extract_palette(hero_image, 3);
    let primary = colors.first().copied().unwrap_or(Color::WHITE);
    let secondary = colors.get(1).copied().unwrap_or(primary);
    debug!(
        target: "collage::layout",
        aspect = aspect.label(),
        pattern = pattern.name(),
        hero = hero.image_index,
        smalls = smalls.len(),
        "rendering overlay"
    );

    let tint = decorate::gradient(
        canvas_size.width(),
        canvas_size.height(),
        primary,
        secondary,
        GradientDirection::Diagonal,
        config.gradient_opacity,
    );
    draw::composite(&mut canvas, &tint, 0, 0);
    drop(tint);

    let layer = decorate::pattern(
        pattern,
        canvas_size.width(),
        canvas_size.height(),
        primary,
        config.dots_seed,
    );
    draw::composite(&mut canvas, &layer, 0, 0);
    drop(layer);

    let frame = config.frame_width;
    for placement in smalls {
        let rect = placement.rect;
        let photo = cover_crop(
            &images[placement.image_index],
            rect.width - 2 * frame,
            rect.height - 2 * frame,
        )?
        .to_rgba8();
        let framed = if frame > 0 {
            decorate::frame(&photo, config.frame_color, frame)
        } else {
            photo
        };
        let shadowed = config.shadow.apply(&framed);
        let offset = config.shadow.offset as i64;
        draw::composite(&mut canvas, &shadowed, rect.x - offset, rect.y - offset);
    }

    Ok(canvas)
}
