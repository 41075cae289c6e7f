// src/engine/decorate.rs
//
// Decoration primitives. Every function returns a fresh RGBA layer; callers
// composite layers onto the base in order (base, gradient, pattern, photos).

use crate::engine::color::Color;
use crate::engine::draw;
use crate::ops::PatternStyle;
use image::{imageops, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed for the dots pattern when the caller doesn't pick one.
pub const DEFAULT_DOTS_SEED: u64 = 42;

const DOT_COUNT: usize = 100;
const LINE_SPACING: usize = 100;
const WAVE_AMPLITUDE: f64 = 80.0;
const WAVE_FREQUENCY: f64 = 0.01;
const WAVE_STEP: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientDirection {
    /// top to bottom
    Vertical,
    /// left to right
    Horizontal,
    /// top-left to bottom-right
    #[default]
    Diagonal,
}

/// Two-stop linear gradient with uniform `opacity`.
///
/// Ratios are `y/h`, `x/w` or `(x+y)/(w+h)`. The blend is computed once per
/// row, column, or anti-diagonal and then looked up per pixel.
pub fn gradient(
    width: u32,
    height: u32,
    from: Color,
    to: Color,
    direction: GradientDirection,
    opacity: u8,
) -> RgbaImage {
    let table = |steps: u32, denom: u32| -> Vec<Rgba<u8>> {
        (0..steps)
            .map(|i| from.lerp(to, i as f64 / denom as f64).with_alpha(opacity))
            .collect()
    };

    match direction {
        GradientDirection::Vertical => {
            let rows = table(height, height);
            RgbaImage::from_fn(width, height, |_, y| rows[y as usize])
        }
        GradientDirection::Horizontal => {
            let cols = table(width, width);
            RgbaImage::from_fn(width, height, |x, _| cols[x as usize])
        }
        GradientDirection::Diagonal => {
            let diagonals = table(width + height, width + height);
            RgbaImage::from_fn(width, height, |x, y| diagonals[(x + y) as usize])
        }
    }
}

/// Parameters for [`shadow`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowStyle {
    pub offset: u32,
    pub blur: f32,
    pub alpha: u8,
}

impl ShadowStyle {
    /// Soft shadow under collage cells.
    pub const COLLAGE: ShadowStyle = ShadowStyle {
        offset: 8,
        blur: 15.0,
        alpha: 80,
    };

    /// Stronger shadow under the small overlay photos.
    pub const OVERLAY: ShadowStyle = ShadowStyle {
        offset: 8,
        blur: 15.0,
        alpha: 120,
    };

    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        shadow(image, self.offset, self.blur, self.alpha)
    }
}

/// Drop shadow: a blurred dark rectangle offset down-right with the image
/// composited on top. Output grows by `2 * offset` in each dimension.
pub fn shadow(image: &RgbaImage, offset: u32, blur: f32, alpha: u8) -> RgbaImage {
    let (w, h) = image.dimensions();
    let mut layer = RgbaImage::new(w + offset * 2, h + offset * 2);
    let o = offset as i64;
    draw::fill_rect(&mut layer, o, o, w as i64 + o, h as i64 + o, Color::BLACK.with_alpha(alpha));

    let mut result = if blur > 0.0 {
        imageops::blur(&layer, blur)
    } else {
        layer
    };
    draw::composite(&mut result, image, o, o);
    result
}

/// Antialiased rounded-rectangle mask. The radius is capped at half the
/// shorter side; existing alpha is scaled by the mask coverage.
pub fn rounded_corners(image: &RgbaImage, radius: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let r = radius.min(w / 2).min(h / 2) as f64;
    let mut out = image.clone();
    if r <= 0.0 {
        return out;
    }
    let (wf, hf) = (w as f64, h as f64);

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        let in_corner_x = px < r || px > wf - r;
        let in_corner_y = py < r || py > hf - r;
        if !(in_corner_x && in_corner_y) {
            continue;
        }
        let cx = px.clamp(r, wf - r);
        let cy = py.clamp(r, hf - r);
        let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        let coverage = (r - dist + 0.5).clamp(0.0, 1.0);
        pixel.0[3] = (pixel.0[3] as f64 * coverage).round() as u8;
    }
    out
}

/// Pad the image on all sides by `width` pixels of `color`.
pub fn frame(image: &RgbaImage, color: Color, width: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let mut framed = RgbaImage::from_pixel(w + width * 2, h + width * 2, color.opaque());
    draw::paste(&mut framed, image, width as i64, width as i64);
    framed
}

/// Large faint circle top-right, smaller circle bottom-left, and thin
/// diagonal lines every 100px.
pub fn geometric_pattern(width: u32, height: u32, color: Color) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    let (w, h) = (width as i64, height as i64);
    let short = width.min(height) as f64;

    let big = (short * 0.4) as i64;
    draw::fill_ellipse(
        &mut layer,
        w - big - 50,
        (-big).div_euclid(2),
        w + 50,
        big / 2 + 50,
        color.with_alpha(40),
    );

    let small = (short * 0.25) as i64;
    draw::fill_ellipse(
        &mut layer,
        (-small).div_euclid(2),
        h - small - 50,
        small / 2 + 50,
        h + 50,
        color.with_alpha(50),
    );

    for i in (0..w).step_by(LINE_SPACING) {
        draw::draw_line(&mut layer, (i, 0), (i + h, h), 2, color.with_alpha(20));
    }
    layer
}

/// Three sine strokes at 0, h/3 and 2h/3.
pub fn wave_pattern(width: u32, height: u32, color: Color) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    let h = height as i64;

    for base in [0, h / 3, h * 2 / 3] {
        let points: Vec<(i64, i64)> = (0..width as i64 + 50)
            .step_by(WAVE_STEP)
            .map(|x| {
                let dy = (WAVE_AMPLITUDE * (x as f64 * WAVE_FREQUENCY).sin()) as i64;
                (x, base + dy)
            })
            .collect();
        draw::draw_polyline(&mut layer, &points, 3, color.with_alpha(30));
    }
    layer
}

/// 100 translucent dots placed by a generator seeded with `seed`; the same
/// seed always produces the same layer.
pub fn dots_pattern(width: u32, height: u32, color: Color, seed: u64) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..DOT_COUNT {
        let x = rng.random_range(0..=width as i64);
        let y = rng.random_range(0..=height as i64);
        let r = rng.random_range(5..=20i64);
        let opacity = rng.random_range(20..=60u8);
        draw::fill_ellipse(&mut layer, x - r, y - r, x + r, y + r, color.with_alpha(opacity));
    }
    layer
}

/// Render the pattern layer for `style`.
pub fn pattern(style: PatternStyle, width: u32, height: u32, color: Color, seed: u64) -> RgbaImage {
    match style {
        PatternStyle::Geometric => geometric_pattern(width, height, color),
        PatternStyle::Wave => wave_pattern(width, height, color),
        PatternStyle::Dots => dots_pattern(width, height, color, seed),
    }
}
