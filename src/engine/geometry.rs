// src/engine/geometry.rs
//
// Canvas/rectangle types and the fit utilities: cover crop, contain fit, thumbnail.

use crate::engine::color::Color;
use crate::engine::draw;
use crate::engine::resize::{fast_resize, fast_resize_owned, ResizeError};
use crate::error::{CollageError, Result};
use image::{DynamicImage, RgbaImage};
use std::borrow::Cow;

/// Output canvas dimensions. Both sides are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::fixed(1024, 768)
    }
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CollageError::invalid_canvas_size(width, height));
        }
        Ok(Self { width, height })
    }

    /// Compile-time presets; zero sides are bumped to 1.
    pub(crate) const fn fixed(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Uniformly shrink so neither side exceeds `max_dimension`. Sizes already
    /// within bounds are returned unchanged; sides truncate but never reach 0.
    pub fn clamped(self, max_dimension: u32) -> Self {
        let max_dimension = max_dimension.max(1);
        if self.width <= max_dimension && self.height <= max_dimension {
            return self;
        }
        // The longer side binds; integer math keeps it at exactly max_dimension.
        let (w, h, max) = (self.width as u64, self.height as u64, max_dimension as u64);
        let (width, height) = if w >= h {
            (max, h * max / w)
        } else {
            (w * max / h, max)
        };
        Self {
            width: (width as u32).max(1),
            height: (height as u32).max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Axis-aligned region in canvas pixel coordinates. Origins may be negative
/// (content hanging off the canvas edge gets clipped when pasted).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rect from signed extents, rejecting non-positive sizes.
    pub fn checked(region: &'static str, x: i64, y: i64, width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
            return Err(CollageError::invalid_geometry(region, width, height));
        }
        Ok(Self::new(x, y, width as u32, height as u32))
    }

    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// One cell of a template: where it goes and which source image fills it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub rect: Rect,
    pub image_index: usize,
}

/// Centered crop window (in source coordinates) whose aspect ratio matches
/// `target_w:target_h`. Only the relatively longer source side is cropped.
pub fn cover_crop_rect(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> Rect {
    let (sw, sh) = (src_w.max(1) as u64, src_h.max(1) as u64);
    let (tw, th) = (target_w.max(1) as u64, target_h.max(1) as u64);

    if sw * th > sh * tw {
        // source is wider than target: trim left and right
        let new_w = (sh * tw / th).clamp(1, sw);
        let left = (sw - new_w) / 2;
        Rect::new(left as i64, 0, new_w as u32, sh as u32)
    } else {
        // source is taller (or equal): trim top and bottom
        let new_h = (sw * th / tw).clamp(1, sh);
        let top = (sh - new_h) / 2;
        Rect::new(0, top as i64, sw as u32, new_h as u32)
    }
}

/// Largest size within `max_w` x `max_h` preserving aspect ratio, never
/// enlarging the source. Sides round to nearest and stay at least 1.
pub fn fit_inside_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }
    let ratio = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * ratio).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * ratio).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

/// Fill exactly `target_w` x `target_h`: centered crop to the target aspect,
/// then a Lanczos resize. Nothing is distorted and no background shows.
pub fn cover_crop(image: &DynamicImage, target_w: u32, target_h: u32) -> Result<DynamicImage> {
    if target_w == 0 || target_h == 0 {
        return Err(CollageError::invalid_geometry(
            "cover crop target",
            target_w as i64,
            target_h as i64,
        ));
    }

    let window = cover_crop_rect(image.width(), image.height(), target_w, target_h);
    let full = window.width == image.width() && window.height == image.height();
    let cropped: Cow<'_, DynamicImage> = if full {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(image.crop_imm(window.x as u32, window.y as u32, window.width, window.height))
    };

    if cropped.width() == target_w && cropped.height() == target_h {
        return Ok(cropped.into_owned());
    }

    match cropped {
        Cow::Borrowed(img) => fast_resize(img, target_w, target_h),
        Cow::Owned(img) => fast_resize_owned(img, target_w, target_h),
    }
    .map_err(ResizeError::into_collage_error)
}

/// Shrink to fit inside `max_w` x `max_h`, preserving aspect ratio. Images
/// already inside the box are returned as-is.
pub fn thumbnail(image: &DynamicImage, max_w: u32, max_h: u32) -> Result<DynamicImage> {
    if max_w == 0 || max_h == 0 {
        return Err(CollageError::invalid_geometry(
            "thumbnail box",
            max_w as i64,
            max_h as i64,
        ));
    }
    let (w, h) = fit_inside_dimensions(image.width(), image.height(), max_w, max_h);
    if (w, h) == (image.width(), image.height()) {
        return Ok(image.clone());
    }
    fast_resize(image, w, h).map_err(ResizeError::into_collage_error)
}

/// Letterbox: the whole image, shrunk to fit, centered on a solid
/// `target_w` x `target_h` background.
pub fn contain_fit(
    image: &DynamicImage,
    target_w: u32,
    target_h: u32,
    background: Color,
) -> Result<DynamicImage> {
    let fitted = thumbnail(image, target_w, target_h)?.to_rgba8();
    let mut canvas = RgbaImage::from_pixel(target_w, target_h, background.opaque());
    let x = (target_w - fitted.width()) / 2;
    let y = (target_h - fitted.height()) / 2;
    draw::composite(&mut canvas, &fitted, x as i64, y as i64);
    Ok(DynamicImage::ImageRgba8(canvas))
}
