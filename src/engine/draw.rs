// src/engine/draw.rs
//
// Raster primitives: opaque paste, alpha compositing, filled ellipses and
// thick lines on RGBA layers, and flattening onto an opaque background.
//
// Shapes drawn into a layer overwrite the pixels they cover; blending only
// happens when a finished layer is composited onto the canvas.

use crate::engine::color::Color;
use image::{imageops, Rgba, RgbImage, RgbaImage};

/// Copy `image` onto `canvas` at (x, y) without blending. Clipped at the edges.
pub fn paste(canvas: &mut RgbaImage, image: &RgbaImage, x: i64, y: i64) {
    imageops::replace(canvas, image, x, y);
}

/// Alpha-composite `layer` over `canvas` at (x, y) ("over" operator, respects
/// the alpha already on the canvas). Clipped at the edges.
pub fn composite(canvas: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, layer, x, y);
}

#[inline]
fn put(layer: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && x < layer.width() as i64 && y < layer.height() as i64 {
        layer.put_pixel(x as u32, y as u32, color);
    }
}

/// Fill the axis-aligned rectangle spanning (x0, y0)..=(x1, y1), clipped.
pub fn fill_rect(layer: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (w, h) = (layer.width() as i64, layer.height() as i64);
    let (xs, xe) = (x0.max(0), x1.min(w - 1));
    let (ys, ye) = (y0.max(0), y1.min(h - 1));
    for y in ys..=ye {
        for x in xs..=xe {
            layer.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Fill the ellipse inscribed in the bounding box (x0, y0)..=(x1, y1).
/// The box may extend past the layer; only the visible part is drawn.
pub fn fill_ellipse(layer: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    if x1 < x0 || y1 < y0 {
        return;
    }
    let (w, h) = (layer.width() as i64, layer.height() as i64);
    let cx = (x0 + x1) as f64 / 2.0;
    let cy = (y0 + y1) as f64 / 2.0;
    let rx = ((x1 - x0) as f64 / 2.0).max(0.5);
    let ry = ((y1 - y0) as f64 / 2.0).max(0.5);

    for y in y0.max(0)..=y1.min(h - 1) {
        let dy = (y as f64 - cy) / ry;
        let span = 1.0 - dy * dy;
        if span < 0.0 {
            continue;
        }
        let half = rx * span.sqrt();
        let xs = ((cx - half).ceil() as i64).max(0);
        let xe = ((cx + half).floor() as i64).min(w - 1);
        for x in xs..=xe {
            layer.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw a straight line `width` pixels thick from `from` to `to`.
///
/// Steps along the major axis and stamps a span of `width` pixels across
/// the minor axis at every step.
pub fn draw_line(layer: &mut RgbaImage, from: (i64, i64), to: (i64, i64), width: u32, color: Rgba<u8>) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).max(1);
    let thickness = width.max(1) as i64;
    let lo = -((thickness - 1) / 2);
    let hi = thickness / 2;
    let mostly_horizontal = dx.abs() >= dy.abs();

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (from.0 as f64 + dx as f64 * t).round() as i64;
        let y = (from.1 as f64 + dy as f64 * t).round() as i64;
        for o in lo..=hi {
            if mostly_horizontal {
                put(layer, x, y + o, color);
            } else {
                put(layer, x + o, y, color);
            }
        }
    }
}

/// Connect consecutive points with `draw_line`.
pub fn draw_polyline(layer: &mut RgbaImage, points: &[(i64, i64)], width: u32, color: Rgba<u8>) {
    for pair in points.windows(2) {
        draw_line(layer, pair[0], pair[1], width, color);
    }
}

/// Blend a channel over an opaque background channel.
#[inline]
fn blend_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255).min(255) as u8
}

/// Drop transparency by compositing onto a solid background.
pub fn flatten(image: &RgbaImage, background: Color) -> RgbImage {
    let bg = background.to_rgb().0;
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        image::Rgb([
            blend_channel(r, bg[0], a),
            blend_channel(g, bg[1], a),
            blend_channel(b, bg[2], a),
        ])
    })
}
