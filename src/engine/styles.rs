// src/engine/styles.rs
//
// Design-mode presets. Each preset is data (backdrop, layout shape, framing);
// one renderer interprets all of them.

use crate::engine::color::{complementary_color, Color};
use crate::engine::decorate::{self, GradientDirection};
use crate::engine::draw;
use crate::engine::geometry::{thumbnail, CanvasSize, Rect};
use crate::engine::palette::extract_palette;
use crate::error::{CollageError, Result};
use crate::ops::Style;
use image::{DynamicImage, RgbaImage};
use tracing::debug;

const GOLD: Color = Color::rgb(210, 180, 140);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Backdrop {
    Solid(Color),
    /// Diagonal gradient from the first image's dominant color to its complement.
    PaletteGradient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameColor {
    Fixed(Color),
    /// The first image's dominant color.
    Accent,
}

/// Border drawn around a photo after it is thumbnailed into its box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    pub width: u32,
    /// Corner radius of the framed photo; 0 keeps square corners.
    pub radius: u32,
    pub color: FrameColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleLayout {
    /// Two side-by-side boxes, photos vertically centered.
    TwoUp,
    /// One photo centered on the canvas.
    Centered,
    /// Hero column on the left, three stacked boxes on the right.
    HeroColumn { hero_ratio: f64 },
    /// Hero row across the top, three boxes underneath.
    HeroRow { hero_ratio: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylePreset {
    pub style: Style,
    pub backdrop: Backdrop,
    pub layout: StyleLayout,
    pub margin: u32,
    pub spacing: u32,
    /// Colors sampled from the first image (0 when the preset uses none).
    pub palette_size: usize,
    /// Framing of the first photo.
    pub hero: Framing,
    /// Framing of every other photo.
    pub small: Framing,
}

pub const PRESETS: [StylePreset; 5] = [
    StylePreset {
        style: Style::ModernMinimal,
        backdrop: Backdrop::Solid(Color::WHITE),
        layout: StyleLayout::TwoUp,
        margin: 40,
        spacing: 40,
        palette_size: 1,
        hero: Framing { width: 8, radius: 0, color: FrameColor::Accent },
        small: Framing { width: 8, radius: 0, color: FrameColor::Accent },
    },
    StylePreset {
        style: Style::GradientLuxury,
        backdrop: Backdrop::PaletteGradient,
        layout: StyleLayout::Centered,
        margin: 40,
        spacing: 0,
        palette_size: 2,
        hero: Framing { width: 20, radius: 0, color: FrameColor::Fixed(Color::WHITE) },
        small: Framing { width: 20, radius: 0, color: FrameColor::Fixed(Color::WHITE) },
    },
    StylePreset {
        style: Style::ResortMountain,
        backdrop: Backdrop::Solid(Color::rgb(25, 60, 45)),
        layout: StyleLayout::HeroColumn { hero_ratio: 0.58 },
        margin: 30,
        spacing: 15,
        palette_size: 0,
        hero: Framing { width: 10, radius: 25, color: FrameColor::Fixed(Color::WHITE) },
        small: Framing { width: 8, radius: 20, color: FrameColor::Fixed(Color::WHITE) },
    },
    StylePreset {
        style: Style::EcoNature,
        backdrop: Backdrop::Solid(Color::rgb(40, 70, 50)),
        layout: StyleLayout::HeroColumn { hero_ratio: 0.60 },
        margin: 30,
        spacing: 15,
        palette_size: 0,
        hero: Framing { width: 12, radius: 30, color: FrameColor::Fixed(Color::WHITE) },
        small: Framing { width: 8, radius: 20, color: FrameColor::Fixed(Color::WHITE) },
    },
    StylePreset {
        style: Style::ModernEntrance,
        backdrop: Backdrop::Solid(Color::rgb(215, 230, 220)),
        layout: StyleLayout::HeroRow { hero_ratio: 0.55 },
        margin: 40,
        spacing: 20,
        palette_size: 0,
        hero: Framing { width: 15, radius: 25, color: FrameColor::Fixed(GOLD) },
        small: Framing { width: 10, radius: 20, color: FrameColor::Fixed(GOLD) },
    },
];

impl Style {
    pub fn preset(&self) -> &'static StylePreset {
        let index = match self {
            Style::ModernMinimal => 0,
            Style::GradientLuxury => 1,
            Style::ResortMountain => 2,
            Style::EcoNature => 3,
            Style::ModernEntrance => 4,
        };
        &PRESETS[index]
    }
}

/// How a framed photo sits inside its box. Framed photos may be larger than
/// the box; centering then goes negative and the photo overhangs evenly.
#[derive(Clone, Copy, Debug)]
enum Align {
    TopLeft,
    CenterVertically,
    CenterHorizontally,
    Center,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    bounds: Rect,
    align: Align,
}

impl Slot {
    fn origin(&self, framed_w: u32, framed_h: u32) -> (i64, i64) {
        let b = self.bounds;
        let dx = (b.width as i64 - framed_w as i64).div_euclid(2);
        let dy = (b.height as i64 - framed_h as i64).div_euclid(2);
        match self.align {
            Align::TopLeft => (b.x, b.y),
            Align::CenterVertically => (b.x, b.y + dy),
            Align::CenterHorizontally => (b.x + dx, b.y),
            Align::Center => (b.x + dx, b.y + dy),
        }
    }
}

/// Boxes for the first `image_count` photos. Only boxes that receive a
/// photo are validated.
fn slots(preset: &StylePreset, canvas: CanvasSize, image_count: usize) -> Result<Vec<Slot>> {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let m = preset.margin as i64;
    let s = preset.spacing as i64;

    let raw: Vec<(&'static str, [i64; 4], Align)> = match preset.layout {
        StyleLayout::TwoUp => {
            let aw = w - 2 * m - s;
            let half = aw.div_euclid(2);
            let ah = h - 2 * m;
            vec![
                ("two-up left", [m, m, half, ah], Align::CenterVertically),
                ("two-up right", [m + half + s, m, half, ah], Align::CenterVertically),
            ]
        }
        StyleLayout::Centered => vec![("centered", [m, m, w - 2 * m, h - 2 * m], Align::Center)],
        StyleLayout::HeroColumn { hero_ratio } => {
            let aw = w - 2 * m - s;
            let ah = h - 2 * m;
            let hero_w = (aw as f64 * hero_ratio) as i64;
            let small_w = aw - hero_w;
            let small_h = (ah - 2 * s).div_euclid(3);
            let small_x = m + hero_w + s;
            let mut v = vec![("hero column", [m, m, hero_w, ah], Align::CenterVertically)];
            v.extend((0..3).map(|i| {
                ("stacked small", [small_x, m + i * (small_h + s), small_w, small_h], Align::TopLeft)
            }));
            v
        }
        StyleLayout::HeroRow { hero_ratio } => {
            let aw = w - 2 * m;
            let ah = h - 2 * m - s;
            let top_h = (ah as f64 * hero_ratio) as i64;
            let bottom_h = ah - top_h;
            let bottom_w = (aw - 2 * s).div_euclid(3);
            let bottom_y = m + top_h + s;
            let mut v = vec![("hero row", [m, m, aw, top_h], Align::CenterHorizontally)];
            v.extend((0..3).map(|i| {
                ("bottom small", [m + i * (bottom_w + s), bottom_y, bottom_w, bottom_h], Align::TopLeft)
            }));
            v
        }
    };

    raw.into_iter()
        .take(image_count)
        .map(|(region, [x, y, bw, bh], align)| {
            Ok(Slot {
                bounds: Rect::checked(region, x, y, bw, bh)?,
                align,
            })
        })
        .collect()
}

/// Render `style` onto `canvas`. The first image drives the palette; photos
/// are shrunk (never enlarged) into their boxes, framed, optionally rounded,
/// and composited in order.
pub fn render_style(images: &[DynamicImage], style: Style, canvas: CanvasSize) -> Result<RgbaImage> {
    let first = images.first().ok_or_else(CollageError::no_valid_images)?;
    let preset = style.preset();
    let placed = slots(preset, canvas, images.len())?;

    let palette = if preset.palette_size > 0 {
        extract_palette(first, preset.palette_size)
    } else {
        Vec::new()
    };
    let accent = palette.first().copied().unwrap_or(Color::WHITE);
    debug!(
        target: "collage::layout",
        style = style.name(),
        width = canvas.width(),
        height = canvas.height(),
        photos = placed.len(),
        "rendering design"
    );

    let mut out = match preset.backdrop {
        Backdrop::Solid(color) => RgbaImage::from_pixel(canvas.width(), canvas.height(), color.opaque()),
        Backdrop::PaletteGradient => decorate::gradient(
            canvas.width(),
            canvas.height(),
            accent,
            complementary_color(accent),
            GradientDirection::Diagonal,
            255,
        ),
    };

    for (i, (slot, image)) in placed.iter().zip(images).enumerate() {
        let framing = if i == 0 { preset.hero } else { preset.small };
        let color = match framing.color {
            FrameColor::Fixed(c) => c,
            FrameColor::Accent => accent,
        };

        let fitted = thumbnail(image, slot.bounds.width, slot.bounds.height)?.to_rgba8();
        let mut framed = decorate::frame(&fitted, color, framing.width);
        if framing.radius > 0 {
            framed = decorate::rounded_corners(&framed, framing.radius);
        }
        let (x, y) = slot.origin(framed.width(), framed.height());
        draw::composite(&mut out, &framed, x, y);
    }

    Ok(out)
}
