// src/engine/color.rs
//
// 8-bit RGB color value and the arithmetic the decorations need.

use image::{Rgb, Rgba};

/// An opaque 8-bit RGB color. Alpha is supplied separately where a layer needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Spread between the strongest and weakest channel.
    pub fn variance(&self) -> u8 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        max - min
    }

    /// Not near-grayscale.
    pub fn is_vibrant(&self) -> bool {
        self.variance() > 30
    }

    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Linear interpolation; `ratio` 0.0 is `self`, 1.0 is `other`. Channels truncate.
    pub fn lerp(&self, other: Color, ratio: f64) -> Color {
        let ratio = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f64 * (1.0 - ratio) + b as f64 * ratio).clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_rgb(&self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    pub fn with_alpha(&self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }

    pub fn opaque(&self) -> Rgba<u8> {
        self.with_alpha(255)
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Color::rgb(c[0], c[1], c[2])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(p: Rgb<u8>) -> Self {
        Color::from(p.0)
    }
}

/// Second gradient stop derived from one extracted color: light colors get
/// darker by 40 per channel, dark colors get lighter by 60 per channel.
pub fn complementary_color(color: Color) -> Color {
    // average > 128  <=>  sum > 384
    if color.channel_sum() > 384 {
        Color::rgb(
            color.r.saturating_sub(40),
            color.g.saturating_sub(40),
            color.b.saturating_sub(40),
        )
    } else {
        Color::rgb(
            color.r.saturating_add(60),
            color.g.saturating_add(60),
            color.b.saturating_add(60),
        )
    }
}
