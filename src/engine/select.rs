// src/engine/select.rs
//
// Automatic template, style and pattern selection. Randomness is always
// injected so seeded callers get reproducible picks.

use crate::ops::{PatternStyle, Style, Template};
use rand::Rng;

/// Template for `image_count` images: up to two get a split, three or four get
/// a coin flip between hero grid and 2x2 grid, five or more get masonry.
pub fn select_template<R: Rng + ?Sized>(image_count: usize, rng: &mut R) -> Template {
    const FOUR_UP: [Template; 2] = [Template::HeroGrid, Template::Grid];

    if image_count <= Template::Split.ideal_images() {
        Template::Split
    } else if image_count <= Template::Grid.ideal_images() {
        FOUR_UP[rng.random_range(0..FOUR_UP.len())]
    } else {
        Template::Masonry
    }
}

/// Uniform among the design presets.
pub fn select_style<R: Rng + ?Sized>(rng: &mut R) -> Style {
    Style::ALL[rng.random_range(0..Style::ALL.len())]
}

/// Uniform among geometric, wave and dots.
pub fn select_pattern<R: Rng + ?Sized>(rng: &mut R) -> PatternStyle {
    PatternStyle::ALL[rng.random_range(0..PatternStyle::ALL.len())]
}
