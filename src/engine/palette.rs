// src/engine/palette.rs
//
// Frequency-based palette extraction: downsample, quantize, count, prefer vibrant.

use crate::engine::color::Color;
use image::{DynamicImage, RgbImage};
use std::collections::HashMap;

/// Images are downsampled to fit this box before counting.
const SAMPLE_MAX_SIDE: u32 = 150;

/// Channel bucket width.
const QUANTIZE_STEP: u8 = 30;

/// Candidates considered per requested color.
const CANDIDATES_PER_COLOR: usize = 3;

/// Extract up to `count` representative colors, most frequent first.
///
/// Vibrant buckets (channel spread > 30) win over near-gray ones; grays only
/// backfill when too few vibrant candidates exist. Ties in frequency keep the
/// row-major order in which buckets were first seen, so identical input always
/// yields an identical palette.
pub fn extract_palette(image: &DynamicImage, count: usize) -> Vec<Color> {
    if count == 0 || image.width() == 0 || image.height() == 0 {
        return Vec::new();
    }

    let sample = downsample(image);
    let ranked = rank_buckets(&sample);
    let window = ranked.len().min(count.saturating_mul(CANDIDATES_PER_COLOR));
    let candidates = &ranked[..window];

    let mut palette: Vec<Color> = Vec::with_capacity(count);
    for &(color, _) in candidates {
        if palette.len() >= count {
            break;
        }
        if color.is_vibrant() {
            palette.push(color);
        }
    }

    for &(color, _) in candidates {
        if palette.len() >= count {
            break;
        }
        if !palette.contains(&color) {
            palette.push(color);
        }
    }

    palette
}

fn downsample(image: &DynamicImage) -> RgbImage {
    if image.width() <= SAMPLE_MAX_SIDE && image.height() <= SAMPLE_MAX_SIDE {
        return image.to_rgb8();
    }
    // DynamicImage::thumbnail preserves aspect ratio and only ever shrinks here.
    image.thumbnail(SAMPLE_MAX_SIDE, SAMPLE_MAX_SIDE).to_rgb8()
}

#[inline]
fn quantize(channel: u8) -> u8 {
    (channel / QUANTIZE_STEP) * QUANTIZE_STEP
}

/// Buckets sorted by descending frequency; stable, so ties stay in first-seen order.
fn rank_buckets(sample: &RgbImage) -> Vec<(Color, usize)> {
    let mut index: HashMap<Color, usize> = HashMap::new();
    let mut buckets: Vec<(Color, usize)> = Vec::new();

    for pixel in sample.pixels() {
        let [r, g, b] = pixel.0;
        let bucket = Color::rgb(quantize(r), quantize(g), quantize(b));
        match index.get(&bucket) {
            Some(&slot) => buckets[slot].1 += 1,
            None => {
                index.insert(bucket, buckets.len());
                buckets.push((bucket, 1));
            }
        }
    }

    buckets.sort_by(|a, b| b.1.cmp(&a.1));
    buckets
}
