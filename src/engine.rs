// src/engine.rs
//
// The core of collage-engine. A one-way composition pipeline:
// 1. Decode source buffers (or receive decoded images)
// 2. Extract palettes and compute template geometry
// 3. Crop, decorate and composite every cell onto one canvas
//
// This file is a facade over the decomposed modules in engine/

// =============================================================================
// SECURITY LIMITS
// =============================================================================

/// Maximum allowed source image dimension (width or height).
/// Images larger than 32768x32768 are rejected to prevent decompression bombs.
pub const MAX_DIMENSION: u32 = 32768;

/// Maximum allowed total source pixels (width * height).
/// 100 megapixels = 400MB uncompressed RGBA.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Default cap on the longer side of a collage canvas.
pub const DEFAULT_MAX_CANVAS_DIMENSION: u32 = 1024;

// =============================================================================
// MODULE DECOMPOSITION
// =============================================================================

mod color;
mod compose;
mod decorate;
mod decoder;
mod draw;
mod encoder;
mod fetch;
mod geometry;
mod layout;
mod limits;
mod overlay;
mod palette;
mod pool;
mod resize;
mod select;
mod styles;

pub use color::{complementary_color, Color};
pub use compose::{
    compose, compose_batch, BatchJob, ComposeConfig, Composer, Composition, CompositionMode,
};
pub use decorate::{
    dots_pattern, frame, geometric_pattern, gradient, pattern, rounded_corners, shadow,
    wave_pattern, GradientDirection, ShadowStyle, DEFAULT_DOTS_SEED,
};
pub use decoder::{check_dimensions, decode_image, inspect, ImageInfo};
pub use draw::flatten;
pub use encoder::{encode, encode_jpeg, encode_png};
pub use fetch::{collect_images, DecodingFetcher, ImageFetcher};
pub use geometry::{
    contain_fit, cover_crop, cover_crop_rect, fit_inside_dimensions, thumbnail, CanvasSize,
    Placement, Rect,
};
pub use layout::{plan, render_collage, LayoutConfig};
pub use limits::{InputLimits, LimitPolicy, MAX_IMAGES};
pub use overlay::{overlay_positions, render_overlay, small_image_size, OverlayConfig};
pub use palette::extract_palette;
pub use resize::{fast_resize, fast_resize_owned, ResizeError};
pub use select::{select_pattern, select_style, select_template};
pub use styles::{render_style, Backdrop, FrameColor, Framing, StyleLayout, StylePreset, PRESETS};
