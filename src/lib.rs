// lib.rs
//
// collage-engine: composes one picture from a handful of photos
//
// Design goals:
// - Fixed, deterministic template geometry
// - Color-matched decoration taken from the photos themselves
// - Reproducible output when the random source is seeded
// - No I/O in the core; callers bring bytes or decoded images

pub mod engine;
pub mod error;
pub mod ops;

pub use engine::{
    collect_images, compose, compose_batch, decode_image, encode, BatchJob, CanvasSize,
    ComposeConfig, Composer, Composition, CompositionMode, ImageFetcher, InputLimits,
};
pub use error::{CollageError, ErrorCategory, Result};
pub use ops::{
    canvas_from_preset, DesignFormat, OutputFormat, OverlayAspect, PatternSelector, PatternStyle,
    Style, StyleSelector, Template, TemplateSelector,
};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Formats accepted by [`decode_image`].
pub fn supported_input_formats() -> &'static [&'static str] {
    &["jpeg", "png", "webp"]
}

/// Formats produced by [`encode`].
pub fn supported_output_formats() -> &'static [&'static str] {
    &["png", "jpeg"]
}
