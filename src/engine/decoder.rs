// src/engine/decoder.rs
//
// Decoding of raw source buffers (JPEG, PNG, WebP) through the image crate.
// Headers are probed first so oversized images are rejected before any pixel
// buffer is allocated.

use crate::engine::limits::InputLimits;
use crate::engine::{MAX_DIMENSION, MAX_PIXELS};
use crate::error::{CollageError, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// Header-level facts about an encoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Reject dimensions past the global safety limits.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CollageError::dimension_exceeds_limit(
            width.max(height),
            MAX_DIMENSION,
        ));
    }
    let pixels = width as u64 * height as u64;
    if pixels > MAX_PIXELS {
        return Err(CollageError::pixel_count_exceeds_limit(pixels, MAX_PIXELS));
    }
    Ok(())
}

fn supported(format: ImageFormat) -> Result<ImageFormat> {
    match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP => Ok(format),
        other => Err(CollageError::unsupported_format(format!("{other:?}"))),
    }
}

/// Read format and dimensions from the header without decoding pixels.
pub fn inspect(bytes: &[u8]) -> Result<ImageInfo> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CollageError::decode_failed(format!("failed to read image header: {e}")))?;
    let format = reader
        .format()
        .ok_or_else(|| CollageError::unsupported_format("unknown"))
        .and_then(supported)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CollageError::decode_failed(format!("failed to read dimensions: {e}")))?;
    Ok(ImageInfo {
        width,
        height,
        format,
    })
}

/// Decode `bytes` after checking the buffer size, the header dimensions, and
/// the configured pixel budget.
pub fn decode_image(bytes: &[u8], limits: &InputLimits) -> Result<DynamicImage> {
    limits.enforce_source_len(bytes.len())?;
    let info = inspect(bytes)?;
    check_dimensions(info.width, info.height)?;
    limits.enforce_pixels(info.width, info.height)?;

    image::load_from_memory_with_format(bytes, info.format)
        .map_err(|e| CollageError::decode_failed(format!("decode failed: {e}")))
}
