// src/engine/encoder.rs
//
// Encoding of finished compositions: PNG (optionally recompressed by oxipng)
// and JPEG with a quality setting.

use crate::error::{CollageError, Result};
use crate::ops::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::borrow::Cow;
use std::io::Cursor;

/// Lossless PNG. With the `png-optimize` feature the stream is recompressed
/// with oxipng; metadata chunks are kept.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| CollageError::encode_failed("png", format!("PNG encode failed: {e}")))?;

    #[cfg(feature = "png-optimize")]
    {
        let mut options = oxipng::Options::from_preset(2);
        options.strip = oxipng::StripChunks::None;
        buf = oxipng::optimize_from_memory(&buf, &options).map_err(|e| {
            CollageError::encode_failed("png", format!("oxipng optimization failed: {e}"))
        })?;
    }

    Ok(buf)
}

/// Baseline JPEG at `quality` (clamped to 1..=100). Alpha is dropped.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb: Cow<'_, RgbImage> = match img {
        DynamicImage::ImageRgb8(rgb) => Cow::Borrowed(rgb),
        other => Cow::Owned(other.to_rgb8()),
    };

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| CollageError::encode_failed("jpeg", format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

pub fn encode(img: &DynamicImage, format: &OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(img),
        OutputFormat::Jpeg { quality } => encode_jpeg(img, *quality),
    }
}
