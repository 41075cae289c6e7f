// src/engine/resize.rs
//
// Lanczos resizing through fast_image_resize, with an image-crate fallback.

use crate::error::CollageError;
use fast_image_resize::{self as fir, ImageBufferError, MulDiv, PixelType, ResizeOptions};
use image::{imageops::FilterType, DynamicImage, RgbImage, RgbaImage};

#[derive(Debug)]
pub struct ResizeError {
    pub source_dims: (u32, u32),
    pub target_dims: (u32, u32),
    pub reason: String,
}

impl ResizeError {
    pub fn new(
        source_dims: (u32, u32),
        target_dims: (u32, u32),
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source_dims,
            target_dims,
            reason: reason.into(),
        }
    }

    pub fn into_collage_error(self) -> CollageError {
        CollageError::resize_failed(self.source_dims, self.target_dims, self.reason)
    }
}

fn lanczos() -> ResizeOptions {
    ResizeOptions::new().resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3))
}

/// Resize by reference. RGB and RGBA keep their layout; anything else becomes RGBA.
pub fn fast_resize(
    img: &DynamicImage,
    dst_width: u32,
    dst_height: u32,
) -> Result<DynamicImage, ResizeError> {
    let (pixel_type, pixels) = match img {
        DynamicImage::ImageRgb8(rgb) => (PixelType::U8x3, rgb.as_raw().clone()),
        DynamicImage::ImageRgba8(rgba) => (PixelType::U8x4, rgba.as_raw().clone()),
        other => (PixelType::U8x4, other.to_rgba8().into_raw()),
    };
    resize_pixels(img.width(), img.height(), pixels, pixel_type, dst_width, dst_height)
}

/// Resize taking ownership, which avoids copying RGB/RGBA pixel buffers.
pub fn fast_resize_owned(
    img: DynamicImage,
    dst_width: u32,
    dst_height: u32,
) -> Result<DynamicImage, ResizeError> {
    let (src_width, src_height) = (img.width(), img.height());
    let (pixel_type, pixels) = match img {
        DynamicImage::ImageRgb8(rgb) => (PixelType::U8x3, rgb.into_raw()),
        DynamicImage::ImageRgba8(rgba) => (PixelType::U8x4, rgba.into_raw()),
        other => (PixelType::U8x4, other.to_rgba8().into_raw()),
    };
    resize_pixels(src_width, src_height, pixels, pixel_type, dst_width, dst_height)
}

fn resize_pixels(
    src_width: u32,
    src_height: u32,
    mut pixels: Vec<u8>,
    pixel_type: PixelType,
    dst_width: u32,
    dst_height: u32,
) -> Result<DynamicImage, ResizeError> {
    let fail = |reason: String| {
        ResizeError::new((src_width, src_height), (dst_width, dst_height), reason)
    };

    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return Err(fail("invalid dimensions for resize".to_string()));
    }

    let required_bytes = (src_width as usize)
        .checked_mul(src_height as usize)
        .and_then(|n| n.checked_mul(pixel_type.size()))
        .ok_or_else(|| fail("image buffer size overflow during resize".to_string()))?;
    if pixels.len() < required_bytes {
        return Err(fail(format!(
            "source buffer too short: expected {required_bytes} bytes, got {}",
            pixels.len()
        )));
    }

    let primary = match fir::images::Image::from_slice_u8(
        src_width,
        src_height,
        pixels.as_mut_slice(),
        pixel_type,
    ) {
        Ok(src) => resize_with_fir(src, pixel_type, dst_width, dst_height),
        Err(ImageBufferError::InvalidBufferAlignment) => {
            let mut aligned = fir::images::Image::new(src_width, src_height, pixel_type);
            aligned
                .buffer_mut()
                .copy_from_slice(&pixels[..required_bytes]);
            resize_with_fir(aligned, pixel_type, dst_width, dst_height)
        }
        Err(other) => Err(format!("fir source image error: {other:?}")),
    };

    match primary {
        Ok(img) => Ok(img),
        Err(err) => resize_with_image_crate(&pixels, src_width, src_height, pixel_type, dst_width, dst_height)
            .map_err(|fallback| fail(format!("{err}; image crate fallback failed: {fallback}"))),
    }
}

fn resize_with_fir(
    mut src: fir::images::Image<'_>,
    pixel_type: PixelType,
    dst_width: u32,
    dst_height: u32,
) -> Result<DynamicImage, String> {
    let mut dst = fir::images::Image::new(dst_width, dst_height, pixel_type);

    // Premultiply so transparent pixels don't bleed color into their neighbours.
    let premultiply = matches!(pixel_type, PixelType::U8x4);
    let mul_div = MulDiv::default();
    if premultiply {
        mul_div
            .multiply_alpha_inplace(&mut src)
            .map_err(|e| format!("failed to premultiply alpha: {e}"))?;
    }

    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src, &mut dst, &lanczos())
        .map_err(|e| format!("fir resize error: {e:?}"))?;

    if premultiply {
        mul_div
            .divide_alpha_inplace(&mut dst)
            .map_err(|e| format!("failed to unpremultiply alpha: {e}"))?;
    }

    wrap_pixels(dst.into_vec(), pixel_type, dst_width, dst_height)
}

fn resize_with_image_crate(
    pixels: &[u8],
    src_width: u32,
    src_height: u32,
    pixel_type: PixelType,
    dst_width: u32,
    dst_height: u32,
) -> Result<DynamicImage, String> {
    let src = wrap_pixels(pixels.to_vec(), pixel_type, src_width, src_height)?;
    Ok(src.resize_exact(dst_width, dst_height, FilterType::Lanczos3))
}

fn wrap_pixels(
    pixels: Vec<u8>,
    pixel_type: PixelType,
    width: u32,
    height: u32,
) -> Result<DynamicImage, String> {
    match pixel_type {
        PixelType::U8x3 => RgbImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| "failed to build rgb image from resized data".to_string()),
        PixelType::U8x4 => RgbaImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| "failed to build rgba image from resized data".to_string()),
        _ => Err("unsupported pixel type".to_string()),
    }
}
