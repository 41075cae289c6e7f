// src/engine/limits.rs
//
// Input limits: how many images a request may carry and how large each
// source may be before and after decoding.

use crate::error::{CollageError, Result};

/// Most source images a single composition accepts.
pub const MAX_IMAGES: usize = 6;

const STRICT_MAX_PIXELS: u64 = 40_000_000; // ~8K x 5K
const LENIENT_MAX_PIXELS: u64 = 75_000_000; // below the global MAX_PIXELS
const STRICT_MAX_BYTES: u64 = 32 * 1024 * 1024;
const LENIENT_MAX_BYTES: u64 = 48 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitPolicy {
    Disabled,
    Strict,
    Lenient,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLimits {
    pub policy: LimitPolicy,
    pub max_images: usize,
    pub max_bytes: Option<u64>,
    pub max_pixels: Option<u64>,
}

impl Default for InputLimits {
    /// Lenient limits with the six-image cap.
    fn default() -> Self {
        Self::lenient()
    }
}

impl InputLimits {
    /// No byte or pixel caps. The image count is still capped.
    pub fn disabled() -> Self {
        Self {
            policy: LimitPolicy::Disabled,
            max_images: MAX_IMAGES,
            max_bytes: None,
            max_pixels: None,
        }
    }

    pub fn strict() -> Self {
        Self {
            policy: LimitPolicy::Strict,
            max_images: MAX_IMAGES,
            max_bytes: Some(STRICT_MAX_BYTES),
            max_pixels: Some(STRICT_MAX_PIXELS),
        }
    }

    pub fn lenient() -> Self {
        Self {
            policy: LimitPolicy::Lenient,
            max_images: MAX_IMAGES,
            max_bytes: Some(LENIENT_MAX_BYTES),
            max_pixels: Some(LENIENT_MAX_PIXELS),
        }
    }

    pub fn apply_policy(policy: LimitPolicy) -> Self {
        match policy {
            LimitPolicy::Disabled => Self::disabled(),
            LimitPolicy::Strict => Self::strict(),
            LimitPolicy::Lenient => Self::lenient(),
        }
    }

    pub fn enforce_image_count(&self, count: usize) -> Result<()> {
        if count > self.max_images {
            return Err(CollageError::too_many_images(count, self.max_images));
        }
        Ok(())
    }

    pub fn enforce_source_len(&self, len: usize) -> Result<()> {
        if let Some(limit) = self.max_bytes {
            let len = len as u64;
            if len > limit {
                return Err(CollageError::input_too_large(len, limit));
            }
        }
        Ok(())
    }

    pub fn enforce_pixels(&self, width: u32, height: u32) -> Result<()> {
        if let Some(limit) = self.max_pixels {
            let pixels = width as u64 * height as u64;
            if pixels > limit {
                return Err(CollageError::pixel_count_exceeds_limit(pixels, limit));
            }
        }
        Ok(())
    }
}
