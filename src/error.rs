// src/error.rs
//
// Unified error handling for collage-engine
// Uses thiserror for simple, type-safe error handling
//
// Error Taxonomy:
// - UserError: Invalid input, recoverable
// - CodecError: Format/encoding issues
// - ResourceLimit: Memory/dimension/count limits
// - InternalBug: Library bugs (should not happen)

use std::borrow::Cow;
use thiserror::Error;

/// Error taxonomy used by callers to map failures onto their own transport.
///
/// - UserError: Invalid input, recoverable by user
/// - CodecError: Format/encoding issues
/// - ResourceLimit: Memory/dimension/count limits
/// - InternalBug: Library bugs (should not happen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Invalid input, recoverable by user
    UserError,
    /// Format/encoding issues
    CodecError,
    /// Memory/dimension/count limits
    ResourceLimit,
    /// Library bugs (should not happen)
    InternalBug,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::UserError => "UserError",
            ErrorCategory::CodecError => "CodecError",
            ErrorCategory::ResourceLimit => "ResourceLimit",
            ErrorCategory::InternalBug => "InternalBug",
        }
    }

    /// Stable machine-readable code for this category
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCategory::UserError => "COLLAGE_USER_ERROR",
            ErrorCategory::CodecError => "COLLAGE_CODEC_ERROR",
            ErrorCategory::ResourceLimit => "COLLAGE_RESOURCE_LIMIT",
            ErrorCategory::InternalBug => "COLLAGE_INTERNAL_BUG",
        }
    }
}

/// collage-engine error types
#[derive(Debug, Clone, Error)]
pub enum CollageError {
    // Composition Errors
    #[error("No valid images to create collage")]
    NoValidImages,

    #[error("Invalid geometry for {region}: {width}x{height} (canvas too small for margins/spacing)")]
    InvalidGeometry {
        region: Cow<'static, str>,
        width: i64,
        height: i64,
    },

    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    // Fetch Errors
    #[error("Failed to fetch image from '{url}': {message}")]
    FetchFailed {
        url: Cow<'static, str>,
        message: Cow<'static, str>,
    },

    // Decode Errors
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: Cow<'static, str> },

    #[error("Failed to decode image: {message}")]
    DecodeFailed { message: Cow<'static, str> },

    // Size Limit Errors
    #[error("Image dimension {dimension} exceeds maximum {max}")]
    DimensionExceedsLimit { dimension: u32, max: u32 },

    #[error("Image pixel count {pixels} exceeds maximum {max}")]
    PixelCountExceedsLimit { pixels: u64, max: u64 },

    #[error("Input size {bytes} bytes exceeds limit of {max} bytes")]
    InputTooLarge { bytes: u64, max: u64 },

    #[error("Maximum {max} images allowed, got {count}")]
    TooManyImages { count: usize, max: usize },

    // Operation Errors
    #[error("Resize failed ({source_width}x{source_height} -> {target_width}x{target_height}): {message}")]
    ResizeFailed {
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
        message: Cow<'static, str>,
    },

    // Encode Errors
    #[error("Failed to encode as {format}: {message}")]
    EncodeFailed {
        format: Cow<'static, str>,
        message: Cow<'static, str>,
    },

    // Configuration Errors
    #[error("Invalid value for {name}: {value}. {reason}")]
    InvalidArgument {
        name: Cow<'static, str>,
        value: Cow<'static, str>,
        reason: Cow<'static, str>,
    },

    // Internal Errors
    #[error("Internal error: {message}")]
    Internal { message: Cow<'static, str> },
}

// Constructor Helpers
impl CollageError {
    pub fn no_valid_images() -> Self {
        Self::NoValidImages
    }

    pub fn invalid_geometry(region: impl Into<Cow<'static, str>>, width: i64, height: i64) -> Self {
        Self::InvalidGeometry {
            region: region.into(),
            width,
            height,
        }
    }

    pub fn invalid_canvas_size(width: u32, height: u32) -> Self {
        Self::InvalidCanvasSize { width, height }
    }

    pub fn fetch_failed(
        url: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn decode_failed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn dimension_exceeds_limit(dimension: u32, max: u32) -> Self {
        Self::DimensionExceedsLimit { dimension, max }
    }

    pub fn pixel_count_exceeds_limit(pixels: u64, max: u64) -> Self {
        Self::PixelCountExceedsLimit { pixels, max }
    }

    pub fn input_too_large(bytes: u64, max: u64) -> Self {
        Self::InputTooLarge { bytes, max }
    }

    pub fn too_many_images(count: usize, max: usize) -> Self {
        Self::TooManyImages { count, max }
    }

    pub fn resize_failed(
        source_dims: (u32, u32),
        target_dims: (u32, u32),
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::ResizeFailed {
            source_width: source_dims.0,
            source_height: source_dims.1,
            target_width: target_dims.0,
            target_height: target_dims.1,
            message: message.into(),
        }
    }

    pub fn encode_failed(
        format: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (user can fix it)
    ///
    /// Consistent with category(): UserError and ResourceLimit are recoverable,
    /// CodecError and InternalBug are not.
    pub fn is_recoverable(&self) -> bool {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::ResourceLimit => true,
            ErrorCategory::CodecError | ErrorCategory::InternalBug => false,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoValidImages
            | Self::InvalidGeometry { .. }
            | Self::InvalidCanvasSize { .. }
            | Self::FetchFailed { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::UserError,

            // ResizeFailed is a processing failure during transformation and is
            // grouped with the codec failures.
            Self::UnsupportedFormat { .. }
            | Self::DecodeFailed { .. }
            | Self::EncodeFailed { .. }
            | Self::ResizeFailed { .. } => ErrorCategory::CodecError,

            Self::DimensionExceedsLimit { .. }
            | Self::PixelCountExceedsLimit { .. }
            | Self::InputTooLarge { .. }
            | Self::TooManyImages { .. } => ErrorCategory::ResourceLimit,

            Self::Internal { .. } => ErrorCategory::InternalBug,
        }
    }
}

// Result type alias
pub type Result<T> = std::result::Result<T, CollageError>;
