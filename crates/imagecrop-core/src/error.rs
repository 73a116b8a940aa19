//! Error types for boundary parsing and image probing.
//!
//! Interaction itself never fails: out-of-range rectangles are clamped by
//! [`contain`](crate::contain::contain). These errors only arise when
//! converting host input (strings, numbers, bytes) into core types.

use thiserror::Error;

/// Errors produced when converting external input into crop state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// A resize handle name other than `nw`, `ne`, `sw` or `se`.
    #[error("Invalid resize direction: {0}")]
    InvalidDirection(String),

    /// An aspect ratio that is zero, negative, NaN or infinite.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(String),

    /// The loaded image reported a zero dimension.
    #[error("Image has no area: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The image format could not be recognised from its bytes.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image header could not be read.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedImage(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
