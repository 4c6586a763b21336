//! Error type shared by every engine operation.

use thiserror::Error;

/// Errors returned by the editing engine.
///
/// Every operation either returns a complete new buffer or one of these
/// errors; no partially written buffer is ever handed back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A required source image is absent (not loaded, or not supplied).
    #[error("Source image is not loaded")]
    NullSource,

    /// Width or height of a new buffer is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Crop rectangle is empty or reaches outside the source image.
    #[error(
        "Invalid crop region {width}x{height} at ({x}, {y}) for a {source_width}x{source_height} image"
    )]
    InvalidRegion {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        source_width: u32,
        source_height: u32,
    },

    /// Pixel coordinate outside the buffer.
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Collage requested with no images.
    #[error("Collage requires at least one image")]
    EmptyInput,

    /// Raw pixel data does not match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}
