//! Conversion between encoded image files and [`PixelBuffer`]s.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and BMP data into RGBA8 buffers
//! - Encoding buffers back to PNG (lossless, keeps alpha) or JPEG (drops alpha)
//! - Reading and writing image files, picking the format from the extension
//!
//! The editing engine itself is format-agnostic; everything here is glue for
//! callers that hold images on disk or in memory.
//!
//! # Examples
//!
//! ```ignore
//! use photoedit_core::codec::{load_image, save_image};
//! use photoedit_core::filters::apply_brightness;
//!
//! let image = load_image("photo.jpg")?;
//! save_image(&apply_brightness(&image, 1.2), "photo-bright.png")?;
//! ```
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod decode;
mod encode;

use std::path::PathBuf;

use thiserror::Error;

use crate::error::EditError;

pub use decode::{decode_image, load_image};
pub use encode::{encode_bmp, encode_jpeg, encode_png, save_image, DEFAULT_JPEG_QUALITY};

/// Errors raised while decoding, encoding or touching image files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a supported or intact image.
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The encoder rejected the image.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The file extension does not name a supported output format.
    #[error("Unsupported image format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decoded image cannot be represented as a pixel buffer.
    #[error(transparent)]
    Buffer(#[from] EditError),
}
