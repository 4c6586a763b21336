//! Decoding of raster files into RGBA8 buffers.

use std::path::Path;

use super::CodecError;
use crate::buffer::PixelBuffer;

/// Decode an encoded image (PNG, JPEG, BMP) from bytes.
///
/// The format is detected from the data. Grayscale, RGB and 16-bit sources
/// are converted to RGBA8; images without alpha become fully opaque.
///
/// # Errors
///
/// Returns `CodecError::Decode` if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let img = image::load_from_memory(bytes).map_err(CodecError::Decode)?;
    Ok(PixelBuffer::from_rgba_image(img.to_rgba8())?)
}

/// Read and decode an image file.
///
/// # Errors
///
/// - `CodecError::Io` if the file cannot be read
/// - `CodecError::Decode` if its contents are not a supported image
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelBuffer, CodecError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let buffer = decode_image(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "loaded image"
    );
    Ok(buffer)
}
