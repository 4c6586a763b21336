//! Encoding of RGBA8 buffers for export.
//!
//! Uses the `image` crate's encoders. PNG and BMP keep the alpha channel;
//! JPEG has none, so alpha is discarded before encoding.

use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use super::CodecError;
use crate::buffer::{PixelBuffer, CHANNELS};

/// JPEG quality used when saving by file extension.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a buffer as PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(CodecError::Encode)?;
    Ok(out)
}

/// Encode a buffer as BMP.
pub fn encode_bmp(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    let mut out = Cursor::new(Vec::new());
    BmpEncoder::new(&mut out)
        .write_image(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(CodecError::Encode)?;
    Ok(out.into_inner())
}

/// Encode a buffer as JPEG.
///
/// # Arguments
///
/// * `buffer` - Image to encode; alpha is dropped
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for further editing
/// * 60-90: Good quality for sharing
/// * Below 60: Visible artifacts
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, CodecError> {
    let quality = quality.clamp(1, 100);

    let rgb: Vec<u8> = buffer
        .pixels()
        .chunks_exact(CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(&rgb, buffer.width(), buffer.height(), ExtendedColorType::Rgb8)
        .map_err(CodecError::Encode)?;
    Ok(out.into_inner())
}

/// Encode a buffer and write it to `path`.
///
/// The format is chosen from the extension: `.png`, `.jpg`/`.jpeg`
/// (quality [`DEFAULT_JPEG_QUALITY`]) or `.bmp`.
///
/// # Errors
///
/// - `CodecError::UnsupportedFormat` for any other extension
/// - `CodecError::Encode` if encoding fails
/// - `CodecError::Io` if the file cannot be written
pub fn save_image(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), CodecError> {
    let path = path.as_ref();
    let unsupported = || CodecError::UnsupportedFormat(path.to_path_buf());

    let bytes = match ImageFormat::from_path(path).map_err(|_| unsupported())? {
        ImageFormat::Png => encode_png(buffer)?,
        ImageFormat::Jpeg => encode_jpeg(buffer, DEFAULT_JPEG_QUALITY)?,
        ImageFormat::Bmp => encode_bmp(buffer)?,
        _ => return Err(unsupported()),
    };

    std::fs::write(path, &bytes).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba;
    use crate::codec::{decode_image, load_image};

    #[test]
    fn test_encode_png_magic() {
        let buf = PixelBuffer::allocate(10, 10, Rgba::WHITE).unwrap();
        let png = encode_png(&buf).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let buf = PixelBuffer::allocate(16, 16, Rgba::rgb(128, 128, 128)).unwrap();
        let jpeg = encode_jpeg(&buf, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_zero_is_clamped() {
        let buf = PixelBuffer::allocate(8, 8, Rgba::BLACK).unwrap();
        assert!(encode_jpeg(&buf, 0).is_ok());
    }

    #[test]
    fn test_jpeg_roundtrip_is_opaque_and_close() {
        let buf = PixelBuffer::allocate(16, 16, Rgba::new(200, 100, 50, 10)).unwrap();
        let decoded = decode_image(&encode_jpeg(&buf, 100).unwrap()).unwrap();

        assert_eq!(decoded.dimensions(), (16, 16));
        let px = decoded.get(8, 8).unwrap();
        assert_eq!(px.a, 255);
        assert!((px.r as i32 - 200).abs() <= 4);
        assert!((px.g as i32 - 100).abs() <= 4);
        assert!((px.b as i32 - 50).abs() <= 4);
    }

    #[test]
    fn test_save_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let buf = PixelBuffer::allocate(5, 3, Rgba::new(1, 2, 3, 4)).unwrap();

        let png = dir.path().join("out.png");
        save_image(&buf, &png).unwrap();
        assert_eq!(load_image(&png).unwrap(), buf);

        for name in ["out.bmp", "out.jpg", "out.jpeg"] {
            let path = dir.path().join(name);
            save_image(&buf, &path).unwrap();
            assert_eq!(load_image(&path).unwrap().dimensions(), (5, 3), "{name}");
        }
    }

    #[test]
    fn test_save_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let buf = PixelBuffer::allocate(2, 2, Rgba::WHITE).unwrap();

        let result = save_image(&buf, dir.path().join("out.xyz"));
        assert!(matches!(result, Err(CodecError::UnsupportedFormat(_))));

        let result = save_image(&buf, dir.path().join("no_extension"));
        assert!(matches!(result, Err(CodecError::UnsupportedFormat(_))));
    }
}
