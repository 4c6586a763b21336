//! Rectangular cropping in pixel coordinates.
//!
//! The crop region is an axis-aligned rectangle `[x, x + width) x
//! [y, y + height)` that must lie entirely inside the source. Pixels are
//! copied position-for-position, so no resampling takes place.
//!
//! # Example
//!
//! ```ignore
//! // Keep the 50x50 block whose top-left corner is at (10, 20)
//! let cropped = crop(&image, 10, 20, 50, 50)?;
//! ```

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::EditError;

/// Extract a rectangular region as a new buffer.
///
/// # Arguments
///
/// * `image` - Source image
/// * `x`, `y` - Top-left corner of the region
/// * `width`, `height` - Size of the region in pixels
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` when the region has a negative origin,
/// a non-positive size, or reaches past the right or bottom edge.
///
/// # Example
///
/// ```
/// use photoedit_core::{PixelBuffer, Rgba};
/// use photoedit_core::transform::crop;
///
/// let image = PixelBuffer::allocate(100, 100, Rgba::WHITE).unwrap();
/// let cropped = crop(&image, 25, 25, 50, 50).unwrap();
/// assert_eq!(cropped.dimensions(), (50, 50));
/// ```
pub fn crop(
    image: &PixelBuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> Result<PixelBuffer, EditError> {
    let invalid = || EditError::InvalidRegion {
        x,
        y,
        width,
        height,
        source_width: image.width(),
        source_height: image.height(),
    };

    if x < 0 || y < 0 || width <= 0 || height <= 0 {
        return Err(invalid());
    }
    // i64 so that x + width cannot overflow
    if x as i64 + width as i64 > image.width() as i64
        || y as i64 + height as i64 > image.height() as i64
    {
        return Err(invalid());
    }

    let (left, top) = (x as u32, y as u32);
    let (out_width, out_height) = (width as u32, height as u32);

    // Fast path: full crop returns a clone
    if out_width == image.width() && out_height == image.height() {
        return Ok(image.clone());
    }

    let start = left as usize * CHANNELS;
    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for src_y in top..top + out_height {
        output.extend_from_slice(&image.row(src_y)[start..start + row_bytes]);
    }

    Ok(PixelBuffer::from_parts(out_width, out_height, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop(&img, 0, 0, 100, 100).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop(&img, 2, 2, 6, 6).unwrap();

        assert_eq!(result.dimensions(), (6, 6));
        // Value at (2, 2) = 2 * 10 + 2 = 22
        assert_eq!(result.pixels()[0], 22);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = crop(&img, 3, 4, 5, 2).unwrap();

        for y in 0..2 {
            for x in 0..5 {
                assert_eq!(
                    result.get(x, y).unwrap(),
                    img.get(x + 3, y + 4).unwrap(),
                    "mismatch at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_crop_single_pixel() {
        let mut img = test_image(8, 8);
        img.set(7, 7, Rgba::new(1, 2, 3, 4)).unwrap();
        let result = crop(&img, 7, 7, 1, 1).unwrap();
        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.get(0, 0).unwrap(), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_crop_rectangular_strip() {
        let img = test_image(200, 100);
        let result = crop(&img, 0, 0, 50, 100).unwrap();
        assert_eq!(result.dimensions(), (50, 100));
    }

    #[test]
    fn test_crop_past_right_edge() {
        let img = test_image(10, 10);
        assert!(matches!(
            crop(&img, 5, 0, 6, 5),
            Err(EditError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_crop_past_bottom_edge() {
        let img = test_image(10, 10);
        assert!(matches!(
            crop(&img, 0, 9, 1, 2),
            Err(EditError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_crop_negative_origin() {
        let img = test_image(10, 10);
        assert!(crop(&img, -1, 0, 5, 5).is_err());
        assert!(crop(&img, 0, -1, 5, 5).is_err());
    }

    #[test]
    fn test_crop_non_positive_size() {
        let img = test_image(10, 10);
        assert!(crop(&img, 0, 0, 0, 5).is_err());
        assert!(crop(&img, 0, 0, 5, 0).is_err());
        assert!(crop(&img, 0, 0, -5, 5).is_err());
    }

    #[test]
    fn test_crop_overflowing_extent() {
        let img = test_image(10, 10);
        assert!(crop(&img, i32::MAX, 0, i32::MAX, 1).is_err());
    }

    #[test]
    fn test_crop_error_carries_region() {
        let img = test_image(12, 8);
        let err = crop(&img, 4, 1, 9, 2).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidRegion {
                x: 4,
                y: 1,
                width: 9,
                height: 2,
                source_width: 12,
                source_height: 8,
            }
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
