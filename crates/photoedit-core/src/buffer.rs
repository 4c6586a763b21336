//! RGBA8 pixel buffer, the unit of exchange between all engine operations.
//!
//! All pixel addressing arithmetic lives here. Buffers are stored row-major
//! with 4 bytes per pixel (R, G, B, A) and the invariant
//! `pixels.len() == width * height * 4` holds for every constructed value.

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Bytes per RGBA8 sample.
pub const CHANNELS: usize = 4;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(value: [u8; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(value: Rgba) -> Self {
        value.to_array()
    }
}

/// A width x height grid of RGBA8 samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a new buffer with every sample set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidDimensions` if either dimension is zero.
    pub fn allocate(width: u32, height: u32, fill: Rgba) -> Result<Self, EditError> {
        if width == 0 || height == 0 {
            return Err(EditError::InvalidDimensions { width, height });
        }

        let pattern = fill.to_array();
        let len = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(len * CHANNELS);
        for _ in 0..len {
            pixels.extend_from_slice(&pattern);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing RGBA8 data.
    ///
    /// # Errors
    ///
    /// - `EditError::InvalidDimensions` if either dimension is zero
    /// - `EditError::InvalidPixelData` if `pixels.len() != width * height * 4`
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        if width == 0 || height == 0 {
            return Err(EditError::InvalidDimensions { width, height });
        }

        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(EditError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer from engine output whose size is already known to match.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "Zero-sized pixel buffer");
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, EditError> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }

    /// Convert to an `image::RgbaImage` for codec and resampling work.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its raw RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes of the row at `y`. `y` must be in range.
    #[inline]
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.pixels[start..start + self.stride()]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read the sample at `(x, y)` without a bounds check beyond the slice's own.
    #[inline]
    pub(crate) fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    fn checked_coords(&self, x: i32, y: i32) -> Result<(u32, u32), EditError> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(EditError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((x as u32, y as u32))
    }

    /// Read the color at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::OutOfBounds` if the coordinate is outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Result<Rgba, EditError> {
        let (x, y) = self.checked_coords(x, y)?;
        Ok(Rgba::from(self.sample(x, y)))
    }

    /// Overwrite the color at `(x, y)`.
    ///
    /// The bounds check runs before any write, so a failed call leaves the
    /// buffer untouched.
    ///
    /// # Errors
    ///
    /// Returns `EditError::OutOfBounds` if the coordinate is outside the buffer.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) -> Result<(), EditError> {
        let (x, y) = self.checked_coords(x, y)?;
        let idx = self.index(x, y);
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&color.to_array());
        Ok(())
    }

    /// Blend `color` over the pixel at `(x, y)` with its alpha scaled by
    /// `coverage`. Coordinates outside the buffer are ignored.
    pub(crate) fn blend(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if let Ok((x, y)) = self.checked_coords(x, y) {
            let idx = self.index(x, y);
            blend_over(&mut self.pixels[idx..idx + CHANNELS], color.to_array(), coverage);
        }
    }
}

/// Source-over composite of one straight-alpha RGBA sample onto `dst`.
///
/// The source alpha is multiplied by `coverage` (clamped to `[0, 1]`). A
/// fully opaque source replaces `dst` exactly; a fully transparent one
/// leaves it untouched.
pub(crate) fn blend_over(dst: &mut [u8], src: [u8; 4], coverage: f32) {
    let src_a = src[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    if src_a >= 1.0 {
        dst.copy_from_slice(&src);
        return;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for (d, &s) in dst[..3].iter_mut().zip(&src[..3]) {
        let value = (s as f32 * src_a + *d as f32 * dst_a * (1.0 - src_a)) / out_a;
        *d = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_over_opaque_replaces() {
        let mut dst = [10, 20, 30, 40];
        blend_over(&mut dst, [1, 2, 3, 255], 1.0);
        assert_eq!(dst, [1, 2, 3, 255]);
    }

    #[test]
    fn test_blend_over_transparent_keeps() {
        let mut dst = [10, 20, 30, 40];
        blend_over(&mut dst, [255, 255, 255, 0], 1.0);
        assert_eq!(dst, [10, 20, 30, 40]);
        blend_over(&mut dst, [255, 255, 255, 255], 0.0);
        assert_eq!(dst, [10, 20, 30, 40]);
    }

    #[test]
    fn test_blend_over_half_black_on_white() {
        let mut dst = [255, 255, 255, 255];
        blend_over(&mut dst, [0, 0, 0, 128], 1.0);
        assert_eq!(dst[3], 255);
        assert!((126..=128).contains(&dst[0]), "{dst:?}");
        assert_eq!(dst[0], dst[1]);
        assert_eq!(dst[1], dst[2]);
    }

    #[test]
    fn test_blend_over_onto_transparent_keeps_source() {
        let mut dst = [0, 0, 0, 0];
        blend_over(&mut dst, [200, 100, 50, 128], 1.0);
        assert_eq!(dst, [200, 100, 50, 128]);
    }

    #[test]
    fn test_blend_clips_outside() {
        let mut buf = PixelBuffer::allocate(2, 2, Rgba::WHITE).unwrap();
        let before = buf.clone();
        buf.blend(-1, 0, Rgba::BLACK, 1.0);
        buf.blend(0, 2, Rgba::BLACK, 1.0);
        assert_eq!(buf, before);

        buf.blend(1, 1, Rgba::BLACK, 1.0);
        assert_eq!(buf.get(1, 1).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn test_allocate_fills_every_sample() {
        let buf = PixelBuffer::allocate(3, 2, Rgba::WHITE).unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.pixels().len(), 3 * 2 * 4);
        assert!(buf.pixels().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_allocate_zero_dimensions() {
        assert_eq!(
            PixelBuffer::allocate(0, 5, Rgba::TRANSPARENT),
            Err(EditError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(PixelBuffer::allocate(5, 0, Rgba::TRANSPARENT).is_err());
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 12]).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidPixelData {
                expected: 16,
                actual: 12
            }
        );
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut buf = PixelBuffer::allocate(4, 4, Rgba::BLACK).unwrap();
        let color = Rgba::new(10, 20, 30, 40);
        buf.set(2, 3, color).unwrap();
        assert_eq!(buf.get(2, 3).unwrap(), color);
        assert_eq!(buf.get(3, 2).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let buf = PixelBuffer::allocate(4, 3, Rgba::BLACK).unwrap();
        assert!(matches!(buf.get(4, 0), Err(EditError::OutOfBounds { .. })));
        assert!(matches!(buf.get(0, 3), Err(EditError::OutOfBounds { .. })));
        assert!(matches!(buf.get(-1, 0), Err(EditError::OutOfBounds { .. })));
        assert!(matches!(buf.get(0, -1), Err(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn test_failed_set_does_not_mutate() {
        let mut buf = PixelBuffer::allocate(2, 2, Rgba::BLACK).unwrap();
        let before = buf.clone();
        assert!(buf.set(2, 0, Rgba::WHITE).is_err());
        assert_eq!(buf, before);
    }

    #[test]
    fn test_row_major_layout() {
        let mut buf = PixelBuffer::allocate(3, 2, Rgba::TRANSPARENT).unwrap();
        buf.set(1, 1, Rgba::new(1, 2, 3, 4)).unwrap();
        // (1, 1) -> (1 * 3 + 1) * 4 = 16
        assert_eq!(&buf.pixels()[16..20], &[1, 2, 3, 4]);
        assert_eq!(buf.row(1).len(), 12);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let mut buf = PixelBuffer::allocate(5, 7, Rgba::rgb(9, 8, 7)).unwrap();
        buf.set(4, 6, Rgba::new(1, 2, 3, 0)).unwrap();
        let img = buf.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (5, 7));
        assert_eq!(img.get_pixel(4, 6).0, [1, 2, 3, 0]);

        let back = PixelBuffer::from_rgba_image(img).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_rgba_array_conversion() {
        let color = Rgba::from([1, 2, 3, 4]);
        assert_eq!(color, Rgba::new(1, 2, 3, 4));
        let arr: [u8; 4] = color.into();
        assert_eq!(arr, [1, 2, 3, 4]);
        assert_eq!(Rgba::rgb(1, 2, 3).a, 255);
    }
}
