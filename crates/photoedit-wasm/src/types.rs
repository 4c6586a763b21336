//! WASM-compatible wrapper types for image data.
//!
//! This module provides the JavaScript-facing pixel buffer and the error
//! conversion shared by every binding.

use photoedit_core::{PixelBuffer, Rgba};
use wasm_bindgen::prelude::*;

/// An RGBA8 image wrapper for JavaScript.
///
/// Wraps the core `PixelBuffer`, so every instance holds a valid image:
/// non-zero dimensions and exactly `width * height * 4` bytes.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it into a
/// JavaScript `Uint8Array`; keep images in WASM memory between operations and
/// only extract pixels for display or export.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// # Errors
    ///
    /// Throws if either dimension is zero or the data length is not
    /// `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_raw(width, height, pixels)
            .map(Self::from_buffer)
            .map_err(to_js_error)
    }

    /// Create an image filled with one colour.
    pub fn filled(
        width: u32,
        height: u32,
        r: u8,
        g: u8,
        b: u8,
        a: u8,
    ) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::allocate(width, height, Rgba::new(r, g, b, a))
            .map(Self::from_buffer)
            .map_err(to_js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Read one pixel as `[r, g, b, a]`.
    ///
    /// # Errors
    ///
    /// Throws if the coordinate is outside the image.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<Vec<u8>, JsValue> {
        self.inner
            .get(x, y)
            .map(|px| px.to_array().to_vec())
            .map_err(to_js_error)
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.inner
    }

    pub(crate) fn into_buffer(self) -> PixelBuffer {
        self.inner
    }
}

/// Convert a Rust error into a thrown JavaScript `Error`.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
