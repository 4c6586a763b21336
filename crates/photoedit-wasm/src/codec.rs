//! Image decoding and encoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG, JPEG or BMP bytes into an RGBA image
//! - [`encode_png`] - Encode an image as PNG bytes (keeps alpha)
//! - [`encode_jpeg`] - Encode an image as JPEG bytes (drops alpha)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_png } from '@photoedit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const png = encode_png(image);
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use photoedit_core::codec;
use wasm_bindgen::prelude::*;

/// Decode an encoded image from bytes.
///
/// The format is detected from the data. Sources without alpha become fully
/// opaque.
///
/// # Errors
///
/// Throws if the bytes are not a supported or intact image.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    codec::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Encode an image as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    codec::encode_png(image.buffer()).map_err(to_js_error)
}

/// Encode an image as JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode; alpha is discarded
/// * `quality` - JPEG quality (1-100, recommended: 90)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    codec::encode_jpeg(image.buffer(), quality).map_err(to_js_error)
}
