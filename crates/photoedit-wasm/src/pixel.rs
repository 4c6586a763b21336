//! WASM bindings for single-pixel edits.

use crate::types::{to_js_error, JsPixelBuffer};
use photoedit_core::{pixel, Rgba};
use wasm_bindgen::prelude::*;

/// Overwrite one pixel of `image` in place.
///
/// Bounds are checked before writing; a failed call leaves the image
/// untouched.
///
/// # Errors
///
/// Throws if `(x, y)` is outside the image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// set_pixel(image, 10, 20, 255, 0, 0, 255);
/// ```
#[wasm_bindgen]
pub fn set_pixel(
    image: &mut JsPixelBuffer,
    x: i32,
    y: i32,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
) -> Result<(), JsValue> {
    pixel::set_pixel_in_place(image.buffer_mut(), x, y, Rgba::new(r, g, b, a))
        .map_err(to_js_error)
}
