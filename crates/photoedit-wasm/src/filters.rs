//! WASM bindings for colour filters.

use crate::types::JsPixelBuffer;
use photoedit_core::filters;
use wasm_bindgen::prelude::*;

/// Scale the R, G and B channels by `factor`.
///
/// Alpha is unchanged. Results are truncated toward zero and clamped to
/// 0-255, so `factor = 1.5` turns 200 into 255 and 100 into 150.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const brighter = apply_brightness(image, 1.2);
/// const darker = apply_brightness(image, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_brightness(image: &JsPixelBuffer, factor: f32) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(filters::apply_brightness(image.buffer(), factor))
}

/// Add a per-channel offset to R, G and B, clamped to 0-255.
///
/// Alpha is unchanged.
#[wasm_bindgen]
pub fn apply_color_offset(
    image: &JsPixelBuffer,
    red: i32,
    green: i32,
    blue: i32,
) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(filters::apply_color_offset(
        image.buffer(),
        red,
        green,
        blue,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_clamps() {
        let img = JsPixelBuffer::filled(2, 2, 200, 100, 0, 77).unwrap();
        let result = apply_brightness(&img, 1.5);
        assert_eq!(result.get_pixel(0, 0).unwrap(), vec![255, 150, 0, 77]);
    }

    #[test]
    fn test_color_offset_red_to_black() {
        let img = JsPixelBuffer::filled(2, 2, 255, 0, 0, 255).unwrap();
        let result = apply_color_offset(&img, -255, 0, 0);
        assert_eq!(result.get_pixel(1, 1).unwrap(), vec![0, 0, 0, 255]);
    }

    #[test]
    fn test_source_unchanged() {
        let img = JsPixelBuffer::filled(2, 2, 10, 20, 30, 40).unwrap();
        let before = img.pixels();
        let _ = apply_color_offset(&img, 100, 100, 100);
        assert_eq!(img.pixels(), before);
    }
}
