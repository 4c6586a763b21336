//! WASM binding for grid collages.

use crate::types::{to_js_error, JsPixelBuffer};
use photoedit_core::collage;
use wasm_bindgen::prelude::*;

/// Tile images into a square grid on a white canvas.
///
/// Every cell is the size of the largest width and height among the inputs;
/// smaller images are stretched to fill their cell and transparent pixels
/// show the white background. Images are placed left to right, top to
/// bottom.
///
/// The images are moved into WASM; the JavaScript handles become unusable
/// after the call.
///
/// # Errors
///
/// Throws if `images` is empty.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const collage = create_collage([a, b, c]); // 2x2 grid, last cell white
/// ```
#[wasm_bindgen]
pub fn create_collage(images: Vec<JsPixelBuffer>) -> Result<JsPixelBuffer, JsValue> {
    let buffers: Vec<_> = images.into_iter().map(JsPixelBuffer::into_buffer).collect();
    collage::create_collage(&buffers)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collage_layout() {
        let images = vec![
            JsPixelBuffer::filled(4, 4, 255, 0, 0, 255).unwrap(),
            JsPixelBuffer::filled(4, 4, 0, 255, 0, 255).unwrap(),
            JsPixelBuffer::filled(4, 4, 0, 0, 255, 255).unwrap(),
        ];
        let collage = create_collage(images).unwrap();

        assert_eq!((collage.width(), collage.height()), (8, 8));
        assert_eq!(collage.get_pixel(1, 1).unwrap(), vec![255, 0, 0, 255]);
        assert_eq!(collage.get_pixel(5, 1).unwrap(), vec![0, 255, 0, 255]);
        assert_eq!(collage.get_pixel(1, 5).unwrap(), vec![0, 0, 255, 255]);
        assert_eq!(collage.get_pixel(5, 5).unwrap(), vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_single_image_copy() {
        let img = JsPixelBuffer::filled(3, 5, 1, 2, 3, 255).unwrap();
        let collage = create_collage(vec![img.clone()]).unwrap();
        assert_eq!(collage, img);
    }

    #[test]
    fn test_transparent_tile_becomes_white() {
        let img = JsPixelBuffer::filled(2, 2, 9, 9, 9, 0).unwrap();
        let collage = create_collage(vec![img]).unwrap();
        assert_eq!(collage.get_pixel(1, 1).unwrap(), vec![255, 255, 255, 255]);
    }
}
