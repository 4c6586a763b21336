//! WASM binding for text overlays.

use crate::types::{to_js_error, JsPixelBuffer};
use photoedit_core::text::{add_text as core_add_text, FontRef};
use photoedit_core::Rgba;
use wasm_bindgen::prelude::*;

/// Draw text onto a copy of `image`.
///
/// # Arguments
///
/// * `image` - Source image, left unchanged
/// * `text` - Text to draw; `\n` starts a new line
/// * `x`, `y` - Top-left corner of the text box
/// * `font_size` - Pixel height of one line
/// * `r`, `g`, `b`, `a` - Text colour
/// * `font_data` - TrueType or OpenType font file bytes
///
/// # Errors
///
/// Throws if `font_data` is not a valid font.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const font = new Uint8Array(await (await fetch('/fonts/caption.ttf')).arrayBuffer());
/// const captioned = add_text(image, 'Holiday', 10, 10, 24, 255, 255, 255, 255, font);
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn add_text(
    image: &JsPixelBuffer,
    text: &str,
    x: i32,
    y: i32,
    font_size: f32,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    font_data: &[u8],
) -> Result<JsPixelBuffer, JsValue> {
    let font = FontRef::try_from_slice(font_data).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(core_add_text(
        image.buffer(),
        text,
        x,
        y,
        font_size,
        Rgba::new(r, g, b, a),
        &font,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT_DATA: &[u8] = include_bytes!("../../photoedit-core/testdata/DejaVuSans.ttf");

    #[test]
    fn test_add_text_draws_on_copy() {
        let img = JsPixelBuffer::filled(80, 40, 255, 255, 255, 255).unwrap();
        let before = img.pixels();

        let result = add_text(&img, "Hi", 5, 5, 20.0, 0, 0, 0, 255, FONT_DATA).unwrap();

        assert_eq!(img.pixels(), before);
        assert_eq!((result.width(), result.height()), (80, 40));
        assert_ne!(result.pixels(), before);
    }
}
