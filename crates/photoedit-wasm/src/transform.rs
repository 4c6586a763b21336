//! WASM bindings for image transformation operations.
//!
//! This module provides JavaScript bindings for crop and rotation. Rotation
//! always expands the canvas to hold the whole rotated image.

use crate::types::{to_js_error, JsPixelBuffer};
use photoedit_core::transform::{self, InterpolationFilter, RotateOptions};
use wasm_bindgen::prelude::*;

/// Extract a pixel-aligned rectangle.
///
/// # Errors
///
/// Throws if the width or height is not positive, or the rectangle does not
/// lie entirely inside the image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Top-left 100x50 region
/// const cropped = crop(sourceImage, 0, 0, 100, 50);
/// ```
#[wasm_bindgen]
pub fn crop(
    image: &JsPixelBuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> Result<JsPixelBuffer, JsValue> {
    transform::crop(image.buffer(), x, y, width, height)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Rotate an image about its centre.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `use_lanczos` - Use high-quality Lanczos3 filter (slower), otherwise bilinear
///
/// Multiples of 90 degrees are lossless. Uncovered corners are transparent.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = rotate(sourceImage, 15.0, false);
/// const exported = rotate(sourceImage, 15.0, true);
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsPixelBuffer, angle_degrees: f64, use_lanczos: bool) -> JsPixelBuffer {
    let filter = if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    };
    let options = RotateOptions {
        filter,
        ..Default::default()
    };

    JsPixelBuffer::from_buffer(transform::rotate_with(
        image.buffer(),
        angle_degrees,
        &options,
    ))
}

/// Rotate with an options object.
///
/// `options` is `{ filter?: "nearest" | "bilinear" | "lanczos3",
/// background?: { r, g, b, a } }`; missing fields take their defaults.
///
/// # Errors
///
/// Throws if `options` does not match that shape.
#[wasm_bindgen]
pub fn rotate_with_options(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    options: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let options: RotateOptions = if options.is_undefined() || options.is_null() {
        RotateOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| to_js_error(format!("Invalid rotate options: {e}")))?
    };

    Ok(JsPixelBuffer::from_buffer(transform::rotate_with(
        image.buffer(),
        angle_degrees,
        &options,
    )))
}

/// Canvas size `[width, height]` needed to hold an image rotated by
/// `angle_degrees`.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = transform::compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}
