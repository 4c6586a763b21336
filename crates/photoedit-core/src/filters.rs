//! Per-pixel color filters.
//!
//! Each filter maps every sample independently of its neighbours, so rows
//! are processed in parallel. The source is never modified; a new buffer of
//! identical dimensions is returned. Alpha is always passed through.
//!
//! ## Filters
//! 1. Brightness: multiplicative scaling of R, G, B
//! 2. Color offset: additive per-channel shift

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};

/// Two-sided clamp to the 8-bit channel range.
///
/// `clamp(v) = max(0, min(255, v))`. Values never wrap around.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Scale the brightness of an image.
///
/// Formula: `output = clamp(trunc(input * factor))` for R, G and B.
///
/// Any factor is accepted: `1.0` is the identity, `0.0` or less gives black.
/// The product is truncated toward zero, not rounded.
///
/// # Example
/// ```
/// use photoedit_core::{PixelBuffer, Rgba, filters::apply_brightness};
///
/// let img = PixelBuffer::allocate(2, 2, Rgba::rgb(100, 100, 100)).unwrap();
/// let brighter = apply_brightness(&img, 1.5);
/// assert_eq!(brighter.get(0, 0).unwrap(), Rgba::rgb(150, 150, 150));
/// ```
pub fn apply_brightness(source: &PixelBuffer, factor: f32) -> PixelBuffer {
    map_rgb(source, move |rgb| {
        for value in rgb.iter_mut() {
            // `as i32` truncates toward zero and saturates on overflow.
            *value = clamp_channel((*value as f32 * factor) as i32);
        }
    })
}

/// Add per-channel offsets to an image.
///
/// Formula: `output = clamp(input + offset)` for each of R, G and B.
/// Offsets may be negative; results are clamped to `[0, 255]`.
pub fn apply_color_offset(
    source: &PixelBuffer,
    r_offset: i32,
    g_offset: i32,
    b_offset: i32,
) -> PixelBuffer {
    let offsets = [r_offset, g_offset, b_offset];
    map_rgb(source, move |rgb| {
        for (value, offset) in rgb.iter_mut().zip(offsets) {
            *value = clamp_channel((*value as i32).saturating_add(offset));
        }
    })
}

/// Apply `op` to the RGB part of every sample, writing into a fresh buffer.
fn map_rgb<F>(source: &PixelBuffer, op: F) -> PixelBuffer
where
    F: Fn(&mut [u8]) + Sync,
{
    let mut output = source.pixels().to_vec();

    output
        .par_chunks_exact_mut(source.stride())
        .for_each(|row| {
            for chunk in row.chunks_exact_mut(CHANNELS) {
                op(&mut chunk[..3]);
            }
        });

    PixelBuffer::from_parts(source.width(), source.height(), output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
