//! Targeted single-pixel edits.

use crate::buffer::{PixelBuffer, Rgba};
use crate::error::EditError;

/// Set one pixel of a caller-owned buffer and hand it back.
///
/// The buffer is taken by value: the caller owns it exclusively, so the
/// write happens in place and no copy is made. Bounds are validated before
/// anything is written.
///
/// # Errors
///
/// Returns `EditError::OutOfBounds` when `x` or `y` lies outside the buffer.
/// The buffer is dropped in that case; use [`set_pixel_in_place`] to keep it.
pub fn set_pixel(
    mut buffer: PixelBuffer,
    x: i32,
    y: i32,
    color: Rgba,
) -> Result<PixelBuffer, EditError> {
    buffer.set(x, y, color)?;
    Ok(buffer)
}

/// Set one pixel through a mutable borrow.
///
/// A failed call leaves the buffer exactly as it was.
pub fn set_pixel_in_place(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    color: Rgba,
) -> Result<(), EditError> {
    buffer.set(x, y, color)
}

/// Read one pixel.
pub fn get_pixel(buffer: &PixelBuffer, x: i32, y: i32) -> Result<Rgba, EditError> {
    buffer.get(x, y)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
