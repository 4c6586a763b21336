//! Grid collage compositor.
//!
//! Tiles an ordered sequence of images into one canvas:
//!
//! ```text
//! grid   = ceil(sqrt(n))
//! cell   = (max width, max height) over all images
//! canvas = (grid * cell_w) x (grid * cell_h), filled with the background
//! ```
//!
//! Image `i` lands in cell `(row = i / grid, col = i % grid)` and is stretched
//! to exactly the cell size, then composited source-over onto the
//! background. Trailing cells stay background-coloured.

use std::borrow::{Borrow, Cow};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::{blend_over, PixelBuffer, Rgba, CHANNELS};
use crate::error::EditError;
use crate::transform::InterpolationFilter;

/// Settings for [`create_collage_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollageOptions {
    /// Filter used when an image has to be stretched to the cell size.
    pub filter: InterpolationFilter,
    /// Fill for the canvas and any unused cells.
    pub background: Rgba,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            filter: InterpolationFilter::Bilinear,
            background: Rgba::WHITE,
        }
    }
}

/// Number of rows and columns of the square grid holding `count` cells.
///
/// Computed with integers so perfect squares never round up.
pub fn grid_size(count: usize) -> usize {
    let mut size = (count as f64).sqrt() as usize;
    while size * size < count {
        size += 1;
    }
    while size > 0 && (size - 1) * (size - 1) >= count {
        size -= 1;
    }
    size
}

/// Compose images into a grid collage on an opaque white canvas.
///
/// Transparent input pixels show the white background, so the result is
/// always fully opaque.
///
/// # Errors
///
/// Returns `EditError::EmptyInput` if `images` is empty.
///
/// # Example
///
/// ```
/// use photoedit_core::{PixelBuffer, Rgba, collage::create_collage};
///
/// let tile = PixelBuffer::allocate(10, 20, Rgba::BLACK).unwrap();
/// let collage = create_collage(&[tile.clone(), tile.clone(), tile]).unwrap();
/// assert_eq!(collage.dimensions(), (20, 40));
/// ```
pub fn create_collage<B>(images: &[B]) -> Result<PixelBuffer, EditError>
where
    B: Borrow<PixelBuffer>,
{
    create_collage_with(images, &CollageOptions::default())
}

/// Compose images into a grid collage with explicit options.
///
/// Accepts owned buffers or references, so callers holding images elsewhere
/// do not need to clone them.
pub fn create_collage_with<B>(
    images: &[B],
    options: &CollageOptions,
) -> Result<PixelBuffer, EditError>
where
    B: Borrow<PixelBuffer>,
{
    if images.is_empty() {
        return Err(EditError::EmptyInput);
    }
    let images: Vec<&PixelBuffer> = images.iter().map(Borrow::borrow).collect();

    let grid = grid_size(images.len());
    let cell_w = images.iter().map(|img| img.width()).max().unwrap_or(1);
    let cell_h = images.iter().map(|img| img.height()).max().unwrap_or(1);

    let canvas_w = u32::try_from(grid as u64 * cell_w as u64);
    let canvas_h = u32::try_from(grid as u64 * cell_h as u64);
    let (canvas_w, canvas_h) = match (canvas_w, canvas_h) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(EditError::InvalidDimensions {
                width: canvas_w.unwrap_or(u32::MAX),
                height: canvas_h.unwrap_or(u32::MAX),
            })
        }
    };

    let cells = images
        .par_iter()
        .map(|image| stretch_to_cell(image, cell_w, cell_h, options.filter))
        .collect::<Result<Vec<_>, _>>()?;

    let mut canvas = PixelBuffer::allocate(canvas_w, canvas_h, options.background)?.into_raw();
    let canvas_stride = canvas_w as usize * CHANNELS;
    let cell_stride = cell_w as usize * CHANNELS;

    canvas
        .par_chunks_exact_mut(canvas_stride)
        .enumerate()
        .for_each(|(y, row)| {
            let grid_row = y / cell_h as usize;
            let local_y = y % cell_h as usize;
            for (col, dst) in row.chunks_exact_mut(cell_stride).enumerate() {
                if let Some(cell) = cells.get(grid_row * grid + col) {
                    let start = local_y * cell_stride;
                    let src = cell[start..start + cell_stride].chunks_exact(CHANNELS);
                    for (out, px) in dst.chunks_exact_mut(CHANNELS).zip(src) {
                        blend_over(out, [px[0], px[1], px[2], px[3]], 1.0);
                    }
                }
            }
        });

    Ok(PixelBuffer::from_parts(canvas_w, canvas_h, canvas))
}

/// Pixels of `image` resized to exactly `width x height`.
fn stretch_to_cell(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: InterpolationFilter,
) -> Result<Cow<'_, [u8]>, EditError> {
    // Fast path: already cell-sized
    if image.dimensions() == (width, height) {
        return Ok(Cow::Borrowed(image.pixels()));
    }

    let rgba = image.to_rgba_image().ok_or(EditError::InvalidPixelData {
        expected: image.pixel_count() * CHANNELS,
        actual: image.pixels().len(),
    })?;
    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(Cow::Owned(resized.into_raw()))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
