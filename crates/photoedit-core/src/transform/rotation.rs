//! Arbitrary-angle rotation with canvas expansion.
//!
//! Three interpolation methods are available:
//! - **Nearest**: no blending, parity with simple bitmap rotators
//! - **Bilinear**: 2x2 weighted blend, the default
//! - **Lanczos3**: 6x6 windowed sinc, sharpest result
//!
//! # Algorithm
//!
//! Positive angles rotate clockwise as seen on screen (y axis pointing down).
//! The output canvas is the bounding box of the rotated source, so nothing is
//! clipped. Each destination pixel centre is mapped back into the source by
//! the inverse rotation:
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! where `(dx, dy)` is the offset from the destination centre. Positions
//! that land outside the source take the background color.
//!
//! Multiples of 90° skip resampling entirely and move pixels losslessly.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, Rgba, CHANNELS};

/// Angles within this many degrees of a multiple of 90° are treated as exact.
/// Only absorbs floating noise such as `-90.0 + 360.0`.
const ANGLE_EPSILON: f64 = 1e-9;

/// Slack subtracted before `ceil` so `cos(90°) ≈ 6e-17` does not add a pixel.
const BOUNDS_EPSILON: f64 = 1e-9;

/// Interpolation filter for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationFilter {
    /// Nearest neighbour, no blending.
    Nearest,
    /// Bilinear interpolation - good balance of speed and quality.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

impl InterpolationFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            InterpolationFilter::Nearest => image::imageops::FilterType::Nearest,
            InterpolationFilter::Bilinear => image::imageops::FilterType::Triangle,
            InterpolationFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Settings for [`rotate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotateOptions {
    /// Resampling method for non-quarter-turn angles.
    pub filter: InterpolationFilter,
    /// Fill for canvas areas not covered by the rotated source.
    /// Transparent black unless configured.
    pub background: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// Classify an angle as an exact multiple of 90°, if it is one.
fn quarter_turn(angle_degrees: f64) -> Option<QuarterTurn> {
    let normalized = angle_degrees.rem_euclid(360.0);
    [
        (0.0, QuarterTurn::None),
        (90.0, QuarterTurn::Cw90),
        (180.0, QuarterTurn::Cw180),
        (270.0, QuarterTurn::Cw270),
        (360.0, QuarterTurn::None),
    ]
    .into_iter()
    .find(|(target, _)| (normalized - target).abs() < ANGLE_EPSILON)
    .map(|(_, turn)| turn)
}

/// Compute the dimensions of the canvas that holds a rotated image.
///
/// ```text
/// new_w = ceil(|w * cos θ| + |h * sin θ|)
/// new_h = ceil(|w * sin θ| + |h * cos θ|)
/// ```
///
/// # Example
///
/// ```
/// use photoedit_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
///
/// // No rotation preserves dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turn(angle_degrees) {
        Some(QuarterTurn::None | QuarterTurn::Cw180) => return (width, height),
        Some(QuarterTurn::Cw90 | QuarterTurn::Cw270) => return (height, width),
        None => {}
    }

    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let (w, h) = (width as f64, height as f64);

    let new_w = ((w * cos).abs() + (h * sin).abs() - BOUNDS_EPSILON).ceil() as u32;
    let new_h = ((w * sin).abs() + (h * cos).abs() - BOUNDS_EPSILON).ceil() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise about its centre with default options
/// (bilinear sampling, transparent background).
///
/// # Example
///
/// ```ignore
/// use photoedit_core::transform::rotate;
///
/// let rotated = rotate(&image, 15.0);
/// ```
pub fn rotate(image: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    rotate_with(image, angle_degrees, &RotateOptions::default())
}

/// Rotate an image clockwise about its centre.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping). Angles that are multiples of 90° are lossless; `0` and `360`
/// return a copy of the source.
pub fn rotate_with(image: &PixelBuffer, angle_degrees: f64, options: &RotateOptions) -> PixelBuffer {
    if let Some(turn) = quarter_turn(angle_degrees) {
        return rotate_quarter(image, turn);
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), angle_degrees);
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    let src_cx = image.width() as f64 / 2.0;
    let src_cy = image.height() as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;
    let background = options.background.to_array();

    let stride = dst_w as usize * CHANNELS;
    let mut output = vec![0u8; stride * dst_h as usize];

    output
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(dst_y, row)| {
            let dy = dst_y as f64 + 0.5 - dst_cy;
            for (dst_x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let dx = dst_x as f64 + 0.5 - dst_cx;

                // Inverse rotation, back to pixel-index space (centres at integers)
                let src_x = dx * cos + dy * sin + src_cx - 0.5;
                let src_y = -dx * sin + dy * cos + src_cy - 0.5;

                let pixel = match options.filter {
                    InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                    InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                    InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
                };

                out.copy_from_slice(&pixel.unwrap_or(background));
            }
        });

    PixelBuffer::from_parts(dst_w, dst_h, output)
}

/// Lossless rotation by a multiple of 90°.
fn rotate_quarter(image: &PixelBuffer, turn: QuarterTurn) -> PixelBuffer {
    let (w, h) = image.dimensions();
    let (dst_w, dst_h) = match turn {
        QuarterTurn::None => return image.clone(),
        QuarterTurn::Cw180 => (w, h),
        QuarterTurn::Cw90 | QuarterTurn::Cw270 => (h, w),
    };

    let stride = dst_w as usize * CHANNELS;
    let mut output = vec![0u8; stride * dst_h as usize];

    output
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(dst_y, row)| {
            let dst_y = dst_y as u32;
            for (dst_x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let dst_x = dst_x as u32;
                let (src_x, src_y) = match turn {
                    QuarterTurn::Cw90 => (dst_y, h - 1 - dst_x),
                    QuarterTurn::Cw180 => (w - 1 - dst_x, h - 1 - dst_y),
                    QuarterTurn::Cw270 => (w - 1 - dst_y, dst_x),
                    QuarterTurn::None => (dst_x, dst_y),
                };
                out.copy_from_slice(&image.sample(src_x, src_y));
            }
        });

    PixelBuffer::from_parts(dst_w, dst_h, output)
}

/// Whether a pixel-index position lies on the source image.
#[inline]
fn covers(image: &PixelBuffer, x: f64, y: f64) -> bool {
    x >= -0.5 && x <= image.width() as f64 - 0.5 && y >= -0.5 && y <= image.height() as f64 - 0.5
}

/// Sample the closest source pixel.
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 4]> {
    if !covers(image, x, y) {
        return None;
    }
    let px = (x.round().max(0.0) as u32).min(image.width() - 1);
    let py = (y.round().max(0.0) as u32).min(image.height() - 1);
    Some(image.sample(px, py))
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance. Neighbours past the last row or
/// column repeat the edge pixel.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 4]> {
    if !covers(image, x, y) {
        return None;
    }

    let max_x = image.width() - 1;
    let max_y = image.height() - 1;
    let x = x.clamp(0.0, max_x as f64);
    let y = y.clamp(0.0, max_y as f64);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.sample(x0, y0);
    let p10 = image.sample(x1, y0);
    let p01 = image.sample(x0, y1);
    let p11 = image.sample(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..CHANNELS {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels. Within 3 pixels of an
/// edge the kernel does not fit and bilinear is used instead.
fn sample_lanczos3(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 4]> {
    let (w, h) = (image.width() as i64, image.height() as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = image.sample(px as u32, py as u32);
            for (acc, &value) in sum.iter_mut().zip(pixel.iter()) {
                *acc += value as f64 * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for (out, acc) in result.iter_mut().zip(sum) {
            *out = (acc / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    Some(result)
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` for `|x| < a`, zero elsewhere.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    (a * pi_x.sin() * (pi_x / a).sin()) / (pi_x * pi_x)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
