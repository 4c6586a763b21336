//! Photoedit Core - Raster image editing engine
//!
//! This crate provides the in-memory editing engine for Photoedit: an RGBA8
//! pixel buffer plus brightness and colour-offset filters, crop and
//! canvas-expanding rotation, single-pixel editing, grid collages and text
//! overlays.
//!
//! Every engine operation reads its inputs and returns a new buffer; the
//! caller decides whether to keep or discard the result. Decoding, encoding
//! and the persisted photo library live in [`codec`] and [`library`].

pub mod buffer;
pub mod codec;
pub mod collage;
pub mod error;
pub mod filters;
pub mod library;
pub mod pixel;
pub mod text;
pub mod transform;

pub use buffer::{PixelBuffer, Rgba, CHANNELS};
pub use collage::{create_collage, create_collage_with, CollageOptions};
pub use error::EditError;
pub use filters::{apply_brightness, apply_color_offset};
pub use pixel::{get_pixel, set_pixel, set_pixel_in_place};
pub use text::add_text;
pub use transform::{
    compute_rotated_bounds, crop, rotate, rotate_with, InterpolationFilter, RotateOptions,
};
