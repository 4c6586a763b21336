//! Photoedit WASM - WebAssembly bindings for Photoedit
//!
//! This crate exposes the photoedit-core editing engine to JavaScript and
//! TypeScript applications. Every exported function runs exactly one core
//! operation and returns a new image, except `set_pixel`, which edits in
//! place.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the RGBA image handle shared by all bindings
//! - `filters` - Brightness and colour offset
//! - `transform` - Crop and rotation
//! - `pixel` - Single-pixel edits
//! - `collage` - Grid collages
//! - `text` - Text overlays from caller-supplied font bytes
//! - `codec` - PNG/JPEG/BMP decoding, PNG and JPEG encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rotate, encode_png } from '@photoedit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const rotated = rotate(image, 30.0, false);
//! console.log(`Rotated canvas ${rotated.width}x${rotated.height}`);
//! ```
//!
//! Errors are thrown as JavaScript `Error` objects carrying the core error
//! message.

use wasm_bindgen::prelude::*;

mod codec;
mod collage;
mod filters;
mod pixel;
mod text;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_jpeg, encode_png};
pub use collage::create_collage;
pub use filters::{apply_brightness, apply_color_offset};
pub use pixel::set_pixel;
pub use text::add_text;
pub use transform::{crop, rotate, rotate_with_options, rotated_bounds};
pub use types::JsPixelBuffer;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
