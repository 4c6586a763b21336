//! Geometry-changing operations: cropping and rotation.
//!
//! Both operations read the source buffer and return a new one; the source
//! is never modified.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Crop coordinates are integer pixels
//! - Rotation angles are in degrees, positive = clockwise on screen

mod crop;
mod rotation;

pub use crop::crop;
pub use rotation::{
    compute_rotated_bounds, rotate, rotate_with, InterpolationFilter, RotateOptions,
};
