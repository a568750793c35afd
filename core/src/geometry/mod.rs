//! Geometry

mod reference_frame;
mod vector3;

// Re-export
pub use reference_frame::*;
pub use vector3::*;
