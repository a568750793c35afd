//! Polarisation: Stokes vectors and Mueller matrices.

mod coherency;
mod mueller;
mod stokes;

// Re-export
pub use coherency::*;
pub use mueller::*;
pub use stokes::*;
