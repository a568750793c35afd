//! Spectral samples

mod common;
mod crosstalk;
mod spectral_sample;

// Re-export
pub use common::*;
pub use crosstalk::*;
pub use spectral_sample::*;
