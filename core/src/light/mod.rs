//! Light

mod light_sample;

// Re-export
pub use light_sample::*;
