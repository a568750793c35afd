//! Common numeric stuff

mod clamp;
mod numeric;

// Re-export
pub use clamp::*;
pub use numeric::*;
