//! Attenuation: plain or polarising direct attenuation and the fluorescent
//! composite built on it.

mod composite;
mod context;
mod direct;

// Re-export
pub use composite::*;
pub use context::*;
pub use direct::*;
