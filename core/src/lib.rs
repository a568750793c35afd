//! Polarisation aware light attenuation algebra for spectral light transport.

pub mod attenuation;
pub mod common;
pub mod geometry;
pub mod light;
pub mod polarisation;
pub mod spectrum;
