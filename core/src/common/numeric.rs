//! Numeric helpers shared by the sample types.

#![allow(dead_code)]

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 64-bit precision; the coherency eigen-analysis is unreliable in 32-bit.
pub type Float = f64;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// Machine Epsilon
pub const MACHINE_EPSILON: Float = std::f64::EPSILON * 0.5;

/// Maximum angle between the propagation axes of two coaxial reference frames.
pub const COAXIAL_TOLERANCE_DEGREES: Float = 3.0;

/// Maximum length of the difference between corresponding basis vectors of two
/// frames considered equal.
pub const FRAME_EQUALITY_TOLERANCE: Float = 0.01;

/// Smallest coherency eigenvalue still accepted as non-negative.
pub const REALIZABILITY_EPSILON: Float = 1e-6;

/// Slack for the `sum(mij^2) <= 4 m00^2` inequality and the polarisation bound
/// of Stokes vectors.
pub const SANITY_EPSILON: Float = 1e-6;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Linearly interpolate between two values for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t`  - Parameter.
/// * `p0` - Value at t=0.
/// * `p1` - Value at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Convert degrees to radians.
///
/// * `deg` - Angle in degrees.
#[inline(always)]
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

/// Convert radians to degrees.
///
/// * `rad` - Angle in radians.
#[inline(always)]
pub fn degrees(rad: Float) -> Float {
    (180.0 / PI) * rad
}

/// Returns `(cos 2φ, sin 2φ)` given `cos φ` and `sin φ`.
///
/// * `cos_phi` - Cosine of the angle.
/// * `sin_phi` - Sine of the angle.
#[inline(always)]
pub fn double_angle(cos_phi: Float, sin_phi: Float) -> (Float, Float) {
    (
        cos_phi * cos_phi - sin_phi * sin_phi,
        2.0 * cos_phi * sin_phi,
    )
}
