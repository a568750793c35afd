//! 3-D Vectors

use crate::common::*;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 3-D vector of `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

/// Creates a new 3-D vector.
///
/// * `x` - X-coordinate.
/// * `y` - Y-coordinate.
/// * `z` - Z-coordinate.
pub fn vector3(x: Float, y: Float, z: Float) -> Vector3f {
    Vector3f { x, y, z }
}

impl Vector3f {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn dot(&self, other: &Self) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }

    /// Returns a unit vector perpendicular to this one. The vector must have
    /// non-zero length.
    pub fn perpendicular(&self) -> Self {
        if abs(self.x) > abs(self.y) {
            vector3(-self.z, 0.0, self.x) / (self.x * self.x + self.z * self.z).sqrt()
        } else {
            vector3(0.0, self.z, -self.y) / (self.y * self.y + self.z * self.z).sqrt()
        }
    }
}

impl Add for Vector3f {
    type Output = Self;

    /// Adds the given vector and returns the result.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3f {
    type Output = Self;

    /// Subtracts the given vector and returns the result.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<Float> for Vector3f {
    type Output = Self;

    /// Scale the vector.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    /// Scale the vector.
    ///
    /// * `v` - The vector.
    fn mul(self, v: Vector3f) -> Self::Output {
        v * self
    }
}

impl Div<Float> for Vector3f {
    type Output = Self;

    /// Scale the vector by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Neg for Vector3f {
    type Output = Self;

    /// Flip the vector's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3f {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    prop_compose! {
        fn non_zero_vector()(
            x in -10.0..10.0f64,
            y in -10.0..10.0f64,
            z in -10.0..10.0f64,
        ) -> Vector3f {
            vector3(x, y, z)
        }
    }

    #[test]
    fn cross_axis() {
        let x = vector3(1.0, 0.0, 0.0);
        let y = vector3(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), vector3(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), vector3(0.0, 0.0, -1.0));
    }

    #[test]
    fn has_nans() {
        assert!(!Vector3f::ZERO.has_nans());
        assert!(vector3(Float::NAN, 0.0, 0.0).has_nans());
    }

    proptest! {
        #[test]
        fn normalize_has_unit_length(v in non_zero_vector().prop_filter("non-zero", |v| v.length() > 1e-3)) {
            prop_assert!(approx_eq!(Float, v.normalize().length(), 1.0, epsilon = 1e-12));
        }

        #[test]
        fn perpendicular_is_orthogonal(v in non_zero_vector().prop_filter("non-zero", |v| v.length() > 1e-3)) {
            let p = v.perpendicular();
            prop_assert!(approx_eq!(Float, p.dot(&v), 0.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, p.length(), 1.0, epsilon = 1e-12));
        }

        #[test]
        fn cross_is_orthogonal(v1 in non_zero_vector(), v2 in non_zero_vector()) {
            let c = v1.cross(&v2);
            prop_assert!(approx_eq!(Float, c.dot(&v1), 0.0, epsilon = 1e-9));
            prop_assert!(approx_eq!(Float, c.dot(&v2), 0.0, epsilon = 1e-9));
        }
    }
}
