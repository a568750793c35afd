//! Clamp

use num_traits::Num;

/// Restricts `x` to [min, max]. NaN passes through unchanged so validity
/// checks further along still see it.
///
/// * `x`   - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Coefficient samples that can be forced back into a physical range.
pub trait Clamp<T: Copy> {
    /// Restricts every coefficient to [low, high].
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: T, high: T) -> Self;

    /// Restricts every coefficient to the range the sample type may hold.
    /// Intensities stay non-negative, crosstalk fractions stay in [0, 1].
    fn clamp_physical(&self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Float;

    #[test]
    fn clamp_inside_and_outside() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(3, 0, 2), 2);
    }

    #[test]
    fn clamp_keeps_nan() {
        assert!(clamp(Float::NAN, 0.0, 1.0).is_nan());
    }
}
