//! Common.

use crate::common::*;

/// Interface and helper functions for fixed-width arrays of sample
/// coefficients.
pub trait CoefficientSample: Sized + Copy + Clamp<Float> {
    /// Returns the stored coefficients.
    fn samples(&self) -> &[Float];

    /// Returns stored coefficients as mutable.
    fn samples_mut(&mut self) -> &mut [Float];

    /// Returns true if any coefficient is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if every coefficient is finite.
    fn is_finite(&self) -> bool {
        self.samples().iter().all(|v| v.is_finite())
    }

    /// Returns true if any coefficient is negative.
    fn has_negatives(&self) -> bool {
        self.samples().iter().any(|v| *v < 0.0)
    }

    /// Returns true if the values are zero everywhere.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum coefficient.
    fn max_value(&self) -> Float {
        let samples = self.samples();
        assert!(!samples.is_empty());
        samples[1..].iter().fold(samples[0], |m, v| max(m, *v))
    }

    /// Returns the minimum coefficient.
    fn min_value(&self) -> Float {
        let samples = self.samples();
        assert!(!samples.is_empty());
        samples[1..].iter().fold(samples[0], |m, v| min(m, *v))
    }

    /// Returns the mean of the coefficients.
    fn average(&self) -> Float {
        let samples = self.samples();
        assert!(!samples.is_empty());
        samples.iter().sum::<Float>() / samples.len() as Float
    }

    /// Adds the coefficients of another sample.
    ///
    /// * `other` - The other sample.
    fn add_sample(&mut self, other: &Self) {
        self.zip_apply(other, |a, b| a + b);
    }

    /// Subtracts the coefficients of another sample.
    ///
    /// * `other` - The other sample.
    fn sub_sample(&mut self, other: &Self) {
        self.zip_apply(other, |a, b| a - b);
    }

    /// Multiplies the coefficients of another sample.
    ///
    /// * `other` - The other sample.
    fn mul_sample(&mut self, other: &Self) {
        self.zip_apply(other, |a, b| a * b);
    }

    /// Divides by the coefficients of another sample.
    ///
    /// * `other` - The other sample.
    fn div_sample(&mut self, other: &Self) {
        self.zip_apply(other, |a, b| a / b);
    }

    /// Scales the coefficients by a constant factor.
    ///
    /// * `f` - The factor.
    fn scale(&mut self, f: Float) {
        for s in self.samples_mut().iter_mut() {
            *s *= f;
        }
        debug_assert!(!self.has_nans());
    }

    /// Raises the coefficients to a given power.
    ///
    /// * `p` - The power.
    fn pow(&self, p: Float) -> Self {
        self.map(|v| v.powf(p))
    }

    /// Linearly interpolates the coefficients of two samples.
    ///
    /// * `t`  - Parameter; 0 returns `s0`, 1 returns `s1`.
    /// * `s0` - Sample at t=0.
    /// * `s1` - Sample at t=1.
    fn lerp(t: Float, s0: &Self, s1: &Self) -> Self {
        let mut ret = *s0;
        ret.zip_apply(s1, |a, b| lerp(t, a, b));
        ret
    }

    /// Returns a new sample with `f` applied to every coefficient.
    ///
    /// * `f` - Function to apply.
    fn map<F: Fn(Float) -> Float>(&self, f: F) -> Self {
        let mut ret = *self;
        for s in ret.samples_mut().iter_mut() {
            *s = f(*s);
        }
        ret
    }

    /// Combines corresponding coefficients of another sample into this one.
    ///
    /// * `other` - The other sample.
    /// * `f`     - Combining function `(self, other) -> self`.
    fn zip_apply<F: Fn(Float, Float) -> Float>(&mut self, other: &Self, f: F) {
        debug_assert!(!self.has_nans());
        let samples = self.samples_mut();
        let other_samples = other.samples();
        assert!(samples.len() == other_samples.len());
        for (a, b) in samples.iter_mut().zip(other_samples.iter()) {
            *a = f(*a, *b);
        }
    }
}
