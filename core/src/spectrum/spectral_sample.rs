//! Spectral Sample.

use super::*;
use crate::common::*;
use log::warn;
use std::convert::TryInto;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Number of hero wavelengths carried by each sample.
pub const HERO_SAMPLES: usize = 4;

/// SpectralSample holds a physical quantity (radiance, attenuation,
/// reflectance) at the hero wavelengths of a single path.
///
/// There is no sign constraint on the values themselves; consumers such as
/// attenuations check for non-negativity through `is_valid_attenuation()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpectralSample {
    /// The per-wavelength values.
    c: [Float; HERO_SAMPLES],
}

impl SpectralSample {
    /// Create a new `SpectralSample` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        let ret = Self {
            c: [v; HERO_SAMPLES],
        };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Sample with all values set to 0.
    pub const ZERO: Self = Self {
        c: [0.0; HERO_SAMPLES],
    };

    /// Sample with all values set to 1.
    pub const ONE: Self = Self {
        c: [1.0; HERO_SAMPLES],
    };

    /// Takes the square root of all values.
    pub fn sqrt(&self) -> Self {
        self.map(|v| v.sqrt())
    }

    /// Sets values `v` to `e^v`.
    pub fn exp(&self) -> Self {
        let ret = self.map(|v| v.exp());
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Returns `1 - v` for every value.
    pub fn complement(&self) -> Self {
        self.map(|v| 1.0 - v)
    }

    /// Returns the component-wise minimum of two samples.
    ///
    /// * `other` - The other sample.
    pub fn min(&self, other: &Self) -> Self {
        let mut ret = *self;
        ret.zip_apply(other, min);
        ret
    }

    /// Returns the component-wise maximum of two samples.
    ///
    /// * `other` - The other sample.
    pub fn max(&self, other: &Self) -> Self {
        let mut ret = *self;
        ret.zip_apply(other, max);
        ret
    }

    /// Returns true if all values are finite. Logs a warning naming the first
    /// offending channel otherwise.
    pub fn is_valid(&self) -> bool {
        match self.c.iter().position(|v| !v.is_finite()) {
            Some(i) => {
                warn!("Spectral sample {} has non-finite value {} in channel {}.", self, self.c[i], i);
                false
            }
            None => true,
        }
    }

    /// Returns true if all values are finite and non-negative, which is what
    /// attenuations and radiances require.
    pub fn is_valid_attenuation(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        match self.c.iter().position(|v| *v < 0.0) {
            Some(i) => {
                warn!("Spectral sample {} has negative value {} in channel {}.", self, self.c[i], i);
                false
            }
            None => true,
        }
    }
}

impl CoefficientSample for SpectralSample {
    /// Returns the stored samples.
    fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }
}

impl Default for SpectralSample {
    /// Return a black `SpectralSample`.
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Float> for SpectralSample {
    /// Create a new `SpectralSample` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    fn from(v: Float) -> Self {
        Self::new(v)
    }
}

impl From<[Float; HERO_SAMPLES]> for SpectralSample {
    /// Create a new `SpectralSample` from per-wavelength values.
    ///
    /// * `c` - Sample values.
    fn from(c: [Float; HERO_SAMPLES]) -> Self {
        Self { c }
    }
}

impl From<Vec<Float>> for SpectralSample {
    /// Create a new `SpectralSample` from per-wavelength values.
    ///
    /// * `c` - Sample values.
    fn from(c: Vec<Float>) -> Self {
        let ret = Self {
            c: c.try_into().unwrap_or_else(|v: Vec<Float>| {
                panic!(
                    "Expected a Vec of length {} but it was {}",
                    HERO_SAMPLES,
                    v.len()
                )
            }),
        };
        debug_assert!(!ret.has_nans());
        ret
    }
}

impl Add for SpectralSample {
    type Output = Self;

    /// Adds the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn add(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret.add_sample(&other);
        ret
    }
}

impl AddAssign for SpectralSample {
    /// Adds the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn add_assign(&mut self, other: Self) {
        self.add_sample(&other);
    }
}

impl Sub for SpectralSample {
    type Output = Self;

    /// Subtracts the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn sub(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret.sub_sample(&other);
        ret
    }
}

impl SubAssign for SpectralSample {
    /// Subtracts the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn sub_assign(&mut self, other: Self) {
        self.sub_sample(&other);
    }
}

impl Mul for SpectralSample {
    type Output = Self;

    /// Multiplies the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn mul(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret.mul_sample(&other);
        ret
    }
}

impl Mul<Float> for SpectralSample {
    type Output = Self;

    /// Scales the values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        let mut ret = self;
        ret.scale(f);
        ret
    }
}

impl Mul<SpectralSample> for Float {
    type Output = SpectralSample;

    /// Scales the values of a `SpectralSample`.
    ///
    /// * `s` - Sample values.
    fn mul(self, s: SpectralSample) -> Self::Output {
        s * self
    }
}

impl MulAssign for SpectralSample {
    /// Multiplies the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn mul_assign(&mut self, other: Self) {
        self.mul_sample(&other);
    }
}

impl MulAssign<Float> for SpectralSample {
    /// Scales the values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul_assign(&mut self, f: Float) {
        self.scale(f);
    }
}

impl Div for SpectralSample {
    type Output = Self;

    /// Divides the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn div(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret.div_sample(&other);
        ret
    }
}

impl Div<Float> for SpectralSample {
    type Output = Self;

    /// Divides the values by given factor.
    ///
    /// * `f` - Scaling value.
    fn div(self, f: Float) -> Self::Output {
        let mut ret = self;
        ret.scale(1.0 / f);
        ret
    }
}

impl DivAssign for SpectralSample {
    /// Divides the corresponding values from another `SpectralSample`.
    ///
    /// * `other` - The other `SpectralSample`.
    fn div_assign(&mut self, other: Self) {
        self.div_sample(&other);
    }
}

impl DivAssign<Float> for SpectralSample {
    /// Divides the values by given factor.
    ///
    /// * `f` - Scaling value.
    fn div_assign(&mut self, f: Float) {
        self.scale(1.0 / f);
    }
}

impl Neg for SpectralSample {
    type Output = Self;

    /// Scale the values by -1.
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Index<usize> for SpectralSample {
    type Output = Float;

    /// Index the value of a hero wavelength.
    ///
    /// * `i` -  The index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for SpectralSample {
    /// Index the value of a hero wavelength mutably.
    ///
    /// * `i` - The index.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl Clamp<Float> for SpectralSample {
    /// Clamps the values.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        self.map(|v| clamp(v, low, high))
    }

    /// Clamps the values to [0.0, INFINITY].
    fn clamp_physical(&self) -> Self {
        self.clamp(0.0, INFINITY)
    }
}

impl fmt::Display for SpectralSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.c.iter().enumerate() {
            write!(f, "{:.6}", v)?;
            if i < HERO_SAMPLES - 1 {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
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
        fn spectral_sample()(c in prop::array::uniform4(-10.0..10.0f64)) -> SpectralSample {
            SpectralSample::from(c)
        }
    }

    prop_compose! {
        fn positive_sample()(c in prop::array::uniform4(0.0..10.0f64)) -> SpectralSample {
            SpectralSample::from(c)
        }
    }

    #[test]
    fn constants() {
        assert!(SpectralSample::ZERO.is_black());
        assert_eq!(SpectralSample::ONE, SpectralSample::new(1.0));
        assert_eq!(SpectralSample::default(), SpectralSample::ZERO);
    }

    #[test]
    #[should_panic]
    fn from_vec_of_wrong_length() {
        let _ = SpectralSample::from(vec![1.0, 2.0]);
    }

    #[test]
    fn validity() {
        assert!(SpectralSample::new(0.5).is_valid());
        assert!(SpectralSample::from([1.0, -1.0, 0.0, 2.0]).is_valid());
        assert!(!SpectralSample::from([1.0, -1.0, 0.0, 2.0]).is_valid_attenuation());
        assert!(!SpectralSample::from([1.0, Float::INFINITY, 0.0, 2.0]).is_valid());
        assert!(!SpectralSample::from([1.0, 0.0, Float::NAN, 2.0]).is_valid_attenuation());
    }

    #[test]
    fn reductions() {
        let s = SpectralSample::from([0.25, 1.0, -0.5, 0.75]);
        assert_eq!(s.max_value(), 1.0);
        assert_eq!(s.min_value(), -0.5);
        assert_eq!(s.average(), 0.375);
    }

    #[test]
    fn display() {
        let s = SpectralSample::from([0.5, 1.0, 0.0, 2.0]);
        assert_eq!(
            format!("{}", s),
            "[0.500000, 1.000000, 0.000000, 2.000000]"
        );
    }

    proptest! {
        #[test]
        fn add_sub(s1 in spectral_sample(), s2 in spectral_sample()) {
            let sum = s1 + s2;
            let diff = s1 - s2;
            for i in 0..HERO_SAMPLES {
                prop_assert_eq!(sum[i], s1[i] + s2[i]);
                prop_assert_eq!(diff[i], s1[i] - s2[i]);
            }
        }

        #[test]
        fn mul_scale(s1 in spectral_sample(), s2 in spectral_sample(), f in -10.0..10.0f64) {
            let prod = s1 * s2;
            let scaled = f * s1;
            for i in 0..HERO_SAMPLES {
                prop_assert_eq!(prod[i], s1[i] * s2[i]);
                prop_assert_eq!(scaled[i], s1[i] * f);
            }
        }

        #[test]
        fn complement_twice_is_identity(s in spectral_sample()) {
            let c = s.complement().complement();
            for i in 0..HERO_SAMPLES {
                prop_assert!(approx_eq!(Float, c[i], s[i], epsilon = 1e-12));
            }
        }

        #[test]
        fn lerp_endpoints(s1 in spectral_sample(), s2 in spectral_sample()) {
            prop_assert_eq!(SpectralSample::lerp(0.0, &s1, &s2), s1);
            let l = SpectralSample::lerp(1.0, &s1, &s2);
            for i in 0..HERO_SAMPLES {
                prop_assert!(approx_eq!(Float, l[i], s2[i], epsilon = 1e-12));
            }
        }

        #[test]
        fn pow_and_sqrt_agree(s in positive_sample()) {
            let p = s.pow(0.5);
            let q = s.sqrt();
            for i in 0..HERO_SAMPLES {
                prop_assert!(approx_eq!(Float, p[i], q[i], epsilon = 1e-12));
            }
        }

        #[test]
        fn min_max_bracket(s1 in spectral_sample(), s2 in spectral_sample()) {
            let lo = s1.min(&s2);
            let hi = s1.max(&s2);
            for i in 0..HERO_SAMPLES {
                prop_assert!(lo[i] <= hi[i]);
                prop_assert!(lo[i] == s1[i] || lo[i] == s2[i]);
            }
        }

        #[test]
        fn clamp_bounds(s in spectral_sample()) {
            let c = s.clamp(0.0, 1.0);
            for i in 0..HERO_SAMPLES {
                prop_assert!((0.0..=1.0).contains(&c[i]));
            }
            prop_assert!(!s.clamp_physical().has_negatives());
        }
    }
}
