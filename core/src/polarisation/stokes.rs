//! Stokes Vector Sample

use crate::common::*;
use crate::spectrum::*;
use log::warn;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul};

/// Polarisation state of light at the hero wavelengths.
///
/// Component 0 is total intensity; 1 and 2 describe linear polarisation and
/// 3 circular polarisation. The components are only meaningful relative to a
/// `ReferenceFrame` held by whoever owns the vector. The physical bound
/// `sqrt(s1^2 + s2^2 + s3^2) <= s0` is checked by `is_valid()` but not
/// enforced on construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StokesVectorSample {
    s: [SpectralSample; 4],
}

impl StokesVectorSample {
    /// No light.
    pub const ZERO: Self = Self {
        s: [SpectralSample::ZERO; 4],
    };

    /// Creates a Stokes vector from its components.
    ///
    /// * `s0` - Total intensity.
    /// * `s1` - Horizontal vs. vertical linear polarisation.
    /// * `s2` - +45° vs. -45° linear polarisation.
    /// * `s3` - Right vs. left circular polarisation.
    pub fn new(s0: SpectralSample, s1: SpectralSample, s2: SpectralSample, s3: SpectralSample) -> Self {
        Self { s: [s0, s1, s2, s3] }
    }

    /// Creates unpolarised light.
    ///
    /// * `intensity` - Total intensity.
    pub fn unpolarised(intensity: SpectralSample) -> Self {
        Self::new(
            intensity,
            SpectralSample::ZERO,
            SpectralSample::ZERO,
            SpectralSample::ZERO,
        )
    }

    /// Creates fully linearly polarised light.
    ///
    /// * `intensity` - Total intensity.
    /// * `angle`     - Angle of the plane of polarisation from `c0` in radians.
    pub fn linear(intensity: SpectralSample, angle: Float) -> Self {
        let (c2, s2) = double_angle(angle.cos(), angle.sin());
        Self::new(intensity, intensity * c2, intensity * s2, SpectralSample::ZERO)
    }

    /// Creates fully circularly polarised light.
    ///
    /// * `intensity` - Total intensity.
    /// * `right`     - Right-handed if true, left-handed otherwise.
    pub fn circular(intensity: SpectralSample, right: bool) -> Self {
        let s3 = if right { intensity } else { -intensity };
        Self::new(intensity, SpectralSample::ZERO, SpectralSample::ZERO, s3)
    }

    /// Returns the total intensity.
    pub fn intensity(&self) -> &SpectralSample {
        &self.s[0]
    }

    /// Returns the polarised part of the intensity,
    /// `sqrt(s1^2 + s2^2 + s3^2)`.
    pub fn polarised_intensity(&self) -> SpectralSample {
        (self.s[1] * self.s[1] + self.s[2] * self.s[2] + self.s[3] * self.s[3]).sqrt()
    }

    /// Returns the degree of polarisation in [0, 1] per channel; 0 where the
    /// intensity is 0.
    pub fn degree_of_polarisation(&self) -> SpectralSample {
        let p = self.polarised_intensity();
        let mut ret = SpectralSample::ZERO;
        for i in 0..HERO_SAMPLES {
            if self.s[0][i] > 0.0 {
                ret[i] = p[i] / self.s[0][i];
            }
        }
        ret
    }

    /// Returns true if any channel carries polarisation.
    pub fn is_polarised(&self) -> bool {
        !(self.s[1].is_black() && self.s[2].is_black() && self.s[3].is_black())
    }

    /// Removes all polarisation, keeping the intensity.
    pub fn depolarise(&mut self) {
        self.s[1] = SpectralSample::ZERO;
        self.s[2] = SpectralSample::ZERO;
        self.s[3] = SpectralSample::ZERO;
    }

    /// Returns the vector expressed in a frame rotated by φ about the
    /// propagation axis relative to the current one.
    ///
    /// * `cos_phi` - Cosine of φ.
    /// * `sin_phi` - Sine of φ.
    pub fn rotate(&self, cos_phi: Float, sin_phi: Float) -> Self {
        let (c2, s2) = double_angle(cos_phi, sin_phi);
        Self::new(
            self.s[0],
            self.s[1] * c2 + self.s[2] * s2,
            self.s[2] * c2 - self.s[1] * s2,
            self.s[3],
        )
    }

    /// Returns true if the components are finite, the intensity is
    /// non-negative and the polarised intensity does not exceed it. Logs a
    /// warning for the first failing check.
    pub fn is_valid(&self) -> bool {
        if !self.s.iter().all(|c| c.is_finite()) {
            warn!("Stokes vector {} has non-finite components.", self);
            return false;
        }
        if !self.s[0].is_valid_attenuation() {
            warn!("Stokes vector {} has negative intensity.", self);
            return false;
        }
        let p = self.polarised_intensity();
        for i in 0..HERO_SAMPLES {
            if p[i] > self.s[0][i] * (1.0 + SANITY_EPSILON) + SANITY_EPSILON {
                warn!(
                    "Stokes vector {} is over-polarised in channel {}: {} > {}.",
                    self, i, p[i], self.s[0][i]
                );
                return false;
            }
        }
        true
    }
}

impl Default for StokesVectorSample {
    /// Returns no light.
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for StokesVectorSample {
    type Output = Self;

    /// Incoherent sum of two beams described in the same frame.
    ///
    /// * `other` - The other Stokes vector.
    fn add(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret += other;
        ret
    }
}

impl AddAssign for StokesVectorSample {
    /// Incoherent sum of two beams described in the same frame.
    ///
    /// * `other` - The other Stokes vector.
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.s.iter_mut().zip(other.s.iter()) {
            *a += *b;
        }
    }
}

impl Mul<Float> for StokesVectorSample {
    type Output = Self;

    /// Scales every component.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self { s: self.s.map(|c| c * f) }
    }
}

impl Mul<&SpectralSample> for StokesVectorSample {
    type Output = Self;

    /// Scales every component per channel.
    ///
    /// * `f` - Per-channel scaling factors.
    fn mul(self, f: &SpectralSample) -> Self::Output {
        Self { s: self.s.map(|c| c * *f) }
    }
}

impl Index<usize> for StokesVectorSample {
    type Output = SpectralSample;

    /// Index a Stokes component.
    ///
    /// * `i` - Component in [0, 3].
    fn index(&self, i: usize) -> &Self::Output {
        &self.s[i]
    }
}

impl IndexMut<usize> for StokesVectorSample {
    /// Index a Stokes component mutably.
    ///
    /// * `i` - Component in [0, 3].
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.s[i]
    }
}

impl fmt::Display for StokesVectorSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S(")?;
        for (i, c) in self.s.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
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

    #[test]
    fn unpolarised_light() {
        let s = StokesVectorSample::unpolarised(SpectralSample::new(2.0));
        assert!(!s.is_polarised());
        assert!(s.is_valid());
        assert!(s.degree_of_polarisation().is_black());
    }

    #[test]
    fn over_polarised_is_invalid() {
        let one = SpectralSample::ONE;
        let s = StokesVectorSample::new(one, one, one, SpectralSample::ZERO);
        assert!(!s.is_valid());
    }

    #[test]
    fn negative_intensity_is_invalid() {
        let s = StokesVectorSample::unpolarised(SpectralSample::new(-1.0));
        assert!(!s.is_valid());
    }

    #[test]
    fn circular_is_fully_polarised() {
        let s = StokesVectorSample::circular(SpectralSample::new(0.5), false);
        assert_eq!(s[3], SpectralSample::new(-0.5));
        assert_eq!(s.degree_of_polarisation(), SpectralSample::ONE);
    }

    #[test]
    fn depolarise_keeps_intensity() {
        let mut s = StokesVectorSample::linear(SpectralSample::ONE, 0.3);
        s.depolarise();
        assert_eq!(s, StokesVectorSample::unpolarised(SpectralSample::ONE));
    }

    #[test]
    fn rotating_frame_by_quarter_turn_swaps_linear_states() {
        let h = StokesVectorSample::linear(SpectralSample::ONE, 0.0);
        let r = h.rotate(0.0, 1.0);
        for i in 0..HERO_SAMPLES {
            assert!(approx_eq!(Float, r[1][i], -1.0, epsilon = 1e-12));
            assert!(approx_eq!(Float, r[2][i], 0.0, epsilon = 1e-12));
        }
    }

    proptest! {
        #[test]
        fn linear_light_is_valid_and_fully_polarised(i in 0.0..10.0f64, angle in -3.2..3.2f64) {
            let s = StokesVectorSample::linear(SpectralSample::new(i), angle);
            prop_assert!(s.is_valid());
            if i > 1e-6 {
                let dop = s.degree_of_polarisation();
                prop_assert!(approx_eq!(Float, dop[0], 1.0, epsilon = 1e-9));
            }
        }

        #[test]
        fn rotation_preserves_degree_of_polarisation(angle in -3.2..3.2f64, phi in -3.2..3.2f64) {
            let s = StokesVectorSample::linear(SpectralSample::new(1.0), angle);
            let r = s.rotate(phi.cos(), phi.sin());
            let back = r.rotate(phi.cos(), -phi.sin());
            for c in 0..4 {
                for i in 0..HERO_SAMPLES {
                    prop_assert!(approx_eq!(Float, back[c][i], s[c][i], epsilon = 1e-9));
                }
            }
            prop_assert!(approx_eq!(
                Float,
                r.polarised_intensity()[0],
                s.polarised_intensity()[0],
                epsilon = 1e-9
            ));
        }

        #[test]
        fn rotation_moves_plane_of_polarisation(angle in -1.5..1.5f64, phi in -1.5..1.5f64) {
            // Light polarised at `angle` in the old frame is at `angle - phi`
            // in a frame rotated by `phi`.
            let s = StokesVectorSample::linear(SpectralSample::ONE, angle);
            let r = s.rotate(phi.cos(), phi.sin());
            let expected = StokesVectorSample::linear(SpectralSample::ONE, angle - phi);
            for c in 0..4 {
                prop_assert!(approx_eq!(Float, r[c][0], expected[c][0], epsilon = 1e-9));
            }
        }
    }
}
