//! Mueller Matrix Sample

use super::*;
use crate::common::*;
use crate::spectrum::*;
use bitflags::bitflags;
use itertools::iproduct;
use log::{error, warn};
use std::fmt;
use std::ops::{Index, IndexMut};

bitflags! {
    /// Structural properties of a Mueller matrix used to skip work.
    ///
    /// A depolarising matrix is always rotationally invariant; the flag value
    /// includes that bit.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MuellerProperties: u8 {
        /// `R(φ) M R(-φ) = M` for every frame rotation `R(φ)`.
        const ROTATION_INVARIANT = 0b01;

        /// Only the (0, 0) entry is non-zero.
        const DEPOLARISING = 0b11;
    }
}

impl MuellerProperties {
    /// No structural property known.
    pub const GENERAL: Self = Self::empty();

    /// Returns true if the matrix is rotationally invariant.
    pub fn is_rotation_invariant(&self) -> bool {
        self.contains(Self::ROTATION_INVARIANT)
    }

    /// Returns true if the matrix is a pure depolariser.
    pub fn is_depolarising(&self) -> bool {
        self.contains(Self::DEPOLARISING)
    }
}

/// A 4x4 Mueller matrix at the hero wavelengths, stored row-major.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MuellerMatrixSample {
    m: [SpectralSample; 16],
    properties: MuellerProperties,
}

impl MuellerMatrixSample {
    /// Creates a Mueller matrix from its entries.
    ///
    /// * `m`          - Entries in row-major order.
    /// * `properties` - Structural properties the entries satisfy.
    pub fn from_entries(m: [SpectralSample; 16], properties: MuellerProperties) -> Self {
        let ret = Self { m, properties };
        debug_assert!(
            !properties.is_depolarising() || ret.is_structurally_depolarising(),
            "matrix tagged depolarising has polarising entries"
        );
        ret
    }

    /// Creates a Mueller matrix that is the same at every hero wavelength.
    ///
    /// * `rows`       - Entries `rows[row][col]`.
    /// * `properties` - Structural properties the entries satisfy.
    pub fn from_rows(rows: [[Float; 4]; 4], properties: MuellerProperties) -> Self {
        let mut m = [SpectralSample::ZERO; 16];
        for (i, j) in iproduct!(0..4, 0..4) {
            m[4 * i + j] = SpectralSample::new(rows[i][j]);
        }
        Self::from_entries(m, properties)
    }

    /// Total blocker.
    pub fn zero() -> Self {
        Self::depolariser(SpectralSample::ZERO)
    }

    /// Free transmission.
    pub fn identity() -> Self {
        Self::non_polarising(SpectralSample::ONE)
    }

    /// Creates an ideal depolariser; only the (0, 0) entry is set.
    ///
    /// * `attenuation` - Intensity attenuation.
    pub fn depolariser(attenuation: SpectralSample) -> Self {
        let mut m = [SpectralSample::ZERO; 16];
        m[0] = attenuation;
        Self {
            m,
            properties: MuellerProperties::DEPOLARISING,
        }
    }

    /// Creates a partial depolariser which attenuates intensity by
    /// `attenuation` and the polarised part of the light additionally by
    /// `1 - depolarisation`.
    ///
    /// * `attenuation`    - Intensity attenuation.
    /// * `depolarisation` - Fraction of polarisation destroyed in [0, 1].
    pub fn partial_depolariser(attenuation: SpectralSample, depolarisation: Float) -> Self {
        debug_assert!((0.0..=1.0).contains(&depolarisation));
        if depolarisation >= 1.0 {
            return Self::depolariser(attenuation);
        }
        let kept = attenuation * (1.0 - depolarisation);
        let mut m = [SpectralSample::ZERO; 16];
        m[0] = attenuation;
        m[5] = kept;
        m[10] = kept;
        m[15] = kept;
        Self {
            m,
            properties: MuellerProperties::ROTATION_INVARIANT,
        }
    }

    /// Creates an element that attenuates without touching polarisation.
    ///
    /// * `attenuation` - Intensity attenuation.
    pub fn non_polarising(attenuation: SpectralSample) -> Self {
        let mut m = [SpectralSample::ZERO; 16];
        for i in 0..4 {
            m[5 * i] = attenuation;
        }
        Self {
            m,
            properties: MuellerProperties::ROTATION_INVARIANT,
        }
    }

    /// Creates a linear polariser (diattenuator) whose transmission axis is at
    /// `angle` from `c0` of the reference frame.
    ///
    /// * `angle`    - Transmission axis angle in radians.
    /// * `strength` - 1 for an ideal polariser, 0 for free transmission.
    #[rustfmt::skip]
    pub fn linear_polariser(angle: Float, strength: Float) -> Self {
        debug_assert!((0.0..=1.0).contains(&strength));
        let (c, s) = double_angle(angle.cos(), angle.sin());
        let q = 1.0;
        let r = 1.0 - strength;
        let sqr = (q * r).sqrt();
        let (sum, diff) = (q + r, q - r);

        Self::from_rows(
            [
                [0.5 * sum,      0.5 * diff * c,                         0.5 * diff * s,                         0.0],
                [0.5 * diff * c, 0.5 * (sum * c * c + 2.0 * sqr * s * s), 0.5 * (sum - 2.0 * sqr) * c * s,         0.0],
                [0.5 * diff * s, 0.5 * (sum - 2.0 * sqr) * c * s,         0.5 * (sum * s * s + 2.0 * sqr * c * c), 0.0],
                [0.0,            0.0,                                    0.0,                                    sqr],
            ],
            MuellerProperties::GENERAL,
        )
    }

    /// Creates a linear retarder (phase shifter) whose fast axis is at `angle`
    /// from `c0` of the reference frame.
    ///
    /// * `angle` - Fast axis angle in radians.
    /// * `delay` - Retardance in radians.
    #[rustfmt::skip]
    pub fn retarder(angle: Float, delay: Float) -> Self {
        let (c, s) = double_angle(angle.cos(), angle.sin());
        let (cd, sd) = (delay.cos(), delay.sin());

        Self::from_rows(
            [
                [1.0, 0.0,                  0.0,                  0.0],
                [0.0, c * c + s * s * cd,   c * s * (1.0 - cd),   -s * sd],
                [0.0, c * s * (1.0 - cd),   s * s + c * c * cd,   c * sd],
                [0.0, s * sd,               -c * sd,              cd],
            ],
            MuellerProperties::GENERAL,
        )
    }

    /// Creates a rotator which turns the plane of linear polarisation by
    /// `angle`.
    ///
    /// * `angle` - Rotation angle in radians.
    #[rustfmt::skip]
    pub fn rotator(angle: Float) -> Self {
        let (c, s) = double_angle(angle.cos(), angle.sin());

        Self::from_rows(
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c,   -s,  0.0],
                [0.0, s,   c,   0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MuellerProperties::ROTATION_INVARIANT,
        )
    }

    /// Returns the structural properties.
    pub fn properties(&self) -> MuellerProperties {
        self.properties
    }

    /// Returns the intensity attenuation for unpolarised light, the (0, 0)
    /// entry.
    pub fn non_polarising_attenuation(&self) -> &SpectralSample {
        &self.m[0]
    }

    /// Returns the matrix of a single hero wavelength.
    ///
    /// * `channel` - Hero wavelength index.
    pub fn channel(&self, channel: usize) -> [[Float; 4]; 4] {
        let mut ret = [[0.0; 4]; 4];
        for (i, j) in iproduct!(0..4, 0..4) {
            ret[i][j] = self.m[4 * i + j][channel];
        }
        ret
    }

    /// Returns true if only the (0, 0) entry is non-zero.
    pub fn is_structurally_depolarising(&self) -> bool {
        self.m[1..].iter().all(|e| e.is_black())
    }

    /// Returns true if all entries off the main diagonal are zero.
    pub fn is_diagonal(&self) -> bool {
        iproduct!(0..4, 0..4)
            .filter(|(i, j)| i != j)
            .all(|(i, j)| self.m[4 * i + j].is_black())
    }

    /// Applies the matrix to a Stokes vector given in the entry frame.
    ///
    /// * `s` - Incident Stokes vector.
    pub fn apply(&self, s: &StokesVectorSample) -> StokesVectorSample {
        if self.properties.is_depolarising() {
            return StokesVectorSample::unpolarised(self.m[0] * s[0]);
        }
        let mut ret = StokesVectorSample::ZERO;
        for (i, j) in iproduct!(0..4, 0..4) {
            ret[i] += self.m[4 * i + j] * s[j];
        }
        ret
    }

    /// Returns the matrix for an entry frame rotated by φ relative to the
    /// current one, i.e. `M R(φ)` where φ is the angle taking the new entry
    /// frame onto the old one. Only columns 1 and 2 change.
    ///
    /// * `cos_phi` - Cosine of φ.
    /// * `sin_phi` - Sine of φ.
    pub fn rotate_input(&self, cos_phi: Float, sin_phi: Float) -> Self {
        if self.properties.is_depolarising() {
            return *self;
        }
        let (c2, s2) = double_angle(cos_phi, sin_phi);
        let mut ret = *self;
        for i in 0..4 {
            let m1 = self.m[4 * i + 1];
            let m2 = self.m[4 * i + 2];
            ret.m[4 * i + 1] = m1 * c2 - m2 * s2;
            ret.m[4 * i + 2] = m1 * s2 + m2 * c2;
        }
        ret
    }

    /// Returns the matrix for an exit frame rotated by φ relative to the
    /// current one, i.e. `R(φ) M`. Only rows 1 and 2 change.
    ///
    /// * `cos_phi` - Cosine of φ.
    /// * `sin_phi` - Sine of φ.
    pub fn rotate_output(&self, cos_phi: Float, sin_phi: Float) -> Self {
        if self.properties.is_depolarising() {
            return *self;
        }
        let (c2, s2) = double_angle(cos_phi, sin_phi);
        let mut ret = *self;
        for j in 0..4 {
            let m1 = self.m[4 + j];
            let m2 = self.m[8 + j];
            ret.m[4 + j] = m1 * c2 + m2 * s2;
            ret.m[8 + j] = m2 * c2 - m1 * s2;
        }
        ret
    }

    /// Returns `R(φ_out) M R(φ_in)`.
    ///
    /// * `cos_in`  - Cosine of the input rotation.
    /// * `sin_in`  - Sine of the input rotation.
    /// * `cos_out` - Cosine of the output rotation.
    /// * `sin_out` - Sine of the output rotation.
    pub fn rotate_both(&self, cos_in: Float, sin_in: Float, cos_out: Float, sin_out: Float) -> Self {
        self.rotate_input(cos_in, sin_in)
            .rotate_output(cos_out, sin_out)
    }

    /// Returns the matrix of light passing through `m0` and then `m1`, which
    /// is the product `m1 m0`. Both matrices must refer to the same
    /// intermediate frame.
    ///
    /// * `m0` - Element light passes first.
    /// * `m1` - Element light passes second.
    pub fn concat(m0: &Self, m1: &Self) -> Self {
        let mut m = [SpectralSample::ZERO; 16];
        for (i, j) in iproduct!(0..4, 0..4) {
            m[4 * i + j] = (0..4).fold(SpectralSample::ZERO, |sum, k| {
                sum + m1.m[4 * i + k] * m0.m[4 * k + j]
            });
        }
        let mut ret = Self {
            m,
            properties: m0.properties & m1.properties & MuellerProperties::ROTATION_INVARIANT,
        };
        if (m0.properties.is_depolarising() || m1.properties.is_depolarising())
            && ret.is_structurally_depolarising()
        {
            ret.properties = MuellerProperties::DEPOLARISING;
        }
        ret
    }

    /// Returns the entry-wise sum of two matrices in the same frames.
    ///
    /// * `a` - First matrix.
    /// * `b` - Second matrix.
    pub fn add(a: &Self, b: &Self) -> Self {
        Self::zip(a, b, a.properties & b.properties, |x, y| x + y)
    }

    /// Returns the entry-wise difference of two matrices in the same frames.
    ///
    /// * `a` - Minuend.
    /// * `b` - Subtrahend.
    pub fn sub(a: &Self, b: &Self) -> Self {
        Self::zip(a, b, a.properties & b.properties, |x, y| x - y)
    }

    /// Linearly interpolates two matrices in the same frames.
    ///
    /// * `t` - Parameter; 0 returns `a`, 1 returns `b`.
    /// * `a` - Matrix at t=0.
    /// * `b` - Matrix at t=1.
    pub fn lerp(t: Float, a: &Self, b: &Self) -> Self {
        Self::zip(a, b, a.properties & b.properties, |x, y| {
            SpectralSample::lerp(t, &x, &y)
        })
    }

    /// Scales every entry by a constant factor.
    ///
    /// * `f` - The factor.
    pub fn scale(&self, f: Float) -> Self {
        Self {
            m: self.m.map(|e| e * f),
            properties: self.properties,
        }
    }

    /// Scales every entry per hero wavelength.
    ///
    /// * `f` - Per-channel factors.
    pub fn scale_spectral(&self, f: &SpectralSample) -> Self {
        Self {
            m: self.m.map(|e| e * *f),
            properties: self.properties,
        }
    }

    /// Returns `I - M`, e.g. the transmission matching a reflection.
    pub fn complement(&self) -> Self {
        let mut ret = Self {
            m: self.m.map(|e| -e),
            properties: self.properties & MuellerProperties::ROTATION_INVARIANT,
        };
        for i in 0..4 {
            ret.m[5 * i] += SpectralSample::ONE;
        }
        ret
    }

    /// Raises the matrix to a real power. Only diagonal matrices with
    /// non-negative entries are supported.
    ///
    /// * `p` - The power.
    pub fn power(&self, p: Float) -> Self {
        if self.properties.is_depolarising() {
            return Self::depolariser(self.m[0].pow(p));
        }
        if !self.is_diagonal() || (0..4).any(|i| self.m[5 * i].has_negatives()) {
            error!("Power of non-diagonal Mueller matrix requested:\n{}", self);
            unimplemented!("power of a Mueller matrix that is not a non-negative diagonal");
        }
        let mut ret = *self;
        for i in 0..4 {
            ret.m[5 * i] = self.m[5 * i].pow(p);
        }
        ret
    }

    /// Returns true if the matrix is a valid attenuation: no gain, passes the
    /// quadratic sanity bound and is physically realizable.
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(false, REALIZABILITY_EPSILON)
    }

    /// Returns true if for every hero wavelength the entries are finite, the
    /// non-polarising attenuation is in [0, 1] (or [0, ∞) if `allow_gain`),
    /// `sum(mij^2) <= 4 m00^2` holds and every coherency eigenvalue is at
    /// least `-epsilon`. Logs a warning for the first failing check.
    ///
    /// * `allow_gain` - Accept non-polarising attenuation greater than 1.
    /// * `epsilon`    - Tolerance for negative coherency eigenvalues.
    pub fn is_valid_with(&self, allow_gain: bool, epsilon: Float) -> bool {
        for channel in 0..HERO_SAMPLES {
            let m = self.channel(channel);

            if m.iter().flatten().any(|v| !v.is_finite()) {
                warn!("Mueller matrix has non-finite entries in channel {}:\n{}", channel, self);
                return false;
            }

            let m00 = m[0][0];
            if m00 < 0.0 || (!allow_gain && m00 > 1.0 + SANITY_EPSILON) {
                warn!(
                    "Mueller matrix non-polarising attenuation {} out of range in channel {}.",
                    m00, channel
                );
                return false;
            }

            let sum: Float = m.iter().flatten().map(|v| v * v).sum();
            if sum > 4.0 * m00 * m00 * (1.0 + SANITY_EPSILON) + SANITY_EPSILON {
                warn!(
                    "Mueller matrix fails sanity bound in channel {}: {} > {}.",
                    channel,
                    sum,
                    4.0 * m00 * m00
                );
                return false;
            }

            let eigenvalues = coherency_eigenvalues(&m);
            if eigenvalues[0] < -epsilon * max(1.0, m00) {
                warn!(
                    "Mueller matrix is not physically realizable in channel {}; coherency eigenvalues {:?}.",
                    channel, eigenvalues
                );
                return false;
            }
        }
        true
    }

    /// Combines corresponding entries of two matrices.
    fn zip<F>(a: &Self, b: &Self, properties: MuellerProperties, f: F) -> Self
    where
        F: Fn(SpectralSample, SpectralSample) -> SpectralSample,
    {
        let mut m = [SpectralSample::ZERO; 16];
        for (i, e) in m.iter_mut().enumerate() {
            *e = f(a.m[i], b.m[i]);
        }
        Self { m, properties }
    }
}

impl Default for MuellerMatrixSample {
    /// Returns the identity.
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<(usize, usize)> for MuellerMatrixSample {
    type Output = SpectralSample;

    /// Index an entry.
    ///
    /// * `(row, col)` - Entry position.
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < 4 && col < 4, "Mueller matrix index ({}, {}) not in [0, 3]", row, col);
        &self.m[4 * row + col]
    }
}

impl IndexMut<(usize, usize)> for MuellerMatrixSample {
    /// Index an entry mutably. The caller is responsible for keeping the
    /// structural properties truthful.
    ///
    /// * `(row, col)` - Entry position.
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < 4 && col < 4, "Mueller matrix index ({}, {}) not in [0, 3]", row, col);
        if (row, col) != (0, 0) {
            self.properties = MuellerProperties::GENERAL;
        }
        &mut self.m[4 * row + col]
    }
}

impl fmt::Display for MuellerMatrixSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MM {:?}", self.properties)?;
        for i in 0..4 {
            for j in 0..4 {
                write!(f, "{} ", self.m[4 * i + j])?;
            }
            writeln!(f)?;
        }
        Ok(())
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

    fn assert_matrix_eq(a: &MuellerMatrixSample, b: &MuellerMatrixSample) {
        for (i, j) in iproduct!(0..4, 0..4) {
            for c in 0..HERO_SAMPLES {
                assert!(
                    approx_eq!(Float, a[(i, j)][c], b[(i, j)][c], epsilon = 1e-9),
                    "entry ({}, {}) differs:\n{}\n{}",
                    i,
                    j,
                    a,
                    b
                );
            }
        }
    }

    fn assert_stokes_eq(s: &StokesVectorSample, expected: [Float; 4]) {
        for (k, e) in expected.iter().enumerate() {
            for c in 0..HERO_SAMPLES {
                assert!(
                    approx_eq!(Float, s[k][c], *e, epsilon = 1e-9),
                    "component {} is {} not {}",
                    k,
                    s[k],
                    e
                );
            }
        }
    }

    fn stokes(v: [Float; 4]) -> StokesVectorSample {
        StokesVectorSample::new(
            SpectralSample::new(v[0]),
            SpectralSample::new(v[1]),
            SpectralSample::new(v[2]),
            SpectralSample::new(v[3]),
        )
    }

    #[test]
    fn horizontal_polariser() {
        let m = MuellerMatrixSample::linear_polariser(0.0, 1.0);
        assert_stokes_eq(&m.apply(&stokes([1.0, 1.0, 0.0, 0.0])), [1.0, 1.0, 0.0, 0.0]);
        assert_stokes_eq(&m.apply(&stokes([1.0, -1.0, 0.0, 0.0])), [0.0, 0.0, 0.0, 0.0]);
        assert_stokes_eq(&m.apply(&stokes([1.0, 0.0, 0.0, 0.0])), [0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn partial_depolariser_on_unpolarised_light() {
        let m = MuellerMatrixSample::partial_depolariser(SpectralSample::new(0.5), 0.3);
        let out = m.apply(&stokes([1.0, 0.0, 0.0, 0.0]));
        assert_eq!(*out.intensity(), SpectralSample::new(0.5));
        assert!(!out.is_polarised());
        assert!(m.is_valid());
    }

    #[test]
    fn quarter_wave_plate_makes_circular_light() {
        let m = MuellerMatrixSample::retarder(PI_OVER_FOUR, PI_OVER_TWO);
        let out = m.apply(&stokes([1.0, 1.0, 0.0, 0.0]));
        assert_stokes_eq(&out, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rotator_turns_plane_of_polarisation() {
        let m = MuellerMatrixSample::rotator(PI_OVER_FOUR);
        let out = m.apply(&stokes([1.0, 1.0, 0.0, 0.0]));
        assert_stokes_eq(&out, [1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn depolariser_absorbs_under_concatenation() {
        let d = MuellerMatrixSample::depolariser(SpectralSample::new(0.8));
        let others = [
            MuellerMatrixSample::identity(),
            MuellerMatrixSample::non_polarising(SpectralSample::new(0.3)),
            MuellerMatrixSample::rotator(0.7),
            MuellerMatrixSample::depolariser(SpectralSample::new(0.5)),
        ];
        for o in others.iter() {
            assert!(MuellerMatrixSample::concat(&d, o).properties().is_depolarising());
            assert!(MuellerMatrixSample::concat(o, &d).properties().is_depolarising());
        }

        // Whatever precedes it, the output of a depolariser is unpolarised.
        let p = MuellerMatrixSample::linear_polariser(0.4, 1.0);
        let m = MuellerMatrixSample::concat(&p, &d);
        let out = m.apply(&stokes([1.0, 0.0, 1.0, 0.0]));
        assert!(!out.is_polarised());
        assert!(out.intensity()[0] > 0.0);
    }

    #[test]
    fn concatenation_order() {
        // Light through a horizontal polariser and then a rotator by 45° ends
        // up polarised at 45°; the other order ends up horizontal.
        let p = MuellerMatrixSample::linear_polariser(0.0, 1.0);
        let r = MuellerMatrixSample::rotator(PI_OVER_FOUR);
        let unpolarised = stokes([1.0, 0.0, 0.0, 0.0]);

        let out = MuellerMatrixSample::concat(&p, &r).apply(&unpolarised);
        assert_stokes_eq(&out, [0.5, 0.0, 0.5, 0.0]);

        let out = MuellerMatrixSample::concat(&r, &p).apply(&unpolarised);
        assert_stokes_eq(&out, [0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn identity_is_neutral() {
        let p = MuellerMatrixSample::retarder(0.3, 1.1);
        let i = MuellerMatrixSample::identity();
        assert_matrix_eq(&MuellerMatrixSample::concat(&i, &p), &p);
        assert_matrix_eq(&MuellerMatrixSample::concat(&p, &i), &p);
    }

    #[test]
    fn complement_of_identity_is_zero() {
        let c = MuellerMatrixSample::identity().complement();
        assert!(c.is_structurally_depolarising());
        assert!(c.non_polarising_attenuation().is_black());
    }

    #[test]
    fn power_of_diagonal() {
        let m = MuellerMatrixSample::partial_depolariser(SpectralSample::new(0.25), 0.0);
        assert_matrix_eq(
            &m.power(0.5),
            &MuellerMatrixSample::non_polarising(SpectralSample::new(0.5)),
        );
        let d = MuellerMatrixSample::depolariser(SpectralSample::new(0.04));
        assert!(approx_eq!(Float, d.power(0.5)[(0, 0)][0], 0.2, epsilon = 1e-12));
        assert!(d.power(0.5).properties().is_depolarising());
    }

    #[test]
    #[should_panic]
    fn power_of_polariser_is_unimplemented() {
        let _ = MuellerMatrixSample::linear_polariser(0.2, 1.0).power(2.0);
    }

    #[test]
    fn index_mut_clears_properties() {
        let mut m = MuellerMatrixSample::identity();
        m[(0, 0)] = SpectralSample::new(0.5);
        assert!(m.properties().is_rotation_invariant());
        m[(1, 2)] = SpectralSample::new(0.1);
        assert_eq!(m.properties(), MuellerProperties::GENERAL);
    }

    #[test]
    fn canonical_elements_are_valid() {
        assert!(MuellerMatrixSample::identity().is_valid());
        assert!(MuellerMatrixSample::zero().is_valid());
        assert!(MuellerMatrixSample::depolariser(SpectralSample::new(0.7)).is_valid());
    }

    #[test]
    fn gain_needs_permission() {
        let m = MuellerMatrixSample::non_polarising(SpectralSample::new(1.5));
        assert!(!m.is_valid());
        assert!(m.is_valid_with(true, REALIZABILITY_EPSILON));
    }

    #[test]
    fn damaged_matrices_are_invalid() {
        // Sanity bound violated.
        let mut m = MuellerMatrixSample::linear_polariser(0.0, 1.0);
        m[(1, 1)] = SpectralSample::new(2.0);
        assert!(!m.is_valid());

        // Sanity bound holds, realizability does not.
        let mut m = MuellerMatrixSample::identity();
        m[(0, 1)] = SpectralSample::new(0.8);
        m[(1, 0)] = SpectralSample::new(0.0);
        m[(1, 1)] = SpectralSample::new(0.5);
        m[(2, 2)] = SpectralSample::new(0.5);
        m[(3, 3)] = SpectralSample::new(0.5);
        assert!(!m.is_valid());

        // Non-finite entries.
        let mut m = MuellerMatrixSample::identity();
        m[(2, 3)] = SpectralSample::from([Float::NAN, 0.0, 0.0, 0.0]);
        assert!(!m.is_valid());
    }

    proptest! {
        #[test]
        fn rotation_round_trip(step in 0..5usize, angle in -3.2..3.2f64, delay in 0.0..3.2f64) {
            let theta = radians(45.0 * step as Float);
            let (c, s) = (theta.cos(), theta.sin());
            let m = MuellerMatrixSample::retarder(angle, delay);

            assert_matrix_eq(&m.rotate_input(c, s).rotate_input(c, -s), &m);
            assert_matrix_eq(&m.rotate_output(c, s).rotate_output(c, -s), &m);
            assert_matrix_eq(&m.rotate_both(c, s, c, -s).rotate_both(c, -s, c, s), &m);
        }

        #[test]
        fn rotation_matches_dense_product(angle in -3.2..3.2f64, phi in -3.2..3.2f64) {
            let m = MuellerMatrixSample::linear_polariser(angle, 0.7);
            let r = MuellerMatrixSample::rotator(-phi);
            // A frame rotation by φ acts on Stokes vectors like a rotator by -φ.
            assert_matrix_eq(&m.rotate_input(phi.cos(), phi.sin()), &MuellerMatrixSample::concat(&r, &m));
            assert_matrix_eq(&m.rotate_output(phi.cos(), phi.sin()), &MuellerMatrixSample::concat(&m, &r));
        }

        #[test]
        fn rotation_invariant_elements_commute_with_frames(
            angle in -3.2..3.2f64,
            phi in -3.2..3.2f64,
            d in 0.0..1.0f64,
        ) {
            let (c, s) = (phi.cos(), phi.sin());
            for m in [
                MuellerMatrixSample::rotator(angle),
                MuellerMatrixSample::partial_depolariser(SpectralSample::new(0.9), d),
            ] {
                assert_matrix_eq(&m.rotate_both(c, s, c, -s), &m);
            }
        }

        #[test]
        fn canonical_elements_are_realizable(
            angle in -3.2..3.2f64,
            delay in 0.0..6.3f64,
            strength in 0.0..1.0f64,
        ) {
            prop_assert!(MuellerMatrixSample::linear_polariser(angle, 1.0).is_valid());
            prop_assert!(MuellerMatrixSample::linear_polariser(angle, strength).is_valid());
            prop_assert!(MuellerMatrixSample::retarder(angle, delay).is_valid());
            prop_assert!(MuellerMatrixSample::rotator(angle).is_valid());
        }

        #[test]
        fn concatenation_of_valid_elements_is_valid(
            a0 in -3.2..3.2f64,
            a1 in -3.2..3.2f64,
            delay in 0.0..6.3f64,
        ) {
            let m = MuellerMatrixSample::concat(
                &MuellerMatrixSample::linear_polariser(a0, 0.9),
                &MuellerMatrixSample::retarder(a1, delay),
            );
            prop_assert!(m.is_valid());
        }

        #[test]
        fn lerp_of_valid_elements_is_valid(t in 0.0..1.0f64, a in -3.2..3.2f64) {
            let m = MuellerMatrixSample::lerp(
                t,
                &MuellerMatrixSample::linear_polariser(a, 1.0),
                &MuellerMatrixSample::depolariser(SpectralSample::new(0.6)),
            );
            prop_assert!(m.is_valid());
        }
    }
}
