//! Attenuation Sample

use super::*;
use crate::common::*;
use crate::geometry::*;
use crate::light::*;
use crate::polarisation::*;
use crate::spectrum::*;
use log::{error, trace, warn};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Attenuation of an optical interaction including fluorescence.
///
/// The direct part is the main diagonal of the implicit spectral attenuation
/// matrix and carries polarisation; the optional crosstalk is its strictly
/// lower part. An uninitialised sample has neither: it is copied over by
/// additive operators and absorbs multiplicative ones.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AttenuationSample {
    direct: Option<DirectAttenuationSample>,
    crosstalk: Option<CrosstalkSample>,
}

impl AttenuationSample {
    /// Returns an uninitialised sample.
    pub fn uninitialised() -> Self {
        Self {
            direct: None,
            crosstalk: None,
        }
    }

    /// Creates a non-fluorescent sample.
    ///
    /// * `direct` - The direct attenuation.
    pub fn from_direct(direct: DirectAttenuationSample) -> Self {
        Self {
            direct: Some(direct),
            crosstalk: None,
        }
    }

    /// Creates a fluorescent sample.
    ///
    /// * `direct`    - The direct attenuation.
    /// * `crosstalk` - Energy transferred between hero wavelengths.
    pub fn fluorescent(direct: DirectAttenuationSample, crosstalk: CrosstalkSample) -> Self {
        Self {
            direct: Some(direct),
            crosstalk: Some(crosstalk),
        }
    }

    /// Creates a sample with the same attenuation at every wavelength.
    ///
    /// * `ctx`   - The attenuation context.
    /// * `value` - The attenuation.
    pub fn new(ctx: &AttenuationContext, value: Float) -> Self {
        Self::from_direct(DirectAttenuationSample::new(ctx, value))
    }

    /// Creates a sample with a spectral attenuation.
    ///
    /// * `ctx`         - The attenuation context.
    /// * `attenuation` - The attenuation.
    pub fn from_spectrum(ctx: &AttenuationContext, attenuation: SpectralSample) -> Self {
        Self::from_direct(DirectAttenuationSample::from_spectrum(ctx, attenuation))
    }

    /// Returns free transmission.
    ///
    /// * `ctx` - The attenuation context.
    pub fn identity(ctx: &AttenuationContext) -> Self {
        *ctx.free_transmission()
    }

    /// Returns a total blocker.
    ///
    /// * `ctx` - The attenuation context.
    pub fn zero(ctx: &AttenuationContext) -> Self {
        *ctx.total_blocker()
    }

    /// Creates a (partial) depolariser.
    ///
    /// * `ctx`            - The attenuation context.
    /// * `attenuation`    - Intensity attenuation.
    /// * `depolarisation` - Fraction of polarisation destroyed in [0, 1].
    pub fn depolariser(ctx: &AttenuationContext, attenuation: SpectralSample, depolarisation: Float) -> Self {
        Self::from_direct(DirectAttenuationSample::depolariser(ctx, attenuation, depolarisation))
    }

    /// Creates a linear polariser. Requires a polarising context.
    ///
    /// * `ctx`      - The attenuation context.
    /// * `frame`    - Frame of light entering and leaving the element.
    /// * `angle`    - Transmission axis angle from `c0` of `frame`.
    /// * `strength` - 1 for an ideal polariser, 0 for free transmission.
    pub fn linear_polariser(ctx: &AttenuationContext, frame: &ReferenceFrame, angle: Float, strength: Float) -> Self {
        Self::from_direct(DirectAttenuationSample::linear_polariser(ctx, frame, angle, strength))
    }

    /// Creates a linear retarder. Requires a polarising context.
    ///
    /// * `ctx`   - The attenuation context.
    /// * `frame` - Frame of light entering and leaving the element.
    /// * `angle` - Fast axis angle from `c0` of `frame`.
    /// * `delay` - Retardance in radians.
    pub fn retarder(ctx: &AttenuationContext, frame: &ReferenceFrame, angle: Float, delay: Float) -> Self {
        Self::from_direct(DirectAttenuationSample::retarder(ctx, frame, angle, delay))
    }

    /// Creates a rotator. Requires a polarising context.
    ///
    /// * `ctx`   - The attenuation context.
    /// * `angle` - Rotation of the plane of polarisation in radians.
    pub fn rotator(ctx: &AttenuationContext, angle: Float) -> Self {
        Self::from_direct(DirectAttenuationSample::rotator(ctx, angle))
    }

    /// Creates a sample from an arbitrary Mueller matrix. Requires a
    /// polarising context.
    ///
    /// * `ctx`    - The attenuation context.
    /// * `matrix` - The Mueller matrix.
    /// * `entry`  - Frame of light entering the element.
    /// * `exit`   - Frame of light leaving the element.
    pub fn from_matrix(
        ctx: &AttenuationContext,
        matrix: MuellerMatrixSample,
        entry: &ReferenceFrame,
        exit: &ReferenceFrame,
    ) -> Self {
        Self::from_direct(DirectAttenuationSample::from_matrix(ctx, matrix, entry, exit))
    }

    /// Returns true unless the sample is uninitialised.
    pub fn is_initialised(&self) -> bool {
        self.direct.is_some()
    }

    /// Returns true if the sample carries crosstalk.
    pub fn is_fluorescent(&self) -> bool {
        self.crosstalk.is_some()
    }

    /// Returns the mode the sample was created in, if initialised.
    pub fn mode(&self) -> Option<PolarisationMode> {
        self.direct.as_ref().map(|d| d.mode())
    }

    /// Returns the direct attenuation, if initialised.
    pub fn direct(&self) -> Option<&DirectAttenuationSample> {
        self.direct.as_ref()
    }

    /// Returns the crosstalk, if fluorescent.
    pub fn crosstalk(&self) -> Option<&CrosstalkSample> {
        self.crosstalk.as_ref()
    }

    /// Returns the attenuation of unpolarised intensity along the main
    /// diagonal, if initialised.
    pub fn non_polarising_attenuation(&self) -> Option<SpectralSample> {
        self.direct.as_ref().map(|d| d.non_polarising_attenuation())
    }

    /// Returns the sample formed by light passing through `a0` and then `a1`,
    /// i.e. `a1 · a0`. Uninitialised operands absorb.
    ///
    /// * `a0` - Element light passes first.
    /// * `a1` - Element light passes second.
    pub fn concat(a0: &Self, a1: &Self) -> Self {
        match (a0.direct.as_ref(), a1.direct.as_ref()) {
            (Some(d0), Some(d1)) => {
                let crosstalk = if a0.is_fluorescent() || a1.is_fluorescent() {
                    Some(CrosstalkSample::concat(
                        &d0.non_polarising_attenuation(),
                        a0.crosstalk.as_ref(),
                        &d1.non_polarising_attenuation(),
                        a1.crosstalk.as_ref(),
                    ))
                } else {
                    None
                };
                Self {
                    direct: Some(DirectAttenuationSample::concat(d0, d1)),
                    crosstalk,
                }
            }
            _ => Self::uninitialised(),
        }
    }

    /// Appends an element light passes after this one.
    ///
    /// * `next` - Element light passes second.
    pub fn append(&mut self, next: &Self) {
        *self = Self::concat(self, next);
    }

    /// Prepends an element light passes before this one.
    ///
    /// * `previous` - Element light passes first.
    pub fn prepend(&mut self, previous: &Self) {
        *self = Self::concat(previous, self);
    }

    /// Returns the sum of two samples. An uninitialised operand yields a copy
    /// of the other one.
    ///
    /// * `a` - First sample.
    /// * `b` - Second sample.
    pub fn add(a: &Self, b: &Self) -> Self {
        match (a.direct.as_ref(), b.direct.as_ref()) {
            (Some(da), Some(db)) => Self {
                direct: Some(DirectAttenuationSample::add(da, db)),
                crosstalk: match (a.crosstalk, b.crosstalk) {
                    (Some(x), Some(y)) => Some(x + y),
                    (x, y) => x.or(y),
                },
            },
            (None, _) => *b,
            (_, None) => *a,
        }
    }

    /// Returns the difference of two samples. Subtracting an uninitialised
    /// sample returns `a`; subtracting from one returns an uninitialised
    /// sample. Fluorescent subtrahends are not supported.
    ///
    /// * `a` - Minuend.
    /// * `b` - Subtrahend.
    pub fn sub(a: &Self, b: &Self) -> Self {
        match (a.direct.as_ref(), b.direct.as_ref()) {
            (Some(da), Some(db)) => {
                if b.is_fluorescent() {
                    error!("Subtraction of fluorescent attenuation requested:\n{}\n{}", a, b);
                    unimplemented!("subtraction of a fluorescent attenuation");
                }
                Self {
                    direct: Some(DirectAttenuationSample::sub(da, db)),
                    crosstalk: a.crosstalk,
                }
            }
            (Some(_), None) => *a,
            (None, _) => Self::uninitialised(),
        }
    }

    /// Linearly interpolates two samples. Uninitialised operands absorb.
    ///
    /// * `t` - Parameter; 0 returns `a`, 1 returns `b`.
    /// * `a` - Sample at t=0.
    /// * `b` - Sample at t=1.
    pub fn lerp(t: Float, a: &Self, b: &Self) -> Self {
        match (a.direct.as_ref(), b.direct.as_ref()) {
            (Some(da), Some(db)) => Self {
                direct: Some(DirectAttenuationSample::lerp(t, da, db)),
                crosstalk: if a.is_fluorescent() || b.is_fluorescent() {
                    Some(CrosstalkSample::lerp(
                        t,
                        &a.crosstalk.unwrap_or_default(),
                        &b.crosstalk.unwrap_or_default(),
                    ))
                } else {
                    None
                },
            },
            _ => Self::uninitialised(),
        }
    }

    /// Scales the sample by a constant factor.
    ///
    /// * `f` - The factor.
    pub fn scale(&self, f: Float) -> Self {
        Self {
            direct: self.direct.map(|d| d.scale(f)),
            crosstalk: self.direct.and(self.crosstalk).map(|x| x * f),
        }
    }

    /// Raises the sample to a real power. Fluorescent samples support only
    /// non-negative integer powers, built by repeated concatenation.
    ///
    /// * `p` - The power.
    pub fn power(&self, p: Float) -> Self {
        if !self.is_initialised() {
            return Self::uninitialised();
        }
        if !self.is_fluorescent() {
            return Self {
                direct: self.direct.map(|d| d.power(p)),
                crosstalk: None,
            };
        }
        if p < 0.0 || p.fract() != 0.0 || !p.is_finite() {
            error!("Power {} of fluorescent attenuation requested:\n{}", p, self);
            unimplemented!("non-integer power of a fluorescent attenuation");
        }
        if p == 0.0 {
            return Self {
                direct: self.direct.map(|d| d.power(0.0)),
                crosstalk: None,
            };
        }

        // Powers of one element commute, so square and multiply.
        let mut n = p as u64;
        let mut base = *self;
        let mut result: Option<Self> = None;
        while n > 0 {
            if n & 1 == 1 {
                result = Some(match result {
                    Some(r) => Self::concat(&r, &base),
                    None => base,
                });
            }
            n >>= 1;
            if n > 0 {
                base = Self::concat(&base, &base);
            }
        }
        result.unwrap_or(*self)
    }

    /// Returns free transmission minus this sample. Not supported for
    /// fluorescent samples.
    pub fn complement(&self) -> Self {
        if self.is_fluorescent() {
            error!("Complement of fluorescent attenuation requested:\n{}", self);
            unimplemented!("complement of a fluorescent attenuation");
        }
        Self {
            direct: self.direct.map(|d| d.complement()),
            crosstalk: None,
        }
    }

    /// Component-wise minimum. Not supported.
    ///
    /// * `a` - First sample.
    /// * `b` - Second sample.
    pub fn min(a: &Self, b: &Self) -> Self {
        error!("Minimum of attenuations requested:\n{}\n{}", a, b);
        unimplemented!("minimum of two attenuations");
    }

    /// Component-wise maximum. Not supported.
    ///
    /// * `a` - First sample.
    /// * `b` - Second sample.
    pub fn max(a: &Self, b: &Self) -> Self {
        error!("Maximum of attenuations requested:\n{}\n{}", a, b);
        unimplemented!("maximum of two attenuations");
    }

    /// Returns the sample expressed with new entry and exit frames. Panics in
    /// plain mode.
    ///
    /// * `entry` - New entry frame.
    /// * `exit`  - New exit frame.
    pub fn realign(&self, entry: &ReferenceFrame, exit: &ReferenceFrame) -> Self {
        Self {
            direct: self.direct.map(|d| d.realign(entry, exit)),
            crosstalk: self.crosstalk,
        }
    }

    /// Applies the sample to light created in the same mode. Fluorescent
    /// re-emission is added as unpolarised light. Uninitialised samples leave
    /// the light unchanged.
    ///
    /// * `light` - Incident light.
    pub fn apply(&self, light: &LightSample) -> LightSample {
        match self.direct.as_ref() {
            Some(direct) => {
                let out = direct.apply(light);
                match self.crosstalk.as_ref() {
                    Some(crosstalk) => out.add_unpolarised(&crosstalk.apply(&light.intensity())),
                    None => out,
                }
            }
            None => {
                trace!("Uninitialised attenuation leaves light unchanged.");
                *light
            }
        }
    }

    /// Returns true if the sample is initialised and valid under the
    /// context's options. Logs a warning describing the first failing check.
    ///
    /// * `ctx` - The attenuation context.
    pub fn is_valid(&self, ctx: &AttenuationContext) -> bool {
        match self.direct.as_ref() {
            Some(direct) => {
                if direct.mode() != ctx.mode() {
                    warn!("Attenuation mode {:?} differs from context mode {:?}.", direct.mode(), ctx.mode());
                    return false;
                }
                direct.is_valid(ctx) && self.crosstalk.map_or(true, |x| x.is_valid())
            }
            None => {
                warn!("Attenuation sample is uninitialised.");
                false
            }
        }
    }
}

impl Default for AttenuationSample {
    /// Returns an uninitialised sample.
    fn default() -> Self {
        Self::uninitialised()
    }
}

impl Add for AttenuationSample {
    type Output = Self;

    /// Adds the given sample and returns the result.
    ///
    /// * `other` - The sample to add.
    fn add(self, other: Self) -> Self::Output {
        Self::add(&self, &other)
    }
}

impl Sub for AttenuationSample {
    type Output = Self;

    /// Subtracts the given sample and returns the result.
    ///
    /// * `other` - The sample to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::sub(&self, &other)
    }
}

impl Mul for AttenuationSample {
    type Output = Self;

    /// Returns `self · other`: light passes `other` first.
    ///
    /// * `other` - The element light passes first.
    fn mul(self, other: Self) -> Self::Output {
        Self::concat(&other, &self)
    }
}

impl Mul<Float> for AttenuationSample {
    type Output = Self;

    /// Scale the sample by a constant and return the result.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        self.scale(f)
    }
}

impl fmt::Display for AttenuationSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direct.as_ref() {
            None => write!(f, "AS uninitialised"),
            Some(direct) => {
                write!(f, "AS {}", direct)?;
                if let Some(crosstalk) = self.crosstalk.as_ref() {
                    write!(f, "\ncrosstalk\n{}", crosstalk)?;
                }
                Ok(())
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn crosstalk() -> CrosstalkSample {
        let mut x = CrosstalkSample::ZERO;
        x.set(1, 0, 0.25);
        x.set(3, 1, 0.5);
        x
    }

    #[test]
    fn uninitialised_absorbs_products() {
        let ctx = AttenuationContext::plain();
        let a = AttenuationSample::new(&ctx, 0.5);
        let u = AttenuationSample::uninitialised();
        assert!(!(u * a).is_initialised());
        assert!(!(a * u).is_initialised());
        assert!(!AttenuationSample::lerp(0.5, &a, &u).is_initialised());
        assert!(!u.scale(2.0).is_initialised());
        assert!(!u.power(2.0).is_initialised());
        assert!(!u.complement().is_initialised());
    }

    #[test]
    fn uninitialised_is_additive_identity() {
        let ctx = AttenuationContext::polarising();
        let a = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let u = AttenuationSample::uninitialised();
        assert_eq!(u + a, a);
        assert_eq!(a + u, a);
        assert_eq!(a - u, a);
        assert!(!(u - a).is_initialised());
    }

    #[test]
    fn fluorescence_is_sticky() {
        let ctx = AttenuationContext::plain();
        let a = AttenuationSample::new(&ctx, 0.5);
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        assert!((a * f).is_fluorescent());
        assert!((f * a).is_fluorescent());
        assert!((a + f).is_fluorescent());
        assert!(AttenuationSample::lerp(0.5, &a, &f).is_fluorescent());
        assert!(!(a * a).is_fluorescent());
    }

    #[test]
    fn concat_crosstalk() {
        // Diagonal 0.5 everywhere; re-emission is attenuated by the second
        // element and adds to the re-emission of the second element.
        let ctx = AttenuationContext::plain();
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let both = f * f;
        let x = both.crosstalk().copied().unwrap_or_default();
        assert_eq!(x.get(1, 0), 0.5 * 0.25 + 0.25 * 0.5);
        assert_eq!(x.get(3, 1), 0.5 * 0.5 + 0.5 * 0.5);
        assert_eq!(x.get(3, 0), 0.5 * 0.25);
        assert_eq!(x.get(2, 1), 0.0);
        assert_eq!(both.non_polarising_attenuation(), Some(SpectralSample::new(0.25)));
    }

    #[test]
    fn fluorescent_light_is_re_emitted() {
        let ctx = AttenuationContext::polarising();
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let light = LightSample::unpolarised(&ctx, SpectralSample::from([1.0, 0.0, 0.0, 0.0]));
        let out = f.apply(&light);
        assert_eq!(out.intensity(), SpectralSample::from([0.5, 0.25, 0.0, 0.0]));
        assert!(out.is_valid());
    }

    #[test]
    fn uninitialised_leaves_light_unchanged() {
        let ctx = AttenuationContext::plain();
        let light = LightSample::unpolarised(&ctx, SpectralSample::ONE);
        assert_eq!(light.attenuate(&AttenuationSample::uninitialised()), light);
    }

    #[test]
    fn cached_constants() {
        for ctx in [AttenuationContext::plain(), AttenuationContext::polarising()] {
            let a = AttenuationSample::new(&ctx, 0.3);
            assert_eq!(AttenuationSample::identity(&ctx) * a, a);
            assert_eq!(a * AttenuationSample::identity(&ctx), a);
            assert_eq!(
                (AttenuationSample::zero(&ctx) * a).non_polarising_attenuation(),
                Some(SpectralSample::ZERO)
            );
            assert!(!AttenuationSample::uninitialised().is_valid(&ctx));
        }
    }

    #[test]
    fn validity_checks_mode_and_crosstalk() {
        let plain = AttenuationContext::plain();
        let polarising = AttenuationContext::polarising();
        let a = AttenuationSample::new(&plain, 0.3);
        assert!(a.is_valid(&plain));
        assert!(!a.is_valid(&polarising));

        let mut x = CrosstalkSample::ZERO;
        x.set(2, 0, -0.1);
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&plain, 0.3), x);
        assert!(!f.is_valid(&plain));
    }

    #[test]
    #[should_panic]
    fn fluorescent_subtrahend_is_unimplemented() {
        let ctx = AttenuationContext::plain();
        let a = AttenuationSample::new(&ctx, 0.5);
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let _ = a - f;
    }

    #[test]
    #[should_panic]
    fn fluorescent_complement_is_unimplemented() {
        let ctx = AttenuationContext::plain();
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let _ = f.complement();
    }

    #[test]
    #[should_panic]
    fn min_is_unimplemented() {
        let ctx = AttenuationContext::plain();
        let a = AttenuationSample::new(&ctx, 0.5);
        let _ = AttenuationSample::min(&a, &a);
    }

    #[test]
    #[should_panic]
    fn max_is_unimplemented() {
        let ctx = AttenuationContext::plain();
        let a = AttenuationSample::new(&ctx, 0.5);
        let _ = AttenuationSample::max(&a, &a);
    }

    #[test]
    fn fluorescent_power_matches_repeated_layers() {
        for ctx in [AttenuationContext::plain(), AttenuationContext::polarising()] {
            let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
            assert_eq!(f.power(1.0), f);
            assert_eq!(f.power(2.0), f * f);
            assert_eq!(f.power(3.0), (f * f) * f);

            let x = f.power(2.0).crosstalk().copied().unwrap_or_default();
            assert_eq!(x.get(1, 0), 0.25);

            let none = f.power(0.0);
            assert!(!none.is_fluorescent());
            assert_eq!(none.non_polarising_attenuation(), Some(SpectralSample::ONE));
        }
    }

    #[test]
    #[should_panic]
    fn fluorescent_fractional_power_is_unimplemented() {
        let ctx = AttenuationContext::plain();
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let _ = f.power(0.5);
    }

    #[test]
    fn fluorescent_scale() {
        for ctx in [AttenuationContext::plain(), AttenuationContext::polarising()] {
            let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
            let g = f.scale(0.5);
            assert!(g.is_fluorescent());
            assert_eq!(g.mode(), Some(ctx.mode()));
            let x = g.crosstalk().copied().unwrap_or_default();
            assert_eq!(x.get(1, 0), 0.125);
            assert_eq!(x.get(3, 1), 0.25);
            assert_eq!(g.non_polarising_attenuation(), Some(SpectralSample::new(0.25)));
        }
    }

    #[test]
    fn fluorescent_realign_keeps_crosstalk() {
        let ctx = AttenuationContext::polarising();
        let frame = ReferenceFrame::from_direction(&Vector3f::new(0.0, 0.0, 1.0), PathDirection::FromLight);
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let g = f.realign(&frame, &frame.rotated(0.3));
        assert!(g.is_fluorescent());
        assert_eq!(g.crosstalk(), f.crosstalk());
        assert_eq!(g.non_polarising_attenuation(), f.non_polarising_attenuation());
    }

    #[test]
    #[should_panic]
    fn fluorescent_realign_needs_polarising_mode() {
        let ctx = AttenuationContext::plain();
        let frame = ReferenceFrame::from_direction(&Vector3f::new(0.0, 0.0, 1.0), PathDirection::FromLight);
        let f = AttenuationSample::fluorescent(DirectAttenuationSample::new(&ctx, 0.5), crosstalk());
        let _ = f.realign(&frame, &frame);
    }

    proptest! {
        #[test]
        fn plain_and_polarising_agree_on_unpolarised_light(a in 0.0..1.0f64, b in 0.0..1.0f64, t in 0.0..1.0f64) {
            let results: Vec<SpectralSample> = [AttenuationContext::plain(), AttenuationContext::polarising()]
                .iter()
                .map(|ctx| {
                    let x = AttenuationSample::new(ctx, a);
                    let y = AttenuationSample::depolariser(ctx, SpectralSample::new(b), 0.5);
                    let z = AttenuationSample::lerp(t, &(y * x), &x.complement());
                    z.apply(&LightSample::unpolarised(ctx, SpectralSample::ONE)).intensity()
                })
                .collect();
            for c in 0..HERO_SAMPLES {
                prop_assert!((results[0][c] - results[1][c]).abs() < 1e-12);
            }
        }
    }
}
