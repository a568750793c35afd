//! Light Sample

use crate::attenuation::*;
use crate::geometry::*;
use crate::polarisation::*;
use crate::spectrum::*;
use crate::common::*;
use log::warn;
use std::fmt;
use std::ops::{Add, Mul};

/// A Stokes vector together with the reference frame it is expressed in.
///
/// Light without a frame carries no linear polarisation; it reads the same in
/// every frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PolarisedLight {
    stokes: StokesVectorSample,
    frame: Option<ReferenceFrame>,
}

impl PolarisedLight {
    /// Creates polarised light.
    ///
    /// * `stokes` - The Stokes vector.
    /// * `frame`  - The frame `stokes` is expressed in.
    pub fn new(stokes: StokesVectorSample, frame: Option<ReferenceFrame>) -> Self {
        Self { stokes, frame }
    }

    /// Returns the Stokes vector.
    pub fn stokes(&self) -> &StokesVectorSample {
        &self.stokes
    }

    /// Returns the frame the Stokes vector is expressed in.
    pub fn frame(&self) -> Option<&ReferenceFrame> {
        self.frame.as_ref()
    }

    /// Returns the same light expressed in another coaxial frame.
    ///
    /// * `frame` - The target frame.
    pub fn in_frame(&self, frame: &ReferenceFrame) -> Self {
        let stokes = match self.frame.as_ref() {
            Some(current) if !ReferenceFrame::are_equal(current, frame) => {
                let (c, s) = current.rotation_to(frame);
                self.stokes.rotate(c, s)
            }
            _ => self.stokes,
        };
        Self {
            stokes,
            frame: Some(*frame),
        }
    }

    /// Returns the incoherent sum of two beams, expressed in the frame of
    /// `a` (or that of `b` if `a` has none).
    ///
    /// * `a` - First beam.
    /// * `b` - Second beam.
    pub fn add(a: &Self, b: &Self) -> Self {
        match (a.frame.as_ref(), b.frame.as_ref()) {
            (Some(frame), _) => Self::new(a.stokes + b.in_frame(frame).stokes, Some(*frame)),
            (None, Some(frame)) => Self::new(a.stokes + b.stokes, Some(*frame)),
            (None, None) => Self::new(a.stokes + b.stokes, None),
        }
    }
}

/// Light carried along a path, either as spectral radiance or as a Stokes
/// vector with a reference frame. The variant is fixed by the
/// `AttenuationContext` the value was created in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LightSample {
    /// Spectral radiance without polarisation.
    Plain(SpectralSample),

    /// Polarised spectral radiance.
    Polarised(PolarisedLight),
}

impl LightSample {
    /// Creates unpolarised light.
    ///
    /// * `ctx`       - The attenuation context.
    /// * `intensity` - The radiance.
    pub fn unpolarised(ctx: &AttenuationContext, intensity: SpectralSample) -> Self {
        match ctx.mode() {
            PolarisationMode::Plain => Self::Plain(intensity),
            PolarisationMode::Polarising => {
                Self::Polarised(PolarisedLight::new(StokesVectorSample::unpolarised(intensity), None))
            }
        }
    }

    /// Creates polarised light. Requires a polarising context.
    ///
    /// * `ctx`    - The attenuation context.
    /// * `stokes` - The Stokes vector.
    /// * `frame`  - The frame `stokes` is expressed in.
    pub fn from_stokes(ctx: &AttenuationContext, stokes: StokesVectorSample, frame: &ReferenceFrame) -> Self {
        ctx.require_polarising("polarised light");
        Self::Polarised(PolarisedLight::new(stokes, Some(*frame)))
    }

    /// Returns no light.
    ///
    /// * `ctx` - The attenuation context.
    pub fn zero(ctx: &AttenuationContext) -> Self {
        Self::unpolarised(ctx, SpectralSample::ZERO)
    }

    /// Returns the mode the value was created in.
    pub fn mode(&self) -> PolarisationMode {
        match self {
            Self::Plain(_) => PolarisationMode::Plain,
            Self::Polarised(_) => PolarisationMode::Polarising,
        }
    }

    /// Returns the total intensity.
    pub fn intensity(&self) -> SpectralSample {
        match self {
            Self::Plain(l) => *l,
            Self::Polarised(l) => *l.stokes.intensity(),
        }
    }

    /// Returns the incoherent sum of two beams.
    ///
    /// * `a` - First beam.
    /// * `b` - Second beam.
    pub fn add(a: &Self, b: &Self) -> Self {
        match (a, b) {
            (Self::Plain(x), Self::Plain(y)) => Self::Plain(*x + *y),
            (Self::Polarised(x), Self::Polarised(y)) => Self::Polarised(PolarisedLight::add(x, y)),
            _ => panic!("add: light samples were created in different polarisation modes"),
        }
    }

    /// Adds unpolarised radiance, e.g. fluorescent re-emission.
    ///
    /// * `intensity` - The radiance to add.
    pub fn add_unpolarised(&self, intensity: &SpectralSample) -> Self {
        match self {
            Self::Plain(l) => Self::Plain(*l + *intensity),
            Self::Polarised(l) => {
                let mut stokes = l.stokes;
                stokes[0] += *intensity;
                Self::Polarised(PolarisedLight::new(stokes, l.frame))
            }
        }
    }

    /// Scales the light by a constant factor.
    ///
    /// * `f` - The factor.
    pub fn scale(&self, f: Float) -> Self {
        match self {
            Self::Plain(l) => Self::Plain(*l * f),
            Self::Polarised(l) => Self::Polarised(PolarisedLight::new(l.stokes * f, l.frame)),
        }
    }

    /// Returns the light after passing through an attenuating element.
    ///
    /// * `attenuation` - The element.
    pub fn attenuate(&self, attenuation: &AttenuationSample) -> Self {
        attenuation.apply(self)
    }

    /// Returns true if the light is valid. Logs a warning otherwise.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Plain(l) => l.is_valid_attenuation(),
            Self::Polarised(l) => {
                if !l.stokes.is_valid() {
                    return false;
                }
                if l.frame.is_none() && !(l.stokes[1].is_black() && l.stokes[2].is_black()) {
                    warn!("Light without a reference frame is linearly polarised: {}.", l.stokes);
                    return false;
                }
                true
            }
        }
    }
}

impl Add for LightSample {
    type Output = Self;

    /// Adds the given light and returns the result.
    ///
    /// * `other` - The light to add.
    fn add(self, other: Self) -> Self::Output {
        Self::add(&self, &other)
    }
}

impl Mul<Float> for LightSample {
    type Output = Self;

    /// Scale the light by a constant and return the result.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        self.scale(f)
    }
}

impl fmt::Display for LightSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(l) => write!(f, "L {}", l),
            Self::Polarised(l) => match l.frame.as_ref() {
                Some(frame) => write!(f, "L {} in {}", l.stokes, frame),
                None => write!(f, "L {}", l.stokes),
            },
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn frame() -> ReferenceFrame {
        ReferenceFrame::new(vector3(0.0, 1.0, 0.0), vector3(0.0, 0.0, 1.0))
    }

    #[test]
    fn unpolarised_light_follows_mode() {
        let plain = AttenuationContext::plain();
        let polarising = AttenuationContext::polarising();
        let a = LightSample::unpolarised(&plain, SpectralSample::new(2.0));
        let b = LightSample::unpolarised(&polarising, SpectralSample::new(2.0));
        assert_eq!(a.mode(), PolarisationMode::Plain);
        assert_eq!(b.mode(), PolarisationMode::Polarising);
        assert_eq!(a.intensity(), b.intensity());
        assert!(a.is_valid() && b.is_valid());
    }

    #[test]
    fn sum_of_orthogonal_linear_beams_is_unpolarised() {
        let ctx = AttenuationContext::polarising();
        let f = frame();
        let g = f.rotated(PI_OVER_TWO);
        let a = LightSample::from_stokes(&ctx, StokesVectorSample::linear(SpectralSample::ONE, 0.0), &f);
        let b = LightSample::from_stokes(&ctx, StokesVectorSample::linear(SpectralSample::ONE, 0.0), &g);
        match a + b {
            LightSample::Polarised(l) => {
                assert_eq!(l.frame(), Some(&f));
                for c in 0..HERO_SAMPLES {
                    assert!(approx_eq!(Float, l.stokes()[0][c], 2.0, epsilon = 1e-12));
                    assert!(approx_eq!(Float, l.stokes()[1][c], 0.0, epsilon = 1e-12));
                    assert!(approx_eq!(Float, l.stokes()[2][c], 0.0, epsilon = 1e-12));
                }
            }
            _ => panic!("expected polarised light"),
        }
    }

    #[test]
    fn frameless_light_takes_frame_of_other_beam() {
        let ctx = AttenuationContext::polarising();
        let a = LightSample::unpolarised(&ctx, SpectralSample::ONE);
        let b = LightSample::from_stokes(&ctx, StokesVectorSample::circular(SpectralSample::ONE, true), &frame());
        match LightSample::add(&a, &b) {
            LightSample::Polarised(l) => assert_eq!(l.frame(), Some(&frame())),
            _ => panic!("expected polarised light"),
        }
    }

    #[test]
    fn fluorescent_emission_is_unpolarised() {
        let ctx = AttenuationContext::polarising();
        let l = LightSample::from_stokes(&ctx, StokesVectorSample::linear(SpectralSample::ONE, 0.3), &frame());
        let l = l.add_unpolarised(&SpectralSample::new(0.5));
        assert_eq!(l.intensity(), SpectralSample::new(1.5));
        assert!(l.is_valid());
    }

    #[test]
    fn scale_scales_all_components() {
        let ctx = AttenuationContext::polarising();
        let l = LightSample::from_stokes(&ctx, StokesVectorSample::linear(SpectralSample::ONE, 0.0), &frame());
        let l = l * 0.5;
        assert_eq!(l.intensity(), SpectralSample::new(0.5));
    }

    #[test]
    #[should_panic]
    fn polarised_light_requires_polarising_context() {
        let ctx = AttenuationContext::plain();
        let _ = LightSample::from_stokes(&ctx, StokesVectorSample::ZERO, &frame());
    }

    #[test]
    #[should_panic]
    fn mixed_modes_panic() {
        let a = LightSample::zero(&AttenuationContext::plain());
        let b = LightSample::zero(&AttenuationContext::polarising());
        let _ = a + b;
    }

    #[test]
    fn frameless_linear_light_is_invalid() {
        let l = LightSample::Polarised(PolarisedLight::new(
            StokesVectorSample::linear(SpectralSample::ONE, 0.0),
            None,
        ));
        assert!(!l.is_valid());
    }
}
