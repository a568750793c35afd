//! Direct Attenuation Sample

use super::*;
use crate::common::*;
use crate::geometry::*;
use crate::light::*;
use crate::polarisation::*;
use crate::spectrum::*;
use log::{trace, warn};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A Mueller matrix together with the reference frames of light entering and
/// leaving the element.
///
/// Frames are either both present or both absent. Only rotationally invariant
/// matrices may omit them; such an element behaves the same in any frame and
/// leaves light in the frame it arrived in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MuellerAttenuation {
    matrix: MuellerMatrixSample,
    entry: Option<ReferenceFrame>,
    exit: Option<ReferenceFrame>,
}

impl MuellerAttenuation {
    /// Creates an element with entry and exit frames.
    ///
    /// * `matrix` - The Mueller matrix.
    /// * `entry`  - Frame of light entering the element.
    /// * `exit`   - Frame of light leaving the element.
    pub fn new(matrix: MuellerMatrixSample, entry: ReferenceFrame, exit: ReferenceFrame) -> Self {
        Self {
            matrix,
            entry: Some(entry),
            exit: Some(exit),
        }
    }

    /// Creates an element without frames. Panics unless the matrix is
    /// rotationally invariant.
    ///
    /// * `matrix` - A rotationally invariant Mueller matrix.
    pub fn frameless(matrix: MuellerMatrixSample) -> Self {
        assert!(
            matrix.properties().is_rotation_invariant(),
            "only rotationally invariant Mueller matrices can omit reference frames"
        );
        Self {
            matrix,
            entry: None,
            exit: None,
        }
    }

    /// Returns the Mueller matrix.
    pub fn matrix(&self) -> &MuellerMatrixSample {
        &self.matrix
    }

    /// Returns the frame of light entering the element.
    pub fn entry(&self) -> Option<&ReferenceFrame> {
        self.entry.as_ref()
    }

    /// Returns the frame of light leaving the element.
    pub fn exit(&self) -> Option<&ReferenceFrame> {
        self.exit.as_ref()
    }

    /// Returns both frames, if present.
    fn frames(&self) -> Option<(ReferenceFrame, ReferenceFrame)> {
        match (self.entry, self.exit) {
            (Some(entry), Some(exit)) => Some((entry, exit)),
            _ => None,
        }
    }

    /// Returns the same element expressed with new entry and exit frames,
    /// which must be coaxial with the current ones.
    ///
    /// * `entry` - New entry frame.
    /// * `exit`  - New exit frame.
    pub fn realigned(&self, entry: &ReferenceFrame, exit: &ReferenceFrame) -> Self {
        let matrix = match self.frames() {
            None => {
                // Valid in any frame, so it currently reads as (exit, exit).
                // Frames on different axes (reflection) are matched by label.
                if ReferenceFrame::are_equal(entry, exit) || !ReferenceFrame::are_coaxial(entry, exit) {
                    self.matrix
                } else {
                    let (c, s) = entry.rotation_to(exit);
                    self.matrix.rotate_input(c, s)
                }
            }
            Some((old_entry, old_exit)) => {
                let same_entry = ReferenceFrame::are_equal(entry, &old_entry);
                let same_exit = ReferenceFrame::are_equal(&old_exit, exit);
                if same_entry && same_exit {
                    self.matrix
                } else if self.matrix.properties().is_rotation_invariant() {
                    // Rotations commute with the matrix so both collapse into
                    // a single output rotation.
                    let (ci, si) = entry.rotation_to(&old_entry);
                    let (co, so) = old_exit.rotation_to(exit);
                    let (c, s) = (co * ci - so * si, so * ci + co * si);
                    let (c2, _) = double_angle(c, s);
                    if c2 >= 1.0 - MACHINE_EPSILON * 8.0 {
                        trace!("Realignment of invariant matrix cancels out.");
                        self.matrix
                    } else {
                        self.matrix.rotate_output(c, s)
                    }
                } else {
                    let mut m = self.matrix;
                    if !same_entry {
                        let (c, s) = entry.rotation_to(&old_entry);
                        m = m.rotate_input(c, s);
                    }
                    if !same_exit {
                        let (c, s) = old_exit.rotation_to(exit);
                        m = m.rotate_output(c, s);
                    }
                    m
                }
            }
        };

        Self {
            matrix,
            entry: Some(*entry),
            exit: Some(*exit),
        }
    }

    /// Returns the element formed by light passing through `a0` and then
    /// `a1`. `a1` is rotated so its entry frame matches the exit frame of
    /// `a0`.
    ///
    /// * `a0` - Element light passes first.
    /// * `a1` - Element light passes second.
    pub fn concat(a0: &Self, a1: &Self) -> Self {
        match (a0.frames(), a1.frames()) {
            (None, None) => Self {
                matrix: MuellerMatrixSample::concat(&a0.matrix, &a1.matrix),
                entry: None,
                exit: None,
            },
            (Some((entry, exit)), None) | (None, Some((entry, exit))) => Self {
                matrix: MuellerMatrixSample::concat(&a0.matrix, &a1.matrix),
                entry: Some(entry),
                exit: Some(exit),
            },
            (Some((entry0, exit0)), Some((entry1, exit1))) => {
                let (m1, exit) = if ReferenceFrame::are_equal(&exit0, &entry1) {
                    (a1.matrix, exit1)
                } else {
                    let (c, s) = exit0.rotation_to(&entry1);
                    if a1.matrix.properties().is_rotation_invariant() {
                        // Relabel the exit frame instead of rotating.
                        (a1.matrix, exit1.rotated_cs(c, -s))
                    } else {
                        (a1.matrix.rotate_input(c, s), exit1)
                    }
                };
                Self {
                    matrix: MuellerMatrixSample::concat(&a0.matrix, &m1),
                    entry: Some(entry0),
                    exit: Some(exit),
                }
            }
        }
    }

    /// Combines two elements entry-wise after expressing `b` in the frames of
    /// `a` (or `a` in those of `b` if `a` has none).
    fn combine<F>(a: &Self, b: &Self, f: F) -> Self
    where
        F: Fn(&MuellerMatrixSample, &MuellerMatrixSample) -> MuellerMatrixSample,
    {
        match (a.frames(), b.frames()) {
            (Some((entry, exit)), _) => {
                let b = b.realigned(&entry, &exit);
                Self {
                    matrix: f(&a.matrix, &b.matrix),
                    entry: Some(entry),
                    exit: Some(exit),
                }
            }
            (None, Some((entry, exit))) => {
                let a = a.realigned(&entry, &exit);
                Self {
                    matrix: f(&a.matrix, &b.matrix),
                    entry: Some(entry),
                    exit: Some(exit),
                }
            }
            (None, None) => Self {
                matrix: f(&a.matrix, &b.matrix),
                entry: None,
                exit: None,
            },
        }
    }

    /// Replaces the matrix, keeping the frames.
    fn with_matrix(&self, matrix: MuellerMatrixSample) -> Self {
        Self {
            matrix,
            entry: self.entry,
            exit: self.exit,
        }
    }

    /// Applies the element to polarised light, first rotating the light into
    /// the entry frame.
    ///
    /// * `light` - Incident light.
    pub fn apply(&self, light: &PolarisedLight) -> PolarisedLight {
        let stokes = match (light.frame(), self.entry.as_ref()) {
            (Some(frame), Some(entry)) if !ReferenceFrame::are_equal(frame, entry) => {
                let (c, s) = frame.rotation_to(entry);
                light.stokes().rotate(c, s)
            }
            _ => *light.stokes(),
        };
        let frame = self.exit.or_else(|| light.frame().copied());
        PolarisedLight::new(self.matrix.apply(&stokes), frame)
    }

    /// Returns true if the matrix is valid and the frames are consistent.
    ///
    /// * `allow_gain` - Accept non-polarising attenuation greater than 1.
    /// * `epsilon`    - Realizability tolerance.
    pub fn is_valid_with(&self, allow_gain: bool, epsilon: Float) -> bool {
        match (self.entry.as_ref(), self.exit.as_ref()) {
            (Some(entry), Some(exit)) => {
                if !entry.is_orthonormal() || !exit.is_orthonormal() {
                    warn!("Mueller attenuation frames {} {} are not orthonormal.", entry, exit);
                    return false;
                }
            }
            (None, None) => {
                if !self.matrix.properties().is_rotation_invariant() {
                    warn!("Mueller attenuation without frames is not rotationally invariant.");
                    return false;
                }
            }
            _ => {
                warn!("Mueller attenuation has only one of its frames.");
                return false;
            }
        }
        self.matrix.is_valid_with(allow_gain, epsilon)
    }
}

impl fmt::Display for MuellerAttenuation {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.entry.as_ref(), self.exit.as_ref()) {
            (Some(entry), Some(exit)) => writeln!(f, "entry {}\nexit  {}", entry, exit)?,
            _ => writeln!(f, "no frames")?,
        }
        write!(f, "{}", self.matrix)
    }
}

/// Attenuation of a single optical interaction, without fluorescence.
///
/// The variant is fixed by the `AttenuationContext` the value was created in.
/// Combining values of different variants is a programming error and panics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DirectAttenuationSample {
    /// Spectral attenuation that ignores polarisation.
    Plain(SpectralSample),

    /// Mueller matrix attenuation with reference frames.
    Polarising(MuellerAttenuation),
}

use DirectAttenuationSample::{Plain, Polarising};

/// Panics naming an operation that combined values of different modes.
fn mode_mismatch(operation: &str) -> ! {
    panic!("{}: operands were created in different polarisation modes", operation);
}

impl DirectAttenuationSample {
    /// Creates an element with the same attenuation at every wavelength that
    /// does not change polarisation.
    ///
    /// * `ctx`   - The attenuation context.
    /// * `value` - The attenuation.
    pub fn new(ctx: &AttenuationContext, value: Float) -> Self {
        Self::from_spectrum(ctx, SpectralSample::new(value))
    }

    /// Creates an element with a spectral attenuation that does not change
    /// polarisation.
    ///
    /// * `ctx`         - The attenuation context.
    /// * `attenuation` - The attenuation.
    pub fn from_spectrum(ctx: &AttenuationContext, attenuation: SpectralSample) -> Self {
        Self::non_polarising_in(ctx.mode(), attenuation)
    }

    /// Returns free transmission.
    ///
    /// * `ctx` - The attenuation context.
    pub fn identity(ctx: &AttenuationContext) -> Self {
        Self::identity_in(ctx.mode())
    }

    /// Returns a total blocker.
    ///
    /// * `ctx` - The attenuation context.
    pub fn zero(ctx: &AttenuationContext) -> Self {
        Self::zero_in(ctx.mode())
    }

    /// Creates a (partial) depolariser. In plain mode this is a spectral
    /// attenuation.
    ///
    /// * `ctx`            - The attenuation context.
    /// * `attenuation`    - Intensity attenuation.
    /// * `depolarisation` - Fraction of polarisation destroyed in [0, 1].
    pub fn depolariser(ctx: &AttenuationContext, attenuation: SpectralSample, depolarisation: Float) -> Self {
        match ctx.mode() {
            PolarisationMode::Plain => Plain(attenuation),
            PolarisationMode::Polarising => Polarising(MuellerAttenuation::frameless(
                MuellerMatrixSample::partial_depolariser(attenuation, clamp(depolarisation, 0.0, 1.0)),
            )),
        }
    }

    /// Creates a linear polariser. Requires a polarising context.
    ///
    /// * `ctx`      - The attenuation context.
    /// * `frame`    - Frame of light entering and leaving the element.
    /// * `angle`    - Transmission axis angle from `c0` of `frame`.
    /// * `strength` - 1 for an ideal polariser, 0 for free transmission.
    pub fn linear_polariser(ctx: &AttenuationContext, frame: &ReferenceFrame, angle: Float, strength: Float) -> Self {
        ctx.require_polarising("linear polariser");
        Polarising(MuellerAttenuation::new(
            MuellerMatrixSample::linear_polariser(angle, clamp(strength, 0.0, 1.0)),
            *frame,
            *frame,
        ))
    }

    /// Creates a linear retarder. Requires a polarising context.
    ///
    /// * `ctx`   - The attenuation context.
    /// * `frame` - Frame of light entering and leaving the element.
    /// * `angle` - Fast axis angle from `c0` of `frame`.
    /// * `delay` - Retardance in radians.
    pub fn retarder(ctx: &AttenuationContext, frame: &ReferenceFrame, angle: Float, delay: Float) -> Self {
        ctx.require_polarising("retarder");
        Polarising(MuellerAttenuation::new(
            MuellerMatrixSample::retarder(angle, delay),
            *frame,
            *frame,
        ))
    }

    /// Creates a rotator. Requires a polarising context.
    ///
    /// * `ctx`   - The attenuation context.
    /// * `angle` - Rotation of the plane of polarisation in radians.
    pub fn rotator(ctx: &AttenuationContext, angle: Float) -> Self {
        ctx.require_polarising("rotator");
        Polarising(MuellerAttenuation::frameless(MuellerMatrixSample::rotator(angle)))
    }

    /// Creates an element from an arbitrary Mueller matrix. Requires a
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
        ctx.require_polarising("Mueller matrix attenuation");
        Polarising(MuellerAttenuation::new(matrix, *entry, *exit))
    }

    /// Returns a non-polarising element in the given mode.
    pub(crate) fn non_polarising_in(mode: PolarisationMode, attenuation: SpectralSample) -> Self {
        match mode {
            PolarisationMode::Plain => Plain(attenuation),
            PolarisationMode::Polarising => Polarising(MuellerAttenuation::frameless(
                MuellerMatrixSample::non_polarising(attenuation),
            )),
        }
    }

    /// Returns free transmission in the given mode.
    pub(crate) fn identity_in(mode: PolarisationMode) -> Self {
        Self::non_polarising_in(mode, SpectralSample::ONE)
    }

    /// Returns a total blocker in the given mode.
    pub(crate) fn zero_in(mode: PolarisationMode) -> Self {
        match mode {
            PolarisationMode::Plain => Plain(SpectralSample::ZERO),
            PolarisationMode::Polarising => Polarising(MuellerAttenuation::frameless(MuellerMatrixSample::zero())),
        }
    }

    /// Returns the mode the value was created in.
    pub fn mode(&self) -> PolarisationMode {
        match self {
            Plain(_) => PolarisationMode::Plain,
            Polarising(_) => PolarisationMode::Polarising,
        }
    }

    /// Returns the Mueller attenuation in polarising mode.
    pub fn mueller(&self) -> Option<&MuellerAttenuation> {
        match self {
            Plain(_) => None,
            Polarising(m) => Some(m),
        }
    }

    /// Returns the attenuation of unpolarised intensity.
    pub fn non_polarising_attenuation(&self) -> SpectralSample {
        match self {
            Plain(a) => *a,
            Polarising(m) => *m.matrix.non_polarising_attenuation(),
        }
    }

    /// Returns the element formed by light passing through `a0` and then
    /// `a1`, i.e. `a1 · a0`.
    ///
    /// * `a0` - Element light passes first.
    /// * `a1` - Element light passes second.
    pub fn concat(a0: &Self, a1: &Self) -> Self {
        match (a0, a1) {
            (Plain(x), Plain(y)) => Plain(*x * *y),
            (Polarising(x), Polarising(y)) => Polarising(MuellerAttenuation::concat(x, y)),
            _ => mode_mismatch("concat"),
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

    /// Returns the sum of two elements, expressed in the frames of `a`.
    ///
    /// * `a` - First element.
    /// * `b` - Second element.
    pub fn add(a: &Self, b: &Self) -> Self {
        match (a, b) {
            (Plain(x), Plain(y)) => Plain(*x + *y),
            (Polarising(x), Polarising(y)) => Polarising(MuellerAttenuation::combine(x, y, MuellerMatrixSample::add)),
            _ => mode_mismatch("add"),
        }
    }

    /// Returns the difference of two elements, expressed in the frames of
    /// `a`.
    ///
    /// * `a` - Minuend.
    /// * `b` - Subtrahend.
    pub fn sub(a: &Self, b: &Self) -> Self {
        match (a, b) {
            (Plain(x), Plain(y)) => Plain(*x - *y),
            (Polarising(x), Polarising(y)) => Polarising(MuellerAttenuation::combine(x, y, MuellerMatrixSample::sub)),
            _ => mode_mismatch("sub"),
        }
    }

    /// Linearly interpolates two elements, expressed in the frames of `a`.
    ///
    /// * `t` - Parameter; 0 returns `a`, 1 returns `b`.
    /// * `a` - Element at t=0.
    /// * `b` - Element at t=1.
    pub fn lerp(t: Float, a: &Self, b: &Self) -> Self {
        match (a, b) {
            (Plain(x), Plain(y)) => Plain(SpectralSample::lerp(t, x, y)),
            (Polarising(x), Polarising(y)) => {
                Polarising(MuellerAttenuation::combine(x, y, |m0, m1| MuellerMatrixSample::lerp(t, m0, m1)))
            }
            _ => mode_mismatch("lerp"),
        }
    }

    /// Scales the attenuation by a constant factor.
    ///
    /// * `f` - The factor.
    pub fn scale(&self, f: Float) -> Self {
        match self {
            Plain(a) => Plain(*a * f),
            Polarising(m) => Polarising(m.with_matrix(m.matrix.scale(f))),
        }
    }

    /// Raises the attenuation to a real power, e.g. for the transmission of a
    /// thicker layer of the same medium.
    ///
    /// * `p` - The power.
    pub fn power(&self, p: Float) -> Self {
        match self {
            Plain(a) => Plain(a.pow(p)),
            Polarising(m) => Polarising(m.with_matrix(m.matrix.power(p))),
        }
    }

    /// Returns free transmission minus this element.
    pub fn complement(&self) -> Self {
        match self {
            Plain(a) => Plain(a.complement()),
            Polarising(m) => Polarising(m.with_matrix(m.matrix.complement())),
        }
    }

    /// Returns the element expressed with new entry and exit frames. Panics
    /// in plain mode.
    ///
    /// * `entry` - New entry frame.
    /// * `exit`  - New exit frame.
    pub fn realign(&self, entry: &ReferenceFrame, exit: &ReferenceFrame) -> Self {
        match self {
            Plain(_) => panic!("realign requires a polarising attenuation"),
            Polarising(m) => Polarising(m.realigned(entry, exit)),
        }
    }

    /// Applies the element to light created in the same mode.
    ///
    /// * `light` - Incident light.
    pub fn apply(&self, light: &LightSample) -> LightSample {
        match (self, light) {
            (Plain(a), LightSample::Plain(l)) => LightSample::Plain(*a * *l),
            (Polarising(m), LightSample::Polarised(l)) => LightSample::Polarised(m.apply(l)),
            _ => mode_mismatch("apply"),
        }
    }

    /// Returns true if the attenuation is valid under the context's options.
    /// Logs a warning describing the first failing check.
    ///
    /// * `ctx` - The attenuation context.
    pub fn is_valid(&self, ctx: &AttenuationContext) -> bool {
        let options = ctx.options();
        match self {
            Plain(a) => {
                if !a.is_valid_attenuation() {
                    return false;
                }
                if !options.allow_gain && a.max_value() > 1.0 + SANITY_EPSILON {
                    warn!("Plain attenuation {} exceeds 1.", a);
                    return false;
                }
                true
            }
            Polarising(m) => m.is_valid_with(options.allow_gain, options.realizability_epsilon),
        }
    }
}

impl Add for DirectAttenuationSample {
    type Output = Self;

    /// Adds the given element and returns the result.
    ///
    /// * `other` - The element to add.
    fn add(self, other: Self) -> Self::Output {
        Self::add(&self, &other)
    }
}

impl Sub for DirectAttenuationSample {
    type Output = Self;

    /// Subtracts the given element and returns the result.
    ///
    /// * `other` - The element to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::sub(&self, &other)
    }
}

impl Mul for DirectAttenuationSample {
    type Output = Self;

    /// Returns `self · other`: light passes `other` first.
    ///
    /// * `other` - The element light passes first.
    fn mul(self, other: Self) -> Self::Output {
        Self::concat(&other, &self)
    }
}

impl fmt::Display for DirectAttenuationSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plain(a) => write!(f, "DA plain {}", a),
            Polarising(m) => write!(f, "DA polarising\n{}", m),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
