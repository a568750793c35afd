//! Reference Frames

use super::*;
use crate::common::*;
use log::trace;
use std::fmt;

/// Which end of a light path a ray was traced from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathDirection {
    /// Ray direction is the direction in which light travels.
    FromLight,

    /// Ray direction is opposite to the direction in which light travels.
    FromEye,
}

impl PathDirection {
    /// Returns the direction light travels along a ray with direction `d`.
    ///
    /// * `d` - Ray direction.
    pub fn light_direction(&self, d: &Vector3f) -> Vector3f {
        match self {
            Self::FromLight => *d,
            Self::FromEye => -*d,
        }
    }
}

/// A pair of orthonormal vectors spanning the plane perpendicular to the
/// propagation direction of light. Stokes vectors and Mueller matrices are
/// only meaningful relative to one of these.
///
/// `c0 x c1` is the propagation direction. Orthonormality is assumed and only
/// checked in debug builds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReferenceFrame {
    c: [Vector3f; 2],
}

impl ReferenceFrame {
    /// Creates a reference frame from two basis vectors.
    ///
    /// * `c0` - First basis vector.
    /// * `c1` - Second basis vector, orthogonal to `c0`.
    pub fn new(c0: Vector3f, c1: Vector3f) -> Self {
        let ret = Self { c: [c0, c1] };
        debug_assert!(ret.is_orthonormal(), "reference frame {} is not orthonormal", ret);
        ret
    }

    /// Creates an arbitrary reference frame for light travelling along a ray.
    ///
    /// * `direction` - Ray direction.
    /// * `path`      - Whether the ray was traced from the light or the eye.
    pub fn from_direction(direction: &Vector3f, path: PathDirection) -> Self {
        let l = path.light_direction(direction).normalize();
        let c0 = l.perpendicular();
        let c1 = l.cross(&c0);
        Self::new(c0, c1)
    }

    /// Creates the reference frame of light travelling along a ray that hits
    /// a surface. `c0` is perpendicular to the plane of incidence (the
    /// s-direction) and `c1` lies in it (the p-direction). Falls back to an
    /// arbitrary frame at normal incidence.
    ///
    /// * `direction` - Ray direction.
    /// * `normal`    - Surface normal.
    /// * `path`      - Whether the ray was traced from the light or the eye.
    pub fn from_direction_and_normal(
        direction: &Vector3f,
        normal: &Vector3f,
        path: PathDirection,
    ) -> Self {
        let l = path.light_direction(direction).normalize();
        let s = l.cross(normal);
        if s.length_squared() < 1e-12 {
            trace!("Normal incidence; using an arbitrary reference frame.");
            return Self::from_direction(direction, path);
        }
        let c0 = s.normalize();
        let c1 = l.cross(&c0);
        Self::new(c0, c1)
    }

    /// Returns the first basis vector.
    pub fn c0(&self) -> &Vector3f {
        &self.c[0]
    }

    /// Returns the second basis vector.
    pub fn c1(&self) -> &Vector3f {
        &self.c[1]
    }

    /// Returns the propagation direction of light described in this frame.
    pub fn propagation(&self) -> Vector3f {
        self.c[0].cross(&self.c[1])
    }

    /// Returns the frame for light travelling in the opposite direction.
    pub fn flipped(&self) -> Self {
        Self {
            c: [self.c[0], -self.c[1]],
        }
    }

    /// Returns true if both basis vectors have unit length and are mutually
    /// orthogonal.
    pub fn is_orthonormal(&self) -> bool {
        abs(self.c[0].length() - 1.0) < 1e-4
            && abs(self.c[1].length() - 1.0) < 1e-4
            && abs(self.c[0].dot(&self.c[1])) < 1e-4
    }

    /// Returns `(cos φ, sin φ)` where φ is the angle about the propagation
    /// axis that takes this frame onto `target`. A Stokes vector is moved
    /// from this frame into `target` by the rotation `R(φ)`.
    ///
    /// * `target` - A coaxial reference frame.
    pub fn rotation_to(&self, target: &Self) -> (Float, Float) {
        debug_assert!(
            Self::are_coaxial(self, target),
            "rotation between frames that are not coaxial: {} -> {}",
            self,
            target
        );
        (target.c[0].dot(&self.c[0]), target.c[0].dot(&self.c[1]))
    }

    /// Returns true if two frames share the same propagation axis within
    /// `COAXIAL_TOLERANCE_DEGREES`.
    ///
    /// * `a` - First frame.
    /// * `b` - Second frame.
    pub fn are_coaxial(a: &Self, b: &Self) -> bool {
        a.propagation().dot(&b.propagation()) >= radians(COAXIAL_TOLERANCE_DEGREES).cos()
    }

    /// Returns true if two frames are numerically the same so no rotation is
    /// needed to move between them.
    ///
    /// * `a` - First frame.
    /// * `b` - Second frame.
    pub fn are_equal(a: &Self, b: &Self) -> bool {
        (a.c[0] - b.c[0]).length() <= FRAME_EQUALITY_TOLERANCE
            && (a.c[1] - b.c[1]).length() <= FRAME_EQUALITY_TOLERANCE
    }

    /// Returns this frame rotated by `phi` radians about its propagation axis.
    ///
    /// * `phi` - Rotation angle.
    pub fn rotated(&self, phi: Float) -> Self {
        self.rotated_cs(phi.cos(), phi.sin())
    }

    /// Returns this frame rotated about its propagation axis by the angle
    /// with the given cosine and sine.
    ///
    /// * `cos_phi` - Cosine of the rotation angle.
    /// * `sin_phi` - Sine of the rotation angle.
    pub fn rotated_cs(&self, cos_phi: Float, sin_phi: Float) -> Self {
        Self::new(
            self.c[0] * cos_phi + self.c[1] * sin_phi,
            self.c[1] * cos_phi - self.c[0] * sin_phi,
        )
    }
}

impl fmt::Display for ReferenceFrame {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RF[{} {}]", self.c[0], self.c[1])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
