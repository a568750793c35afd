//! Attenuation Context

use super::*;
use crate::common::*;
use log::{debug, warn};

/// Selects the representation used for every attenuation and light value
/// created through a context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolarisationMode {
    /// Attenuation is a spectral value; polarisation is ignored.
    Plain,

    /// Attenuation is a Mueller matrix with entry and exit reference frames.
    Polarising,
}

impl Default for PolarisationMode {
    /// Returns `Plain`.
    fn default() -> Self {
        Self::Plain
    }
}

/// Options used to build an `AttenuationContext`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContextOptions {
    /// Representation of attenuation values.
    pub mode: PolarisationMode,

    /// Accept non-polarising attenuation greater than 1 in validity checks.
    pub allow_gain: bool,

    /// Tolerance for negative coherency matrix eigenvalues.
    pub realizability_epsilon: Float,
}

impl Default for ContextOptions {
    /// Returns plain mode without gain.
    fn default() -> Self {
        Self {
            mode: PolarisationMode::Plain,
            allow_gain: false,
            realizability_epsilon: REALIZABILITY_EPSILON,
        }
    }
}

impl ContextOptions {
    /// Returns options for the given mode and defaults otherwise.
    ///
    /// * `mode` - Representation of attenuation values.
    pub fn new(mode: PolarisationMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Sets whether gain is accepted by validity checks.
    ///
    /// * `allow_gain` - Accept non-polarising attenuation greater than 1.
    pub fn allow_gain(mut self, allow_gain: bool) -> Self {
        self.allow_gain = allow_gain;
        self
    }

    /// Sets the realizability tolerance.
    ///
    /// * `epsilon` - Tolerance for negative coherency matrix eigenvalues.
    pub fn realizability_epsilon(mut self, epsilon: Float) -> Self {
        self.realizability_epsilon = epsilon;
        self
    }

    /// Builds the context.
    pub fn build(self) -> AttenuationContext {
        AttenuationContext::new(self)
    }
}

/// Immutable configuration shared by reference with every constructor of
/// mode-dependent values. Holds the cached free transmission and total blocker
/// for its mode.
#[derive(Debug)]
pub struct AttenuationContext {
    options: ContextOptions,
    free_transmission: AttenuationSample,
    total_blocker: AttenuationSample,
}

impl AttenuationContext {
    /// Creates a new context.
    ///
    /// * `options` - Context options.
    pub fn new(options: ContextOptions) -> Self {
        let mut options = options;
        if !(options.realizability_epsilon >= 0.0) {
            warn!(
                "Invalid realizability epsilon {}; using {}.",
                options.realizability_epsilon, REALIZABILITY_EPSILON
            );
            options.realizability_epsilon = REALIZABILITY_EPSILON;
        }

        debug!("Creating {:?} attenuation context.", options.mode);
        let free_transmission = AttenuationSample::from_direct(DirectAttenuationSample::identity_in(options.mode));
        let total_blocker = AttenuationSample::from_direct(DirectAttenuationSample::zero_in(options.mode));

        Self {
            options,
            free_transmission,
            total_blocker,
        }
    }

    /// Returns a plain context with default options.
    pub fn plain() -> Self {
        ContextOptions::new(PolarisationMode::Plain).build()
    }

    /// Returns a polarising context with default options.
    pub fn polarising() -> Self {
        ContextOptions::new(PolarisationMode::Polarising).build()
    }

    /// Returns the options.
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Returns the representation of attenuation values.
    pub fn mode(&self) -> PolarisationMode {
        self.options.mode
    }

    /// Returns true if values carry polarisation.
    pub fn is_polarising(&self) -> bool {
        self.options.mode == PolarisationMode::Polarising
    }

    /// Returns the cached element that lets all light pass unchanged.
    pub fn free_transmission(&self) -> &AttenuationSample {
        &self.free_transmission
    }

    /// Returns the cached element that blocks all light.
    pub fn total_blocker(&self) -> &AttenuationSample {
        &self.total_blocker
    }

    /// Panics unless the context is polarising.
    ///
    /// * `operation` - Name of the operation for the panic message.
    pub(crate) fn require_polarising(&self, operation: &str) {
        if !self.is_polarising() {
            panic!("{} requires a polarising attenuation context", operation);
        }
    }
}

impl Drop for AttenuationContext {
    fn drop(&mut self) {
        debug!("Releasing {:?} attenuation context.", self.options.mode);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
