//! Crosstalk Sample.

use super::*;
use crate::common::*;
use itertools::Itertools;
use log::warn;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Number of entries strictly below the main diagonal of a
/// `HERO_SAMPLES` x `HERO_SAMPLES` matrix.
pub const CROSSTALK_SAMPLES: usize = HERO_SAMPLES * (HERO_SAMPLES - 1) / 2;

/// Returns the storage offset of the entry at (`row`, `col`).
///
/// * `row` - Receiving channel; must be greater than `col`.
/// * `col` - Emitting channel.
#[inline(always)]
fn offset(row: usize, col: usize) -> usize {
    debug_assert!(row > col && row < HERO_SAMPLES);
    row * (row - 1) / 2 + col
}

/// Energy transferred between hero wavelengths by fluorescence.
///
/// The entries form the strictly lower triangular part of an implicit
/// `HERO_SAMPLES` x `HERO_SAMPLES` attenuation matrix whose main diagonal is
/// held elsewhere. Entry (row, col) is the fraction of channel `col` that is
/// re-emitted in channel `row`; all entries are finite and non-negative.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrosstalkSample {
    /// Packed entries, row by row.
    c: [Float; CROSSTALK_SAMPLES],
}

impl CrosstalkSample {
    /// Crosstalk with no energy transfer.
    pub const ZERO: Self = Self {
        c: [0.0; CROSSTALK_SAMPLES],
    };

    /// Create a new `CrosstalkSample` with every entry set to `v`.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self {
            c: [v; CROSSTALK_SAMPLES],
        }
    }

    /// Returns the entry at (`row`, `col`). Entries on or above the main
    /// diagonal are not stored and read as 0.
    ///
    /// * `row` - Receiving channel.
    /// * `col` - Emitting channel.
    pub fn get(&self, row: usize, col: usize) -> Float {
        assert!(row < HERO_SAMPLES && col < HERO_SAMPLES);
        if row > col {
            self.c[offset(row, col)]
        } else {
            0.0
        }
    }

    /// Sets the entry at (`row`, `col`).
    ///
    /// * `row` - Receiving channel; must be greater than `col`.
    /// * `col` - Emitting channel.
    /// * `v`   - The value.
    pub fn set(&mut self, row: usize, col: usize, v: Float) {
        assert!(
            row > col && row < HERO_SAMPLES,
            "crosstalk entry ({}, {}) is not below the diagonal",
            row,
            col
        );
        self.c[offset(row, col)] = v;
    }

    /// Iterates over the (row, col) pairs of the stored entries in storage
    /// order.
    pub fn indices() -> impl Iterator<Item = (usize, usize)> {
        (1..HERO_SAMPLES).flat_map(|row| (0..row).map(move |col| (row, col)))
    }

    /// Returns the number of entries in band `k`, the `k`-th sub-diagonal.
    ///
    /// * `k` - Band index in [1, HERO_SAMPLES).
    pub fn band_len(k: usize) -> usize {
        assert!(k >= 1 && k < HERO_SAMPLES, "invalid crosstalk band {}", k);
        HERO_SAMPLES - k
    }

    /// Iterates over the values of band `k`, i.e. entries (c + k, c).
    ///
    /// * `k` - Band index in [1, HERO_SAMPLES).
    pub fn band_values(&self, k: usize) -> impl Iterator<Item = Float> + '_ {
        (0..Self::band_len(k)).map(move |col| self.c[offset(col + k, col)])
    }

    /// Sets every entry of band `k` to `v`.
    ///
    /// * `k` - Band index in [1, HERO_SAMPLES).
    /// * `v` - The value.
    pub fn set_band(&mut self, k: usize, v: Float) {
        self.band_apply(k, |_, _| v);
    }

    /// Adds band `k` of `other` to band `k` of this sample, leaving the other
    /// bands untouched.
    ///
    /// * `k`     - Band index in [1, HERO_SAMPLES).
    /// * `other` - The other sample.
    pub fn add_band(&mut self, k: usize, other: &Self) {
        self.band_apply(k, |i, v| v + other.c[i]);
    }

    /// Multiplies band `k` by band `k` of `other`.
    ///
    /// * `k`     - Band index in [1, HERO_SAMPLES).
    /// * `other` - The other sample.
    pub fn mul_band(&mut self, k: usize, other: &Self) {
        self.band_apply(k, |i, v| v * other.c[i]);
    }

    /// Scales band `k` by a constant factor.
    ///
    /// * `k` - Band index in [1, HERO_SAMPLES).
    /// * `f` - The factor.
    pub fn scale_band(&mut self, k: usize, f: Float) {
        self.band_apply(k, |_, v| v * f);
    }

    /// Applies `f(offset, value)` to the entries of band `k`.
    fn band_apply<F: Fn(usize, Float) -> Float>(&mut self, k: usize, f: F) {
        for col in 0..Self::band_len(k) {
            let i = offset(col + k, col);
            self.c[i] = f(i, self.c[i]);
        }
    }

    /// Returns the crosstalk of the element formed by light passing through
    /// element 0 and then element 1.
    ///
    /// With `Ai = Di + Xi` (diagonal plus strictly lower part) the product
    /// `A1 A0` has the lower part `D1 X0 + X1 D0 + X1 X0`.
    ///
    /// * `d0` - Diagonal of the first element.
    /// * `x0` - Crosstalk of the first element, if fluorescent.
    /// * `d1` - Diagonal of the second element.
    /// * `x1` - Crosstalk of the second element, if fluorescent.
    pub fn concat(
        d0: &SpectralSample,
        x0: Option<&Self>,
        d1: &SpectralSample,
        x1: Option<&Self>,
    ) -> Self {
        let zero = Self::ZERO;
        let x0 = x0.unwrap_or(&zero);
        let x1 = x1.unwrap_or(&zero);

        let mut ret = Self::ZERO;
        for (row, col) in Self::indices() {
            let through = ((col + 1)..row).fold(0.0, |sum, k| sum + x1.get(row, k) * x0.get(k, col));
            ret.set(
                row,
                col,
                d1[row] * x0.get(row, col) + x1.get(row, col) * d0[col] + through,
            );
        }
        ret
    }

    /// Returns the re-emitted intensity for a given incident intensity.
    ///
    /// * `intensity` - Incident intensity per channel.
    pub fn apply(&self, intensity: &SpectralSample) -> SpectralSample {
        let mut ret = SpectralSample::ZERO;
        for (row, col) in Self::indices() {
            ret[row] += self.get(row, col) * intensity[col];
        }
        ret
    }

    /// Returns true if all entries are finite and non-negative. Logs a
    /// warning otherwise.
    pub fn is_valid(&self) -> bool {
        match Self::indices().find(|(r, c)| {
            let v = self.get(*r, *c);
            !v.is_finite() || v < 0.0
        }) {
            Some((row, col)) => {
                warn!(
                    "Crosstalk sample has invalid entry {} at ({}, {}).",
                    self.get(row, col),
                    row,
                    col
                );
                false
            }
            None => true,
        }
    }
}

impl CoefficientSample for CrosstalkSample {
    /// Returns the stored entries.
    fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns stored entries as mutable.
    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }
}

impl Default for CrosstalkSample {
    /// Returns crosstalk with no energy transfer.
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for CrosstalkSample {
    type Output = Self;

    /// Adds the corresponding entries.
    ///
    /// * `other` - The other `CrosstalkSample`.
    fn add(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret.add_sample(&other);
        ret
    }
}

impl AddAssign for CrosstalkSample {
    /// Adds the corresponding entries.
    ///
    /// * `other` - The other `CrosstalkSample`.
    fn add_assign(&mut self, other: Self) {
        self.add_sample(&other);
    }
}

impl Sub for CrosstalkSample {
    type Output = Self;

    /// Subtracts the corresponding entries.
    ///
    /// * `other` - The other `CrosstalkSample`.
    fn sub(self, other: Self) -> Self::Output {
        let mut ret = self;
        ret.sub_sample(&other);
        ret
    }
}

impl Mul<Float> for CrosstalkSample {
    type Output = Self;

    /// Scales the entries with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        let mut ret = self;
        ret.scale(f);
        ret
    }
}

impl Clamp<Float> for CrosstalkSample {
    /// Clamps the entries.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        self.map(|v| clamp(v, low, high))
    }

    /// Clamps the entries to [0.0, 1.0]; crosstalk never creates energy.
    fn clamp_physical(&self) -> Self {
        self.clamp(0.0, 1.0)
    }
}

impl fmt::Display for CrosstalkSample {
    /// Formats the lower triangle one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..HERO_SAMPLES {
            let line = (0..row).map(|col| format!("{:.6}", self.get(row, col))).join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
