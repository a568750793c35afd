//! Coherency matrix analysis of Mueller matrices.
//!
//! A Mueller matrix describes a physically realizable (non-amplifying,
//! possibly depolarising) optical element iff its 4x4 Hermitian coherency
//! matrix is positive semi-definite.

use crate::common::*;
use nalgebra::{Complex, Matrix4};

/// Returns the Hermitian coherency matrix of a single-channel Mueller matrix
/// `m` (row-major, `m[row][col]`).
///
/// * `m` - Mueller matrix entries.
#[rustfmt::skip]
pub fn coherency_matrix(m: &[[Float; 4]; 4]) -> Matrix4<Complex<Float>> {
    let c = |re: Float, im: Float| Complex::new(0.25 * re, 0.25 * im);

    let h00 = c(m[0][0] + m[0][1] + m[1][0] + m[1][1], 0.0);
    let h01 = c(m[0][2] + m[1][2],  m[0][3] + m[1][3]);
    let h02 = c(m[2][0] + m[2][1], -(m[3][0] + m[3][1]));
    let h03 = c(m[2][2] + m[3][3],  m[2][3] - m[3][2]);

    let h11 = c(m[0][0] - m[0][1] + m[1][0] - m[1][1], 0.0);
    let h12 = c(m[2][2] - m[3][3], -(m[2][3] + m[3][2]));
    let h13 = c(m[2][0] - m[2][1], -(m[3][0] - m[3][1]));

    let h22 = c(m[0][0] + m[0][1] - m[1][0] - m[1][1], 0.0);
    let h23 = c(m[0][2] - m[1][2],  m[0][3] - m[1][3]);

    let h33 = c(m[0][0] - m[0][1] - m[1][0] + m[1][1], 0.0);

    Matrix4::new(
        h00,         h01,         h02,         h03,
        h01.conj(),  h11,         h12,         h13,
        h02.conj(),  h12.conj(),  h22,         h23,
        h03.conj(),  h13.conj(),  h23.conj(),  h33,
    )
}

/// Returns the eigenvalues of the coherency matrix of `m` in ascending order.
///
/// * `m` - Mueller matrix entries.
pub fn coherency_eigenvalues(m: &[[Float; 4]; 4]) -> [Float; 4] {
    let eigenvalues = coherency_matrix(m).symmetric_eigenvalues();
    let mut ret = [eigenvalues[0], eigenvalues[1], eigenvalues[2], eigenvalues[3]];
    ret.sort_by(|a, b| a.total_cmp(b));
    ret
}

/// Returns true if every coherency eigenvalue of `m` is at least `-epsilon`.
///
/// * `m`       - Mueller matrix entries.
/// * `epsilon` - Tolerance for negative eigenvalues.
pub fn is_realizable(m: &[[Float; 4]; 4], epsilon: Float) -> bool {
    coherency_eigenvalues(m)[0] >= -epsilon
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
