//! Dense linear-system solver.
//!
//! Gaussian elimination with partial pivoting, sized for the small
//! square systems the balance-equation solve produces. Pivot order
//! depends only on the input matrix, so identical inputs yield
//! bit-identical solutions.

use super::matrix::DenseMatrix;

/// Pivots with absolute value below this are treated as singular.
const SINGULAR_PIVOT_EPS: f64 = 1e-300;

/// Solve A x = b for square A.
///
/// Returns None when A is not square, dimensions mismatch, any input
/// is non-finite, or elimination hits a (numerically) zero pivot.
pub fn solve(a: &DenseMatrix, b: &[f64]) -> Option<Vec<f64>> {
    if !a.is_square() || a.rows() != b.len() {
        return None;
    }
    let n = a.rows();
    if n == 0 {
        return Some(Vec::new());
    }
    if b.iter().any(|v| !v.is_finite()) {
        return None;
    }

    // Augmented working copy [A | b].
    let mut aug = vec![vec![0.0; n + 1]; n];
    for (i, row) in aug.iter_mut().enumerate() {
        let src = a.row(i);
        if src.iter().any(|v| !v.is_finite()) {
            return None;
        }
        row[..n].copy_from_slice(src);
        row[n] = b[i];
    }

    // Forward elimination with partial pivoting.
    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_mag = aug[col][col].abs();
        for row in col + 1..n {
            let mag = aug[row][col].abs();
            if mag > pivot_mag {
                pivot_row = row;
                pivot_mag = mag;
            }
        }
        if pivot_mag < SINGULAR_PIVOT_EPS {
            return None;
        }
        aug.swap(col, pivot_row);

        let pivot = aug[col][col];
        for row in col + 1..n {
            let factor = aug[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                let delta = factor * aug[col][k];
                aug[row][k] -= delta;
            }
        }
    }

    // Back substitution.
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = aug[row][n];
        for col in row + 1..n {
            acc -= aug[row][col] * x[col];
        }
        x[row] = acc / aug[row][row];
        if !x[row].is_finite() {
            return None;
        }
    }
    Some(x)
}

/// Max-norm of A x - b, for checking solution quality in tests.
pub fn residual_norm(a: &DenseMatrix, x: &[f64], b: &[f64]) -> f64 {
    match a.mul_vec(x) {
        Some(ax) if ax.len() == b.len() => ax
            .iter()
            .zip(b)
            .map(|(l, r)| (l - r).abs())
            .fold(0.0, f64::max),
        _ => f64::NAN,
    }
}
