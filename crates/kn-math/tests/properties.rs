//! Property-based tests for kn-math linear algebra.
//!
//! Uses proptest to verify solver properties hold across many random inputs.

use proptest::prelude::*;

use kn_math::{residual_norm, solve, DenseMatrix};

/// Tolerance for residual checks on well-conditioned systems.
const TOL: f64 = 1e-8;

/// Strategy: diagonally dominant square matrix plus right-hand side.
///
/// Diagonal dominance keeps the system comfortably non-singular so
/// the residual property is meaningful.
fn dominant_system(max_dim: usize) -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
    (1..=max_dim).prop_flat_map(|n| {
        let row = proptest::collection::vec(-10.0..10.0f64, n);
        let rows = proptest::collection::vec(row, n);
        let rhs = proptest::collection::vec(-100.0..100.0f64, n);
        (rows, rhs).prop_map(move |(mut rows, rhs)| {
            for (i, row) in rows.iter_mut().enumerate() {
                let off_diag: f64 = row
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, v)| v.abs())
                    .sum();
                row[i] = off_diag + 1.0;
            }
            (rows, rhs)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Solving a well-conditioned system leaves a tiny residual.
    #[test]
    fn solve_residual_is_small((rows, b) in dominant_system(12)) {
        let a = DenseMatrix::from_rows(&rows).expect("square rows");
        let x = solve(&a, &b).expect("dominant system is solvable");
        let res = residual_norm(&a, &x, &b);
        prop_assert!(res < TOL, "residual {} too large for n={}", res, b.len());
    }

    /// Determinism: the same system solves to the same bits.
    #[test]
    fn solve_is_deterministic((rows, b) in dominant_system(8)) {
        let a = DenseMatrix::from_rows(&rows).expect("square rows");
        let x1 = solve(&a, &b).expect("solvable");
        let x2 = solve(&a, &b).expect("solvable");
        prop_assert_eq!(x1, x2);
    }

    /// Scaling the RHS scales the solution linearly.
    #[test]
    fn solve_is_linear_in_rhs((rows, b) in dominant_system(8), scale in 0.5..4.0f64) {
        let a = DenseMatrix::from_rows(&rows).expect("square rows");
        let x = solve(&a, &b).expect("solvable");
        let b2: Vec<f64> = b.iter().map(|v| v * scale).collect();
        let x2 = solve(&a, &b2).expect("solvable");
        for (lhs, rhs) in x.iter().zip(&x2) {
            prop_assert!(
                (lhs * scale - rhs).abs() <= TOL * (1.0 + rhs.abs()),
                "linearity violated: {} * {} vs {}", lhs, scale, rhs
            );
        }
    }
}
