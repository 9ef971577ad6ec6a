//! Birth-death generator construction.
//!
//! States count failed components: state 0 is all-working, state n is
//! all-failed. Failures move right (i → i+1), repairs move left
//! (i → i−1); no other transitions exist. The system is up in state i
//! iff n − i ≥ k.

use crate::model::{StandbyMode, SystemConfig};
use kn_math::DenseMatrix;
use serde::Serialize;

/// One directed transition of the birth-death diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionEdge {
    /// Source state (failed-component count).
    pub from: usize,
    /// Destination state.
    pub to: usize,
    /// Transition rate.
    pub rate: f64,
}

/// Rate matrix of the (n+1)-state birth-death chain.
///
/// Rows sum to zero and off-diagonal entries are non-negative. The
/// per-state failure/repair rates are kept alongside the dense matrix
/// so presentation layers can label diagram edges without reading the
/// matrix back.
#[derive(Debug, Clone, Serialize)]
pub struct Generator {
    n: u32,
    k: u32,
    /// Rate of i → i+1, indexed by i in 0..n.
    failure_rates: Vec<f64>,
    /// Rate of i → i−1, indexed by i−1 for i in 1..=n.
    repair_rates: Vec<f64>,
    matrix: DenseMatrix,
}

impl Generator {
    /// Build the generator for a validated configuration.
    pub fn build(config: &SystemConfig) -> Self {
        let n = config.n as usize;
        let lambda = config.failure_rate;
        let mu = config.repair_rate;

        let failure_rates: Vec<f64> = (0..n)
            .map(|i| {
                let working = (config.n - i as u32) as f64;
                match config.standby {
                    StandbyMode::Warm => working * lambda,
                    // Only the active units are powered; min(k, working)
                    // keeps degraded states failing toward state n.
                    StandbyMode::Cold => (config.k as f64).min(working) * lambda,
                }
            })
            .collect();

        let repair_rates: Vec<f64> = (1..=n)
            .map(|i| (i as u32).min(config.r) as f64 * mu)
            .collect();

        let dim = n + 1;
        let mut matrix = DenseMatrix::zeros(dim, dim);
        for i in 0..dim {
            let up = if i < n { failure_rates[i] } else { 0.0 };
            let down = if i > 0 { repair_rates[i - 1] } else { 0.0 };
            if i < n {
                matrix.set(i, i + 1, up);
            }
            if i > 0 {
                matrix.set(i, i - 1, down);
            }
            matrix.set(i, i, -(up + down));
        }

        Self {
            n: config.n,
            k: config.k,
            failure_rates,
            repair_rates,
            matrix,
        }
    }

    /// Number of states, n + 1.
    pub fn states(&self) -> usize {
        self.n as usize + 1
    }

    /// Whether the system is up with `failed` failed components.
    /// Counts beyond n have no working units left and report down.
    pub fn is_up(&self, failed: usize) -> bool {
        match (self.n as usize).checked_sub(failed) {
            Some(working) => working >= self.k as usize,
            None => false,
        }
    }

    /// Dense rate matrix.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    /// Failure rate out of state i, zero for the all-failed state.
    pub fn failure_rate(&self, i: usize) -> f64 {
        self.failure_rates.get(i).copied().unwrap_or(0.0)
    }

    /// Repair rate out of state i, zero for the all-working state.
    pub fn repair_rate(&self, i: usize) -> f64 {
        if i == 0 {
            0.0
        } else {
            self.repair_rates.get(i - 1).copied().unwrap_or(0.0)
        }
    }

    /// Nonzero directed edges for diagram rendering.
    pub fn edges(&self) -> Vec<TransitionEdge> {
        let mut edges = Vec::with_capacity(2 * self.n as usize);
        for (i, &rate) in self.failure_rates.iter().enumerate() {
            if rate > 0.0 {
                edges.push(TransitionEdge {
                    from: i,
                    to: i + 1,
                    rate,
                });
            }
        }
        for (idx, &rate) in self.repair_rates.iter().enumerate() {
            if rate > 0.0 {
                edges.push(TransitionEdge {
                    from: idx + 1,
                    to: idx,
                    rate,
                });
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StandbyMode, SystemConfig};

    fn config(standby: StandbyMode) -> SystemConfig {
        SystemConfig {
            failure_rate: 0.1,
            repair_rate: 1.0,
            n: 4,
            k: 2,
            r: 2,
            standby,
        }
    }

    #[test]
    fn warm_failure_rates_scale_with_working_units() {
        let gen = Generator::build(&config(StandbyMode::Warm));
        assert_eq!(gen.failure_rate(0), 4.0 * 0.1);
        assert_eq!(gen.failure_rate(1), 3.0 * 0.1);
        assert_eq!(gen.failure_rate(3), 1.0 * 0.1);
        assert_eq!(gen.failure_rate(4), 0.0);
    }

    #[test]
    fn cold_failure_rates_cap_at_threshold() {
        let gen = Generator::build(&config(StandbyMode::Cold));
        // k = 2 active units regardless of spares.
        assert_eq!(gen.failure_rate(0), 2.0 * 0.1);
        assert_eq!(gen.failure_rate(1), 2.0 * 0.1);
        assert_eq!(gen.failure_rate(2), 2.0 * 0.1);
        // Below threshold only the survivors can fail.
        assert_eq!(gen.failure_rate(3), 1.0 * 0.1);
        assert_eq!(gen.failure_rate(4), 0.0);
    }

    #[test]
    fn repair_rates_cap_at_repairman_count() {
        let gen = Generator::build(&config(StandbyMode::Warm));
        assert_eq!(gen.repair_rate(0), 0.0);
        assert_eq!(gen.repair_rate(1), 1.0);
        assert_eq!(gen.repair_rate(2), 2.0);
        assert_eq!(gen.repair_rate(3), 2.0);
        assert_eq!(gen.repair_rate(4), 2.0);
    }

    #[test]
    fn rows_sum_to_zero_and_off_diagonals_non_negative() {
        for standby in [StandbyMode::Warm, StandbyMode::Cold] {
            let gen = Generator::build(&config(standby));
            let m = gen.matrix();
            for i in 0..gen.states() {
                let row_sum: f64 = m.row(i).iter().sum();
                assert!(row_sum.abs() < 1e-12, "row {i} sums to {row_sum}");
                for j in 0..gen.states() {
                    if i != j {
                        assert!(m.get(i, j) >= 0.0);
                        if j != i + 1 && j + 1 != i {
                            assert_eq!(m.get(i, j), 0.0, "non-adjacent rate at ({i},{j})");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn up_states_match_threshold() {
        let gen = Generator::build(&config(StandbyMode::Warm));
        assert!(gen.is_up(0));
        assert!(gen.is_up(2));
        assert!(!gen.is_up(3));
        assert!(!gen.is_up(4));
    }

    #[test]
    fn is_up_reports_down_beyond_state_count() {
        let gen = Generator::build(&config(StandbyMode::Warm));
        assert!(!gen.is_up(5));
        assert!(!gen.is_up(usize::MAX));
    }

    #[test]
    fn edges_cover_all_nonzero_transitions() {
        let gen = Generator::build(&config(StandbyMode::Warm));
        let edges = gen.edges();
        // 4 failure edges + 4 repair edges for n = 4.
        assert_eq!(edges.len(), 8);
        for edge in &edges {
            assert_eq!(gen.matrix().get(edge.from, edge.to), edge.rate);
            assert!(edge.rate > 0.0);
        }
    }
}
