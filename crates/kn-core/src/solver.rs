//! Stationary-distribution solve and uptime derivation.
//!
//! πQ = 0 with sum(π) = 1 is solved as a dense linear system: the
//! generator is transposed and the last balance equation is replaced
//! by the normalization row. The replaced row is always the last one,
//! so identical inputs reproduce bit-identical results.

use crate::chain::Generator;
use crate::model::SystemConfig;
use kn_common::{Error, Result};
use kn_math::DenseMatrix;
use tracing::debug;

/// Tolerance for probability-vector cleanup: entries in
/// (-PROBABILITY_TOL, 0) are treated as numerical noise and clamped.
pub const PROBABILITY_TOL: f64 = 1e-9;

/// Result of one stationary solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Long-run fraction of time at least k components work.
    pub uptime: f64,
    /// Stationary distribution over failed-component counts.
    pub stationary: Vec<f64>,
    /// The generator used for the solve; reusable for diagram
    /// rendering without recomputation.
    pub generator: Generator,
}

/// Compute the steady-state uptime of a k-out-of-n repairable system.
///
/// Validates the configuration, builds the birth-death generator, and
/// solves the balance equations. The returned distribution is
/// non-negative and sums to one within [`PROBABILITY_TOL`].
pub fn solve(config: &SystemConfig) -> Result<SolveOutcome> {
    config.validate()?;

    let generator = Generator::build(config);
    let stationary = stationary_distribution(&generator)?;

    let up_states = config.max_tolerable_failures() as usize;
    let uptime: f64 = stationary[..=up_states].iter().sum::<f64>().min(1.0);

    debug!(
        n = config.n,
        k = config.k,
        r = config.r,
        standby = %config.standby,
        uptime,
        "stationary solve complete"
    );

    Ok(SolveOutcome {
        uptime,
        stationary,
        generator,
    })
}

/// Left null vector of the generator, normalized to a probability
/// distribution.
fn stationary_distribution(generator: &Generator) -> Result<Vec<f64>> {
    let dim = generator.states();

    // πQ = 0 is Qᵀ πᵀ = 0; overwrite the last equation with sum(π) = 1.
    let mut system: DenseMatrix = generator.matrix().transpose();
    for col in 0..dim {
        system.set(dim - 1, col, 1.0);
    }
    let mut rhs = vec![0.0; dim];
    rhs[dim - 1] = 1.0;

    let mut pi =
        kn_math::solve(&system, &rhs).ok_or(Error::SingularSystem { states: dim })?;

    for value in &mut pi {
        if !value.is_finite() {
            return Err(Error::Numerical(format!(
                "non-finite stationary entry {value}"
            )));
        }
        if *value < 0.0 {
            if *value > -PROBABILITY_TOL {
                *value = 0.0;
            } else {
                return Err(Error::Numerical(format!(
                    "stationary entry {value} is negative beyond tolerance"
                )));
            }
        }
    }

    let total: f64 = pi.iter().sum();
    if (total - 1.0).abs() > 1e-6 {
        return Err(Error::Numerical(format!(
            "stationary mass {total} far from 1"
        )));
    }
    for value in &mut pi {
        *value /= total;
    }
    Ok(pi)
}
