//! Cost optimization over (n, r) redundancy configurations.
//!
//! Exhaustive grid search: every valid pair from the candidate ranges
//! is solved and priced, then ranked by expected cost. Candidates that
//! violate n ≥ k or r ≤ n are skipped with a diagnostic rather than
//! failing the sweep, and a per-candidate solve failure excludes only
//! that candidate.

use crate::model::SystemConfig;
use crate::solver;
use kn_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// Cost coefficients for the expected-cost objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostWeights {
    /// Cost per installed component.
    pub component: f64,
    /// Cost per staffed repairman.
    pub repairman: f64,
    /// Cost of downtime, weighted by the unavailable fraction.
    pub downtime: f64,
}

impl CostWeights {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("component", self.component),
            ("repairman", self.repairman),
            ("downtime", self.downtime),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "cost coefficient '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// One evaluated candidate configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRecord {
    pub n: u32,
    pub r: u32,
    pub uptime: f64,
    pub expected_cost: f64,
}

/// A candidate excluded from the ranking, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedCandidate {
    pub n: u32,
    pub r: u32,
    pub reason: String,
}

/// Outcome of a grid sweep: the minimizer, the full ranking, and any
/// skipped candidates.
#[derive(Debug, Clone, Serialize)]
pub struct OptimalResult {
    /// Cheapest evaluated configuration.
    pub best: CostRecord,
    /// All evaluated records, sorted by ascending expected cost; exact
    /// ties keep ascending (n, then r) order.
    pub records: Vec<CostRecord>,
    /// Candidates excluded from the ranking.
    pub skipped: Vec<SkippedCandidate>,
}

/// Sweep the Cartesian product of `n_range` × `r_range` and return the
/// cost-minimizing configuration.
///
/// Rates, threshold, and standby mode come from `base`; each candidate
/// replaces its n and r. Candidate values are deduplicated and visited
/// in ascending (n, then r) order, which fixes the tie-break: equal
/// costs prefer the earliest candidate in that order.
pub fn optimize(
    base: &SystemConfig,
    n_range: &[u32],
    r_range: &[u32],
    costs: &CostWeights,
) -> Result<OptimalResult> {
    base.validate()?;
    costs.validate()?;

    let mut n_values = n_range.to_vec();
    n_values.sort_unstable();
    n_values.dedup();
    let mut r_values = r_range.to_vec();
    r_values.sort_unstable();
    r_values.dedup();

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut valid_candidates = 0usize;

    for &n in &n_values {
        for &r in &r_values {
            if n < base.k {
                skipped.push(SkippedCandidate {
                    n,
                    r,
                    reason: format!("n={n} below threshold k={}", base.k),
                });
                continue;
            }
            if r > n || r == 0 {
                skipped.push(SkippedCandidate {
                    n,
                    r,
                    reason: format!("repairman count r={r} invalid for n={n}"),
                });
                continue;
            }
            valid_candidates += 1;

            let candidate = base.with_redundancy(n, r);
            match solver::solve(&candidate) {
                Ok(outcome) => {
                    let expected_cost = f64::from(n) * costs.component
                        + f64::from(r) * costs.repairman
                        + (1.0 - outcome.uptime) * costs.downtime;
                    records.push(CostRecord {
                        n,
                        r,
                        uptime: outcome.uptime,
                        expected_cost,
                    });
                }
                Err(err) => {
                    warn!(n, r, error = %err, "candidate solve failed; excluded from ranking");
                    skipped.push(SkippedCandidate {
                        n,
                        r,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    if valid_candidates == 0 {
        return Err(Error::EmptySearchSpace);
    }
    if records.is_empty() {
        return Err(Error::Numerical(
            "every candidate in the grid failed to solve".to_string(),
        ));
    }

    // Stable sort preserves the ascending (n, r) insertion order among
    // exact cost ties.
    records.sort_by(|a, b| {
        a.expected_cost
            .partial_cmp(&b.expected_cost)
            .unwrap_or(Ordering::Equal)
    });
    let best = records[0].clone();

    Ok(OptimalResult {
        best,
        records,
        skipped,
    })
}
