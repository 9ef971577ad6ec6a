//! System configuration for the k-out-of-n availability model.

use clap::ValueEnum;
use kn_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Standby policy for components beyond the k needed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandbyMode {
    /// Idle components stay powered and keep failing at the full rate.
    Warm,
    /// Idle components are powered off; only the active units can fail.
    Cold,
}

impl std::fmt::Display for StandbyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandbyMode::Warm => write!(f, "warm"),
            StandbyMode::Cold => write!(f, "cold"),
        }
    }
}

/// Parameters of one repairable system: n identical components with
/// exponential failure rate λ, repaired by r repairmen at rate μ each,
/// up while at least k components work.
///
/// Invariants (enforced by [`SystemConfig::validate`]): λ > 0, μ > 0,
/// n ≥ 1, 1 ≤ k ≤ n, 1 ≤ r ≤ n.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Per-component failure rate λ.
    pub failure_rate: f64,
    /// Per-repairman repair rate μ.
    pub repair_rate: f64,
    /// Total number of components n.
    pub n: u32,
    /// Minimum working components k for the system to be up.
    pub k: u32,
    /// Number of repairmen r.
    pub r: u32,
    /// Standby policy for idle components.
    pub standby: StandbyMode,
}

impl SystemConfig {
    /// Build a validated configuration.
    pub fn new(
        failure_rate: f64,
        repair_rate: f64,
        n: u32,
        k: u32,
        r: u32,
        standby: StandbyMode,
    ) -> Result<Self> {
        let config = Self {
            failure_rate,
            repair_rate,
            n,
            k,
            r,
            standby,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant; no computation is attempted on failure.
    pub fn validate(&self) -> Result<()> {
        if !self.failure_rate.is_finite() || self.failure_rate <= 0.0 {
            return Err(Error::InvalidRate {
                name: "failure rate",
                value: self.failure_rate,
            });
        }
        if !self.repair_rate.is_finite() || self.repair_rate <= 0.0 {
            return Err(Error::InvalidRate {
                name: "repair rate",
                value: self.repair_rate,
            });
        }
        if self.n == 0 {
            return Err(Error::NoComponents);
        }
        if self.k == 0 || self.k > self.n {
            return Err(Error::ThresholdOutOfRange {
                k: self.k,
                n: self.n,
            });
        }
        if self.r == 0 || self.r > self.n {
            return Err(Error::RepairmenOutOfRange {
                r: self.r,
                n: self.n,
            });
        }
        Ok(())
    }

    /// Same rates, threshold, and standby mode with a different
    /// component/repairman count. Not validated; optimizer candidates
    /// are validated on solve.
    pub fn with_redundancy(&self, n: u32, r: u32) -> Self {
        Self { n, r, ..*self }
    }

    /// Number of chain states (0..=n failed components).
    pub fn states(&self) -> usize {
        self.n as usize + 1
    }

    /// Highest failed-component count at which the system is still up.
    pub fn max_tolerable_failures(&self) -> u32 {
        self.n - self.k
    }
}
