//! Steady-state availability engine for k-out-of-n repairable systems.
//!
//! n identical components fail at exponential rate λ and are repaired
//! by r repairmen at rate μ each; idle components are in warm or cold
//! standby. The system is up while at least k components work. The
//! engine builds the underlying birth-death Markov chain, solves for
//! its stationary distribution, and searches (n, r) grids for the
//! cost-minimizing configuration.
//!
//! Every solve is a pure function of its [`model::SystemConfig`]:
//! no I/O, no shared state, bit-identical results for identical
//! inputs.

pub mod chain;
pub mod exit_codes;
pub mod logging;
pub mod model;
pub mod optimize;
pub mod solver;

pub use chain::{Generator, TransitionEdge};
pub use model::{StandbyMode, SystemConfig};
pub use optimize::{optimize, CostRecord, CostWeights, OptimalResult, SkippedCandidate};
pub use solver::{solve, SolveOutcome};
