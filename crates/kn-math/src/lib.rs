//! Availability-engine math utilities.

pub mod math;

pub use math::linsys::{residual_norm, solve};
pub use math::matrix::DenseMatrix;
