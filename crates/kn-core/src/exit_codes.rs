//! Exit codes for the kn-core CLI.
//!
//! Exit codes communicate operation outcome without requiring output
//! parsing, and mirror the error-code decades:
//! - 0: success
//! - 10-19: configuration errors (recoverable by fixing inputs)
//! - 20-29: numerical errors (report as a bug)
//! - 30-39: search errors (widen the candidate grid)
//! - 40-49: I/O errors

use kn_common::{Error, ErrorCategory};

/// Stable exit codes for kn-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Ok = 0,
    /// Invalid system configuration or arguments.
    ConfigError = 10,
    /// Stationary solve failed numerically.
    NumericalError = 20,
    /// Optimizer search space was empty.
    SearchError = 30,
    /// I/O or serialization failure.
    IoError = 40,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Numerical => ExitCode::NumericalError,
            ErrorCategory::Search => ExitCode::SearchError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
