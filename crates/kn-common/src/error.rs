//! Error types for the availability engine.
//!
//! Structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 12,
//!   "category": "config",
//!   "message": "threshold k=5 exceeds component count n=3",
//!   "recoverable": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for availability-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// System configuration errors (rates, counts, thresholds).
    Config,
    /// Stationary-solve numerical errors.
    Numerical,
    /// Optimizer search-space errors.
    Search,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Numerical => write!(f, "numerical"),
            ErrorCategory::Search => write!(f, "search"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the availability engine.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{name} must be strictly positive, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("threshold k={k} out of range for n={n} components (need 1 <= k <= n)")]
    ThresholdOutOfRange { k: u32, n: u32 },

    #[error("repairman count r={r} out of range for n={n} components (need 1 <= r <= n)")]
    RepairmenOutOfRange { r: u32, n: u32 },

    #[error("component count n must be at least 1")]
    NoComponents,

    // Numerical errors (20-29)
    #[error("numerical failure: {0}")]
    Numerical(String),

    #[error("singular balance system for {states}-state chain")]
    SingularSystem { states: usize },

    // Search errors (30-39)
    #[error("no valid (n, r) candidate in the search grid")]
    EmptySearchSpace,

    // I/O errors (40-49)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Numerical errors
    /// - 30-39: Search errors
    /// - 40-49: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidRate { .. } => 11,
            Error::ThresholdOutOfRange { .. } => 12,
            Error::RepairmenOutOfRange { .. } => 13,
            Error::NoComponents => 14,
            Error::Numerical(_) => 20,
            Error::SingularSystem { .. } => 21,
            Error::EmptySearchSpace => 30,
            Error::Io(_) => 40,
            Error::Json(_) => 41,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_)
            | Error::InvalidRate { .. }
            | Error::ThresholdOutOfRange { .. }
            | Error::RepairmenOutOfRange { .. }
            | Error::NoComponents => ErrorCategory::Config,

            Error::Numerical(_) | Error::SingularSystem { .. } => ErrorCategory::Numerical,

            Error::EmptySearchSpace => ErrorCategory::Search,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Config and search errors are recoverable by correcting the
    /// inputs. Numerical errors indicate a malformed chain and are
    /// fatal for that input.
    pub fn is_recoverable(&self) -> bool {
        match self.category() {
            ErrorCategory::Config => true,
            ErrorCategory::Numerical => false,
            ErrorCategory::Search => true,
            ErrorCategory::Io => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Check the system parameters and re-run.",
            Error::InvalidRate { .. } => {
                "Failure and repair rates are exponential rates; both must be > 0."
            }
            Error::ThresholdOutOfRange { .. } => {
                "The system needs at least k working components, so k must satisfy 1 <= k <= n."
            }
            Error::RepairmenOutOfRange { .. } => {
                "More repairmen than components is never useful; choose 1 <= r <= n."
            }
            Error::NoComponents => "Choose a component count n >= 1.",

            Error::Numerical(_) | Error::SingularSystem { .. } => {
                "The balance equations could not be solved. This should not happen for positive rates; report the inputs as a bug."
            }

            Error::EmptySearchSpace => {
                "Every candidate had n < k or r > n. Widen the n range or lower the threshold k."
            }

            Error::Io(_) => "Check file permissions and retry the operation.",
            Error::Json(_) => "Output serialization failed; report the inputs as a bug.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_)
            | Error::InvalidRate { .. }
            | Error::ThresholdOutOfRange { .. }
            | Error::RepairmenOutOfRange { .. }
            | Error::NoComponents => "Configuration Error",

            Error::Numerical(_) => "Numerical Failure",
            Error::SingularSystem { .. } => "Singular Balance System",

            Error::EmptySearchSpace => "Empty Search Space",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Remediation hint for humans.
    pub remediation: String,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            remediation: err.remediation().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_group_by_category() {
        let cases: Vec<(Error, ErrorCategory, u32)> = vec![
            (Error::Config("x".into()), ErrorCategory::Config, 10),
            (
                Error::InvalidRate {
                    name: "failure rate",
                    value: -1.0,
                },
                ErrorCategory::Config,
                11,
            ),
            (
                Error::ThresholdOutOfRange { k: 5, n: 3 },
                ErrorCategory::Config,
                12,
            ),
            (
                Error::RepairmenOutOfRange { r: 4, n: 3 },
                ErrorCategory::Config,
                13,
            ),
            (Error::NoComponents, ErrorCategory::Config, 14),
            (Error::Numerical("x".into()), ErrorCategory::Numerical, 20),
            (
                Error::SingularSystem { states: 4 },
                ErrorCategory::Numerical,
                21,
            ),
            (Error::EmptySearchSpace, ErrorCategory::Search, 30),
        ];
        for (err, category, code) in cases {
            assert_eq!(err.category(), category, "{err}");
            assert_eq!(err.code(), code, "{err}");
            let decade = code / 10;
            let expected_decade = match category {
                ErrorCategory::Config => 1,
                ErrorCategory::Numerical => 2,
                ErrorCategory::Search => 3,
                ErrorCategory::Io => 4,
            };
            assert_eq!(decade, expected_decade);
        }
    }

    #[test]
    fn numerical_errors_are_not_recoverable() {
        assert!(!Error::SingularSystem { states: 3 }.is_recoverable());
        assert!(Error::ThresholdOutOfRange { k: 2, n: 1 }.is_recoverable());
        assert!(Error::EmptySearchSpace.is_recoverable());
    }

    #[test]
    fn structured_error_round_trips() {
        let err = Error::ThresholdOutOfRange { k: 4, n: 2 };
        let structured = StructuredError::from(&err);
        let json = serde_json::to_string(&structured).unwrap();
        let back: StructuredError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, 12);
        assert_eq!(back.category, ErrorCategory::Config);
        assert!(back.message.contains("k=4"));
    }
}
