//! Shared types for the k-out-of-n availability engine.
//!
//! This crate provides foundational types shared across kn-core:
//! - Common error types with stable codes and categories
//! - Output format specifications

pub mod error;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;
