//! Core math modules.

pub mod linsys;
pub mod matrix;
