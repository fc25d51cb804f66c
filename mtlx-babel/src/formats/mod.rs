//! Format implementations
//!
//! This module contains all format implementations that convert between the MaterialX element
//! tree and its text representations.

pub mod json;
pub mod mtlx;

pub use json::JsonFormat;
pub use mtlx::MtlxFormat;
