//! Error handling for lzhuff operations
//!
//! This module re-exports the error type used throughout the codec. The
//! variants are defined alongside the other shared types in `common`.

pub use crate::common::LzhError;
pub use crate::common::Result;
