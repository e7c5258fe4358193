//! Unified error types for simd-tour.
//!
//! This module provides the single error type shared by the demonstrations,
//! the scalable-vector model and the configuration layer.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
