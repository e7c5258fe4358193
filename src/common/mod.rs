//! Common types and utilities shared by every demonstration.
//!
//! This module provides the error type, aligned storage, lane formatting,
//! transcripts, CPU feature detection and configuration used by both the x86
//! and the ARM halves of the tour.

// Submodule declarations
pub mod aligned;
pub mod config;
pub mod error;
pub mod features;
pub mod lanes;
pub mod transcript;

// Re-exports for convenience
pub use aligned::{A16, A32, A64, AlignedBuf, ensure_aligned};
pub use config::TourConfig;
pub use error::{Error, Result};
pub use features::{Isa, IsaSet};
pub use lanes::{LaneValue, Lanes};
pub use transcript::{Step, Transcript};
