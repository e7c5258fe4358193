//! Unified error types for simd-tour.
//!
//! Every demonstration, the scalable-vector model and the configuration layer
//! report failures through this one error type.
use crate::common::features::Isa;
use thiserror::Error;

/// Main error type for simd-tour operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The instruction set needed by a demonstration is not available
    #[error("Instruction set {0} is not available on this CPU")]
    Unsupported(Isa),

    /// No demonstration is registered under the given name
    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    /// An aligned access was requested on a misaligned address
    #[error("Address {addr:#x} is not {align}-byte aligned")]
    Misaligned { addr: usize, align: usize },

    /// The allocator refused an aligned allocation
    #[error("Failed to allocate {size} bytes aligned to {align}")]
    Allocation { size: usize, align: usize },

    /// Invalid size/alignment combination
    #[error("Invalid layout: {0}")]
    Layout(std::alloc::LayoutError),

    /// SVE vector length outside 128..=2048 or not a multiple of 128
    #[error("Invalid SVE vector length: {0} bits")]
    InvalidVectorLength(u32),

    /// Input slices disagree on length
    #[error("Length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// A modelled memory access would fault
    #[error("Access of {width} bytes at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds { offset: i64, width: usize, len: usize },

    /// Configuration could not be parsed or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for simd-tour operations.
pub type Result<T> = std::result::Result<T, Error>;
