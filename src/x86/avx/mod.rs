//! AVX 256-bit loads and stores.

pub mod memory;
pub mod round_trip;
