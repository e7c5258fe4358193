//! AVX-512F: mask registers, gather/scatter and compress/expand.

pub mod memory;
pub mod round_trip;
