//! AVX2 gathers and integer masked memory operations.

pub mod memory;
