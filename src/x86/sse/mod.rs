//! SSE family (SSE, SSE2, SSE3, SSE4.1) 128-bit loads and stores.

pub mod load;
pub mod round_trip;
pub mod store;
