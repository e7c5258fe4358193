//! ARM demonstrations: NEON on real hardware, SVE and SVE2 on the
//! scalable-vector model.

pub mod neon;
pub mod sve;
pub mod sve2;
