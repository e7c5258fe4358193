//! NEON (Advanced SIMD) demonstrations.
//!
//! NEON is part of the aarch64 baseline, so on that target the intrinsics are
//! always usable. Other targets report [`Error::Unsupported`](crate::common::Error::Unsupported)
//! for every NEON demonstration; [`vector_add::vector_add`] falls back to
//! scalar code there.

pub mod load_store;
pub mod load_u8;
pub mod store_u8;
pub mod vector_add;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// Copy the 16 lanes of a byte vector out of the register.
#[cfg(target_arch = "aarch64")]
#[inline]
pub(crate) unsafe fn spill_u8(v: uint8x16_t) -> [u8; 16] {
    let mut buffer = [0u8; 16];
    unsafe { vst1q_u8(buffer.as_mut_ptr(), v) };
    buffer
}

/// Copy the 4 lanes of a float vector out of the register.
#[cfg(target_arch = "aarch64")]
#[inline]
pub(crate) unsafe fn spill_f32(v: float32x4_t) -> [f32; 4] {
    let mut buffer = [0f32; 4];
    unsafe { vst1q_f32(buffer.as_mut_ptr(), v) };
    buffer
}
