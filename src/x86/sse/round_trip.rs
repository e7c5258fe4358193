//! Aligned heap load and store round trip (`_mm_malloc` style).

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::{AlignedBuf, ensure_aligned};
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::m128;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Alignment `_mm_load_ps` requires.
#[cfg(target_arch = "x86_64")]
const ALIGN: usize = 16;

x86_demo!(Isa::Sse);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse")]
unsafe fn demo() -> Result<Transcript> {
    let data = AlignedBuf::from_slice(&[1.0f32, 2.0, 3.0, 4.0], ALIGN)?;
    let mut result = AlignedBuf::<f32>::zeroed(4, ALIGN)?;
    ensure_aligned(data.as_ptr(), ALIGN)?;
    ensure_aligned(result.as_ptr(), ALIGN)?;

    let mut t = Transcript::new("SSE Load and Store");
    unsafe {
        let reg = _mm_load_ps(data.as_ptr());
        t.register("Loaded data:", m128(reg));

        _mm_store_ps(result.as_mut_ptr(), reg);
        let loaded_result = _mm_load_ps(result.as_ptr());
        t.register("Stored data:", m128(loaded_result));
    }
    Ok(t)
}
