//! Aligned heap load and store round trip with 512-bit registers.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::{AlignedBuf, ensure_aligned};
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::m512;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "x86_64")]
const ALIGN: usize = 64;

x86_demo!(Isa::Avx512f);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f")]
unsafe fn demo() -> Result<Transcript> {
    let values: Vec<f32> = (1..=16).map(|i| i as f32).collect();
    let data = AlignedBuf::from_slice(&values, ALIGN)?;
    let mut result = AlignedBuf::<f32>::zeroed(values.len(), ALIGN)?;
    ensure_aligned(data.as_ptr(), ALIGN)?;
    ensure_aligned(result.as_ptr(), ALIGN)?;

    let mut t = Transcript::new("AVX-512 Load and Store");
    unsafe {
        let reg = _mm512_load_ps(data.as_ptr());
        t.register("Loaded data:", m512(reg));

        _mm512_store_ps(result.as_mut_ptr(), reg);
        t.register("Stored data:", m512(_mm512_load_ps(result.as_ptr())));
    }
    Ok(t)
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;
    use crate::common::config::TourConfig;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_round_trip() {
        if !Isa::Avx512f.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        let expected: Vec<f32> = (1..=16).map(|i| i as f32).collect();
        assert_eq!(t.lanes("Loaded data:").and_then(Lanes::as_f32), Some(&expected[..]));
        assert_eq!(t.lanes("Stored data:").and_then(Lanes::as_f32), Some(&expected[..]));
    }
}
