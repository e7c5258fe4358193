//! Aligned heap load and store round trip with 256-bit registers.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::{AlignedBuf, ensure_aligned};
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::m256;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "x86_64")]
const ALIGN: usize = 32;

x86_demo!(Isa::Avx);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
unsafe fn demo() -> Result<Transcript> {
    let values: Vec<f32> = (1..=8).map(|i| i as f32).collect();
    let data = AlignedBuf::from_slice(&values, ALIGN)?;
    let mut result = AlignedBuf::<f32>::zeroed(values.len(), ALIGN)?;
    ensure_aligned(data.as_ptr(), ALIGN)?;
    ensure_aligned(result.as_ptr(), ALIGN)?;

    let mut t = Transcript::new("AVX Load and Store");
    unsafe {
        let reg = _mm256_load_ps(data.as_ptr());
        t.register("Loaded data:", m256(reg));

        _mm256_store_ps(result.as_mut_ptr(), reg);
        t.register("Stored data:", m256(_mm256_load_ps(result.as_ptr())));
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
        if !Isa::Avx.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        let expected: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        assert_eq!(t.lanes("Stored data:").and_then(Lanes::as_f32), Some(&expected[..]));
        assert!(t.to_string().contains("Values: 1 2 3 4 5 6 7 8\n"));
    }
}
