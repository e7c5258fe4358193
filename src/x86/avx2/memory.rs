//! AVX2 memory operations: gathers and integer masked load/store.
//!
//! A gather computes each lane's address as `base + vindex[i] * scale`.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::A32;
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::{m256, m256i};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Byte scale for `f32` indices.
#[cfg(target_arch = "x86_64")]
const F32_SCALE: i32 = std::mem::size_of::<f32>() as i32;

x86_demo!(Isa::Avx2);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn demo() -> Result<Transcript> {
    let source_data = [
        1.1f32, 2.2, 3.3, 4.4, 5.5, 6.6, 7.7, 8.8, 9.9, 10.1, 11.1, 12.1, 13.1, 14.1, 15.1, 16.1,
    ];

    let mut t = Transcript::new("AVX2 Memory Operations Tutorial");
    unsafe {
        t.heading("1. Gather Instructions");
        t.array("Source Data: ", &source_data);

        let vindex = _mm256_setr_epi32(0, 2, 4, 6, 1, 3, 5, 7);
        t.register("Indices to gather: ", m256i(vindex));

        let gathered = _mm256_i32gather_ps::<F32_SCALE>(source_data.as_ptr(), vindex);
        t.register("Gathered floats (_mm256_i32gather_ps): ", m256(gathered));

        // Inactive lanes take their value from the pass-through vector
        let mask = _mm256_setr_epi32(-1, 0, -1, 0, -1, 0, 0, 0);
        let src_passthru = _mm256_set1_ps(-1.0);
        t.register("Mask for gather: ", m256i(mask));
        let masked_gathered = _mm256_mask_i32gather_ps::<F32_SCALE>(
            src_passthru,
            source_data.as_ptr(),
            vindex,
            _mm256_castsi256_ps(mask),
        );
        t.register("Masked gathered floats: ", m256(masked_gathered));

        t.heading("2. Masked Load/Store for Integers");
        let int_data = A32([10i32, 20, 30, 40, 50, 60, 70, 80]);
        let mut int_dest = A32([0i32; 8]);
        let int_mask = _mm256_setr_epi32(0, -1, 0, -1, 0, -1, 0, -1);
        t.register("Integer mask: ", m256i(int_mask));

        let masked_loaded = _mm256_maskload_epi32(int_data.as_ptr(), int_mask);
        t.register("Masked loaded integers: ", m256i(masked_loaded));

        _mm256_maskstore_epi32(int_dest.as_mut_ptr(), int_mask, masked_loaded);
        t.array("Masked stored integers: ", &int_dest.0);
    }
    Ok(t)
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;
    use crate::common::config::TourConfig;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_gathers() {
        if !Isa::Avx2.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(
            t.lanes("Gathered floats (_mm256_i32gather_ps):").and_then(Lanes::as_f32),
            Some(&[1.1f32, 3.3, 5.5, 7.7, 2.2, 4.4, 6.6, 8.8][..])
        );
        assert_eq!(
            t.lanes("Masked gathered floats:").and_then(Lanes::as_f32),
            Some(&[1.1f32, -1.0, 5.5, -1.0, 2.2, -1.0, -1.0, -1.0][..])
        );
    }

    #[test]
    fn test_integer_masking() {
        if !Isa::Avx2.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        let expected = [0, 20, 0, 40, 0, 60, 0, 80];
        assert_eq!(t.lanes("Masked loaded integers:").and_then(Lanes::as_i32), Some(&expected[..]));
        assert_eq!(t.lanes("Masked stored integers:").and_then(Lanes::as_i32), Some(&expected[..]));
    }
}
