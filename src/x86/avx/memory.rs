//! AVX memory operations: aligned and unaligned, broadcast, masked and
//! streaming.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::A32;
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::{m256, m256d};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

x86_demo!(Isa::Avx);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
unsafe fn demo() -> Result<Transcript> {
    let fa_data = A32([1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    // One element longer than a register so the load from element 1 stays in bounds
    let da_data = A32([10.0f64, 20.0, 30.0, 40.0, 50.0]);
    let ia_data = A32([100i32, 200, 300, 400, 500, 600, 700, 800]);
    let du_ptr = da_data[1..].as_ptr();

    let mut fa_dest = A32([0f32; 8]);
    let mut da_dest = A32([0f64; 4]);
    let mut ia_dest = A32([0i32; 8]);

    let mut t = Transcript::new("AVX Load/Store Instructions Tutorial");
    unsafe {
        t.heading("1. Aligned vs. Unaligned");
        let vec_ps_a = _mm256_load_ps(fa_data.as_ptr());
        _mm256_store_ps(fa_dest.as_mut_ptr(), vec_ps_a);
        t.array("Aligned float load/store:   ", &fa_dest.0);

        let vec_pd_u = _mm256_loadu_pd(du_ptr);
        _mm256_storeu_pd(da_dest.as_mut_ptr(), vec_pd_u);
        t.array("Unaligned double load/store: ", &da_dest.0);

        let vec_si_a = _mm256_load_si256(ia_data.as_ptr() as *const __m256i);
        _mm256_store_si256(ia_dest.as_mut_ptr() as *mut __m256i, vec_si_a);
        t.array("Aligned integer load/store: ", &ia_dest.0);

        t.heading("2. Broadcast");
        t.register("Broadcast float (_mm256_broadcast_ss):", m256(_mm256_broadcast_ss(&fa_data[2])));
        t.register("Broadcast double (_mm256_broadcast_sd):", m256d(_mm256_broadcast_sd(&da_data[1])));
        let low_half = _mm_load_ps(fa_data.as_ptr());
        t.register("Broadcast 128 bits (_mm256_broadcast_ps):", m256(_mm256_broadcast_ps(&low_half)));

        t.heading("3. Masked Load/Store");
        // The high bit of each 64-bit element enables it: lanes 0 and 2
        let mask_pd = _mm256_setr_epi64x(-1, 0, -1, 0);
        t.register("Masked load (doubles):", m256d(_mm256_maskload_pd(da_data.as_ptr(), mask_pd)));

        t.note("Masked store (doubles):");
        _mm256_maskstore_pd(da_dest.as_mut_ptr(), mask_pd, vec_pd_u);
        t.array("Result: ", &da_dest.0);
        let mut masked_dest = A32([0f64; 4]);
        _mm256_maskstore_pd(masked_dest.as_mut_ptr(), mask_pd, vec_pd_u);
        t.array("Result into zeroed memory: ", &masked_dest.0);

        t.heading("4. Streaming Store");
        _mm256_stream_ps(fa_dest.as_mut_ptr(), vec_ps_a);
        _mm256_stream_pd(da_dest.as_mut_ptr(), vec_pd_u);
        _mm256_stream_si256(ia_dest.as_mut_ptr() as *mut __m256i, vec_si_a);
        // Streaming stores are weakly ordered; fence before reading the destinations
        _mm_sfence();
        t.array("Streaming float store:  ", &fa_dest.0);
        t.array("Streaming double store: ", &da_dest.0);
        t.array("Streaming integer store:", &ia_dest.0);
    }
    Ok(t)
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;
    use crate::common::config::TourConfig;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_memory_operations() {
        if !Isa::Avx.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        let f64s = |label: &str| t.lanes(label).and_then(Lanes::as_f64).map(<[f64]>::to_vec);

        assert_eq!(f64s("Unaligned double load/store:"), Some(vec![20.0, 30.0, 40.0, 50.0]));
        assert_eq!(
            t.lanes("Broadcast float (_mm256_broadcast_ss):").and_then(Lanes::as_f32),
            Some(&[3.0f32; 8][..])
        );
        assert_eq!(f64s("Broadcast double (_mm256_broadcast_sd):"), Some(vec![20.0; 4]));
        assert_eq!(
            t.lanes("Broadcast 128 bits (_mm256_broadcast_ps):").and_then(Lanes::as_f32),
            Some(&[1.0f32, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0][..])
        );
        assert_eq!(f64s("Masked load (doubles):"), Some(vec![10.0, 0.0, 30.0, 0.0]));
        assert_eq!(f64s("Result into zeroed memory:"), Some(vec![20.0, 0.0, 40.0, 0.0]));
        assert_eq!(
            t.lanes("Streaming integer store:").and_then(Lanes::as_i32),
            Some(&[100, 200, 300, 400, 500, 600, 700, 800][..])
        );
    }
}
