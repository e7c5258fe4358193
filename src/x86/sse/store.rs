//! SSE store instructions: aligned and unaligned, scalar, partial, masked and
//! streaming.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::A16;
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::m128i;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

x86_demo!(Isa::Sse2);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn demo() -> Result<Transcript> {
    let vec_ps = _mm_setr_ps(1.1, 2.2, 3.3, 4.4);
    let vec_pd = _mm_setr_pd(10.1, 20.2);
    let vec_si = _mm_setr_epi32(101, 202, 303, 404);

    let mut fa_dest = A16([0f32; 4]);
    let mut da_dest = A16([0f64; 2]);
    let mut ia_dest = A16([0i32; 4]);

    // Offset by one element so the destinations are misaligned
    let mut fu_dest_vec = A16([0f32; 5]);
    let mut du_dest_vec = A16([0f64; 3]);
    let mut iu_dest_vec = A16([0i32; 5]);

    let mut t = Transcript::new("SSE Store Instructions Tutorial");
    unsafe {
        t.heading("1. Aligned vs. Unaligned Stores");
        _mm_store_ps(fa_dest.as_mut_ptr(), vec_ps);
        t.array("Aligned float store (_mm_store_ps):   ", &fa_dest.0);

        let fu_dest = &mut fu_dest_vec[1..];
        _mm_storeu_ps(fu_dest.as_mut_ptr(), vec_ps);
        t.array("Unaligned float store (_mm_storeu_ps): ", &fu_dest[..4]);

        _mm_store_pd(da_dest.as_mut_ptr(), vec_pd);
        t.array("Aligned double store (_mm_store_pd):  ", &da_dest.0);

        let du_dest = &mut du_dest_vec[1..];
        _mm_storeu_pd(du_dest.as_mut_ptr(), vec_pd);
        t.array("Unaligned double store (_mm_storeu_pd):", &du_dest[..2]);

        _mm_store_si128(ia_dest.as_mut_ptr() as *mut __m128i, vec_si);
        t.array("Aligned integer store (_mm_store_si128): ", &ia_dest.0);

        let iu_dest = &mut iu_dest_vec[1..];
        _mm_storeu_si128(iu_dest.as_mut_ptr() as *mut __m128i, vec_si);
        t.array("Unaligned integer store (_mm_storeu_si128):", &iu_dest[..4]);

        t.heading("2. Scalar Stores");
        _mm_store_ss(fa_dest.as_mut_ptr(), vec_ps);
        t.array("Scalar float store (_mm_store_ss):    ", &fa_dest.0);
        _mm_store_sd(da_dest.as_mut_ptr(), vec_pd);
        t.array("Scalar double store (_mm_store_sd):   ", &da_dest.0);

        t.heading("3. Partial Stores");
        _mm_storeh_pd(da_dest.as_mut_ptr(), vec_pd);
        t.array("Store HIGH double (_mm_storeh_pd):    ", &da_dest[..1]);
        _mm_storel_pd(da_dest.as_mut_ptr(), vec_pd);
        t.array("Store LOW double (_mm_storel_pd):     ", &da_dest[..1]);
        _mm_storel_epi64(ia_dest.as_mut_ptr() as *mut __m128i, vec_si);
        t.array("Store LOW 64-bits (_mm_storel_epi64):", &ia_dest[..2]);

        t.heading("4. Masked Store");
        // High bit of each byte selects it; lanes 0 and 2 here
        let mask = _mm_setr_epi32(-1, 0, -1, 0);
        t.register("Storing with mask: ", m128i(mask));
        _mm_maskmoveu_si128(vec_si, mask, ia_dest.as_mut_ptr() as *mut i8);
        t.array("Masked store (_mm_maskmoveu_si128): ", &ia_dest.0);

        let mut masked_dest = A16([0i32; 4]);
        _mm_maskmoveu_si128(vec_si, mask, masked_dest.as_mut_ptr() as *mut i8);
        t.array("Masked store into zeroed memory:    ", &masked_dest.0);

        t.heading("5. Streaming Stores");
        // Non-temporal stores bypass the cache hierarchy and are weakly
        // ordered, so each one is fenced before its destination is read
        _mm_stream_ps(fa_dest.as_mut_ptr(), vec_ps);
        _mm_stream_pd(da_dest.as_mut_ptr(), vec_pd);
        _mm_stream_si128(ia_dest.as_mut_ptr() as *mut __m128i, vec_si);
        _mm_sfence();
        t.array("Streaming float store (_mm_stream_ps):", &fa_dest.0);
        t.array("Streaming double store (_mm_stream_pd):", &da_dest.0);
        t.array("Streaming int store (_mm_stream_si128):", &ia_dest.0);
        _mm_stream_si32(&mut ia_dest[0], 999);
        _mm_sfence();
        t.array("Streaming single int (_mm_stream_si32):", &ia_dest.0);
    }
    Ok(t)
}
