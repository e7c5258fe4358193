//! SSE load instructions: aligned and unaligned, broadcast, scalar, partial,
//! reversed and streaming.
//!
//! The streaming load (`movntdqa`) is SSE4.1 and `lddqu` is SSE3, so the
//! demonstration as a whole needs SSE4.1.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::A16;
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::{m128, m128d, m128i};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

x86_demo!(Isa::Sse41);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
unsafe fn demo() -> Result<Transcript> {
    // Aligned sources for the aligned loads
    let fa_data = A16([1.0f32, 2.0, 3.0, 4.0]);
    let da_data = A16([10.0f64, 20.0]);
    let ia_data = A16([100i32, 200, 300, 400]);

    // Unaligned sources: element 1 onwards is never 16-byte aligned
    let fu_data = A16([0.0f32, 5.0, 6.0, 7.0, 8.0]);
    let du_data = A16([0.0f64, 50.0, 60.0]);
    let iu_data = A16([0i32, 500, 600, 700, 800]);
    let fu_ptr = fu_data[1..].as_ptr();
    let du_ptr = du_data[1..].as_ptr();
    let iu_ptr = iu_data[1..].as_ptr() as *const __m128i;

    let mut t = Transcript::new("SSE Load Instructions Tutorial");
    unsafe {
        t.heading("1. Aligned vs. Unaligned Loads");
        t.register("Aligned float load (_mm_load_ps):", m128(_mm_load_ps(fa_data.as_ptr())));
        t.register("Unaligned float load (_mm_loadu_ps):", m128(_mm_loadu_ps(fu_ptr)));
        t.register("Aligned double load (_mm_load_pd):", m128d(_mm_load_pd(da_data.as_ptr())));
        t.register("Unaligned double load (_mm_loadu_pd):", m128d(_mm_loadu_pd(du_ptr)));
        t.register(
            "Aligned integer load (_mm_load_si128):",
            m128i(_mm_load_si128(ia_data.as_ptr() as *const __m128i)),
        );
        t.register("Unaligned integer load (_mm_loadu_si128):", m128i(_mm_loadu_si128(iu_ptr)));
        // lddqu can beat movdqu when the load crosses a cache line
        t.register("Special unaligned integer load (_mm_lddqu_si128):", m128i(_mm_lddqu_si128(iu_ptr)));

        t.heading("2. Broadcast Loads");
        t.note("Broadcast single float to vector (_mm_load1_ps):");
        t.array("Source float: ", [fa_data[1]]);
        t.register("", m128(_mm_load1_ps(&fa_data[1])));
        t.note("Broadcast single double to vector (_mm_load1_pd):");
        t.array("Source double: ", [da_data[1]]);
        t.register("", m128d(_mm_load1_pd(&da_data[1])));

        t.heading("3. Scalar Loads");
        t.note("Scalar float load (_mm_load_ss):");
        t.array("Source float: ", [fa_data[0]]);
        t.register("", m128(_mm_load_ss(&fa_data[0])));
        t.note("Scalar double load (_mm_load_sd):");
        t.array("Source double: ", [da_data[0]]);
        t.register("", m128d(_mm_load_sd(&da_data[0])));

        t.heading("4. Partial Loads");
        let mut partial = _mm_set_pd(99.0, 88.0);
        t.register("Initial double vector:", m128d(partial));
        t.note("Load into LOW double (_mm_loadl_pd):");
        t.array("Source double: ", [da_data[0]]);
        partial = _mm_loadl_pd(partial, &da_data[0]);
        t.register("", m128d(partial));
        t.note("Load into HIGH double (_mm_loadh_pd):");
        t.array("Source double: ", [da_data[1]]);
        partial = _mm_loadh_pd(partial, &da_data[1]);
        t.register("", m128d(partial));

        t.heading("5. Reversed Loads");
        t.note("Reversed float load (_mm_loadr_ps):");
        t.array("Source floats: ", &fa_data.0);
        t.register("", m128(_mm_loadr_ps(fa_data.as_ptr())));
        t.note("Reversed double load (_mm_loadr_pd):");
        t.array("Source doubles: ", &da_data.0);
        t.register("", m128d(_mm_loadr_pd(da_data.as_ptr())));

        t.heading("6. Streaming Load");
        // Non-temporal hint; only effective on write-combining memory
        t.register(
            "Streaming load (_mm_stream_load_si128):",
            m128i(_mm_stream_load_si128(ia_data.as_ptr() as *const __m128i)),
        );
    }
    Ok(t)
}
