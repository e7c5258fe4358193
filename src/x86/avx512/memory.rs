//! AVX-512 memory operations.
//!
//! AVX-512 replaces vector masks with dedicated mask registers (`k0`-`k7`):
//! one bit per lane, lane 0 in bit 0.

use crate::common::features::Isa;

#[cfg(target_arch = "x86_64")]
use crate::common::aligned::A64;
#[cfg(target_arch = "x86_64")]
use crate::common::error::Result;
#[cfg(target_arch = "x86_64")]
use crate::common::transcript::Transcript;
#[cfg(target_arch = "x86_64")]
use crate::x86::lanes::m512;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Every odd lane.
#[cfg(target_arch = "x86_64")]
const ODD_LANES: __mmask16 = 0b1010_1010_1010_1010;

#[cfg(target_arch = "x86_64")]
const F32_SCALE: i32 = std::mem::size_of::<f32>() as i32;

x86_demo!(Isa::Avx512f);

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f")]
unsafe fn demo() -> Result<Transcript> {
    let data_ps = A64(std::array::from_fn::<f32, 16, _>(|i| (i + 1) as f32));
    let indices = A64(std::array::from_fn::<i32, 16, _>(|i| 15 - i as i32));
    let mut dest_ps = A64([0f32; 16]);

    let k = ODD_LANES;
    let mut t = Transcript::new("AVX-512 Memory Operations Tutorial");
    unsafe {
        let vindex = _mm512_load_epi32(indices.as_ptr());
        let vec_ps = _mm512_load_ps(data_ps.as_ptr());

        t.heading("1. New Masking Paradigm");
        t.mask("Mask", u64::from(k), 16);
        t.register("Masked load (zeroing inactive):", m512(_mm512_maskz_load_ps(k, data_ps.as_ptr())));

        t.note("Masked store:");
        _mm512_mask_store_ps(dest_ps.as_mut_ptr(), k, vec_ps);
        t.array("Result of masked store: ", &dest_ps.0);

        t.heading("2. Scatter / Gather");
        let gathered = _mm512_i32gather_ps::<F32_SCALE>(vindex, data_ps.as_ptr());
        t.register("Gathering with reversed indices:", m512(gathered));

        // Scatter is the inverse of gather, so this undoes the reversal
        t.note("Scattering the gathered (reversed) vector:");
        _mm512_i32scatter_ps::<F32_SCALE>(dest_ps.as_mut_ptr(), vindex, gathered);
        t.array("Result of scatter: ", &dest_ps.0);

        t.heading("3. Compress / Expand");
        t.register("Compressing active elements from a vector:", m512(vec_ps));
        t.mask("Mask", u64::from(k), 16);
        _mm512_mask_compressstoreu_ps(dest_ps.as_mut_ptr(), k, vec_ps);
        // Only the 8 active lanes are written
        t.array("Result of compress store: ", &dest_ps[..k.count_ones() as usize]);

        let expand_dest = _mm512_set1_ps(-1.0);
        let expanded = _mm512_mask_expandloadu_ps(expand_dest, k, dest_ps.as_ptr());
        t.register("Expanding contiguous data into a vector:", m512(expanded));
    }
    Ok(t)
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;
    use crate::common::config::TourConfig;
    use crate::common::lanes::Lanes;

    fn odd_lanes_or(fill: f32) -> Vec<f32> {
        (0..16).map(|i| if i % 2 == 1 { (i + 1) as f32 } else { fill }).collect()
    }

    #[test]
    fn test_masking() {
        if !Isa::Avx512f.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(t.mask_bits("Mask"), Some(0xAAAA));
        assert_eq!(
            t.lanes("Masked load (zeroing inactive):").and_then(Lanes::as_f32),
            Some(&odd_lanes_or(0.0)[..])
        );
        assert_eq!(
            t.lanes("Result of masked store:").and_then(Lanes::as_f32),
            Some(&odd_lanes_or(0.0)[..])
        );
    }

    #[test]
    fn test_gather_scatter() {
        if !Isa::Avx512f.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        let reversed: Vec<f32> = (1..=16).rev().map(|i| i as f32).collect();
        let ascending: Vec<f32> = (1..=16).map(|i| i as f32).collect();
        assert_eq!(
            t.lanes("Gathering with reversed indices:").and_then(Lanes::as_f32),
            Some(&reversed[..])
        );
        assert_eq!(t.lanes("Result of scatter:").and_then(Lanes::as_f32), Some(&ascending[..]));
    }

    #[test]
    fn test_compress_expand() {
        if !Isa::Avx512f.is_available() {
            return;
        }
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(
            t.lanes("Result of compress store:").and_then(Lanes::as_f32),
            Some(&[2.0f32, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0][..])
        );
        assert_eq!(
            t.lanes("Expanding contiguous data into a vector:").and_then(Lanes::as_f32),
            Some(&odd_lanes_or(-1.0)[..])
        );
    }
}
