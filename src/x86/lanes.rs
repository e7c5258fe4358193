//! Register-to-array spills for display.
//!
//! Each helper stores the register into an aligned stack buffer with the
//! aligned store of its own instruction set, so it needs exactly the feature
//! that produced the register.

use crate::common::aligned::{A16, A32, A64};
use std::arch::x86_64::*;

/// Lanes of an `__m128`.
#[target_feature(enable = "sse")]
#[inline]
pub unsafe fn m128(v: __m128) -> [f32; 4] {
    let mut buf = A16([0f32; 4]);
    unsafe { _mm_store_ps(buf.as_mut_ptr(), v) };
    buf.0
}

/// Lanes of an `__m128d`.
#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn m128d(v: __m128d) -> [f64; 2] {
    let mut buf = A16([0f64; 2]);
    unsafe { _mm_store_pd(buf.as_mut_ptr(), v) };
    buf.0
}

/// Lanes of an `__m128i`, as four 32-bit integers.
#[target_feature(enable = "sse2")]
#[inline]
pub unsafe fn m128i(v: __m128i) -> [i32; 4] {
    let mut buf = A16([0i32; 4]);
    unsafe { _mm_store_si128(buf.as_mut_ptr() as *mut __m128i, v) };
    buf.0
}

/// Lanes of an `__m256`.
#[target_feature(enable = "avx")]
#[inline]
pub unsafe fn m256(v: __m256) -> [f32; 8] {
    let mut buf = A32([0f32; 8]);
    unsafe { _mm256_store_ps(buf.as_mut_ptr(), v) };
    buf.0
}

/// Lanes of an `__m256d`.
#[target_feature(enable = "avx")]
#[inline]
pub unsafe fn m256d(v: __m256d) -> [f64; 4] {
    let mut buf = A32([0f64; 4]);
    unsafe { _mm256_store_pd(buf.as_mut_ptr(), v) };
    buf.0
}

/// Lanes of an `__m256i`, as eight 32-bit integers.
#[target_feature(enable = "avx")]
#[inline]
pub unsafe fn m256i(v: __m256i) -> [i32; 8] {
    let mut buf = A32([0i32; 8]);
    unsafe { _mm256_store_si256(buf.as_mut_ptr() as *mut __m256i, v) };
    buf.0
}

/// Lanes of an `__m512`.
#[target_feature(enable = "avx512f")]
#[inline]
pub unsafe fn m512(v: __m512) -> [f32; 16] {
    let mut buf = A64([0f32; 16]);
    unsafe { _mm512_store_ps(buf.as_mut_ptr(), v) };
    buf.0
}

/// Lanes of an `__m512i`, as sixteen 32-bit integers.
#[target_feature(enable = "avx512f")]
#[inline]
pub unsafe fn m512i(v: __m512i) -> [i32; 16] {
    let mut buf = A64([0i32; 16]);
    unsafe { _mm512_store_epi32(buf.as_mut_ptr(), v) };
    buf.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_spills_keep_lane_order() {
        if !is_x86_feature_detected!("sse2") {
            return;
        }
        unsafe {
            assert_eq!(m128(_mm_setr_ps(1.0, 2.0, 3.0, 4.0)), [1.0, 2.0, 3.0, 4.0]);
            assert_eq!(m128d(_mm_set_pd(99.0, 88.0)), [88.0, 99.0]);
            assert_eq!(m128i(_mm_setr_epi32(1, -2, 3, -4)), [1, -2, 3, -4]);
        }
    }

    #[test]
    fn test_avx_spills() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        unsafe {
            assert_eq!(m256(_mm256_set1_ps(0.5)), [0.5; 8]);
            assert_eq!(m256d(_mm256_setr_pd(1.0, 2.0, 3.0, 4.0)), [1.0, 2.0, 3.0, 4.0]);
            assert_eq!(m256i(_mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7)), [0, 1, 2, 3, 4, 5, 6, 7]);
        }
    }

    #[test]
    fn test_avx512_spills() {
        if !is_x86_feature_detected!("avx512f") {
            return;
        }
        unsafe {
            assert_eq!(m512(_mm512_set1_ps(2.0)), [2.0; 16]);
            assert_eq!(m512i(_mm512_set1_epi32(-1)), [-1; 16]);
        }
    }
}
