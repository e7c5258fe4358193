//! Element-wise float addition.
//!
//! The NEON path handles four lanes per iteration and finishes the remainder
//! with scalar adds. Targets without NEON use the scalar loop throughout.

use crate::common::config::TourConfig;
use crate::common::error::{Error, Result};
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// Lanes in a `float32x4_t`.
const LANES: usize = 4;

/// `result[i] = a[i] + b[i]` for slices of equal length.
pub fn vector_add(a: &[f32], b: &[f32], result: &mut [f32]) -> Result<()> {
    if b.len() != a.len() {
        return Err(Error::LengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    if result.len() != a.len() {
        return Err(Error::LengthMismatch {
            expected: a.len(),
            got: result.len(),
        });
    }

    #[cfg(target_arch = "aarch64")]
    {
        // SAFETY: NEON is baseline on aarch64 and the lengths match
        unsafe { vector_add_neon(a, b, result) }
    }

    #[cfg(not(target_arch = "aarch64"))]
    {
        vector_add_scalar(a, b, result);
    }

    Ok(())
}

#[cfg(target_arch = "aarch64")]
#[inline]
unsafe fn vector_add_neon(a: &[f32], b: &[f32], result: &mut [f32]) {
    let body = a.len() - a.len() % LANES;
    unsafe {
        for i in (0..body).step_by(LANES) {
            let vec_a = vld1q_f32(a.as_ptr().add(i));
            let vec_b = vld1q_f32(b.as_ptr().add(i));
            vst1q_f32(result.as_mut_ptr().add(i), vaddq_f32(vec_a, vec_b));
        }
    }
    vector_add_scalar(&a[body..], &b[body..], &mut result[body..]);
}

#[inline]
fn vector_add_scalar(a: &[f32], b: &[f32], result: &mut [f32]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x + y;
    }
}

/// Run the demonstration.
pub fn run(_config: &TourConfig) -> Result<Transcript> {
    Isa::Neon.ensure()?;

    let mut t = Transcript::new("NEON Vector Add");
    let a = [1.0f32, 2.0, 3.0, 4.0];
    let b = [5.0f32, 6.0, 7.0, 8.0];
    let mut result = [0f32; LANES];
    vector_add(&a, &b, &mut result)?;
    t.listing("NEON Result", &result);

    // Seven elements: one full vector plus a three-element scalar tail
    let a: Vec<f32> = (1..=7).map(|i| i as f32).collect();
    let b = vec![0.25f32; 7];
    let mut result = vec![0f32; 7];
    vector_add(&a, &b, &mut result)?;
    t.listing("NEON Result (with tail)", &result);
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_with_tail() {
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [0.5f32; 6];
        let mut result = [0f32; 6];
        vector_add(&a, &b, &mut result).unwrap();
        assert_eq!(result, [1.5, 2.5, 3.5, 4.5, 5.5, 6.5]);
    }

    #[test]
    fn test_length_mismatch() {
        let mut result = [0f32; 4];
        let err = vector_add(&[1.0; 4], &[1.0; 4], &mut result[..3]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 4, got: 3 }));
    }

    #[test]
    fn test_demo_follows_neon_availability() {
        let outcome = run(&TourConfig::default());
        if Isa::Neon.is_available() {
            let t = outcome.unwrap();
            assert_eq!(
                t.lanes("NEON Result").and_then(crate::common::lanes::Lanes::as_f32),
                Some(&[6.0f32, 8.0, 10.0, 12.0][..])
            );
        } else {
            assert!(matches!(outcome, Err(Error::Unsupported(Isa::Neon))));
        }
    }

    proptest! {
        #[test]
        fn prop_matches_scalar(values in prop::collection::vec(-1.0e6f32..1.0e6, 0..40)) {
            let other: Vec<f32> = values.iter().rev().copied().collect();
            let mut result = vec![0f32; values.len()];
            vector_add(&values, &other, &mut result).unwrap();
            for i in 0..values.len() {
                prop_assert_eq!(result[i], values[i] + other[i]);
            }
        }
    }
}
