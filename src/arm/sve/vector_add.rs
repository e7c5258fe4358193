//! Vector-length-agnostic array addition.
//!
//! The loop never asks how wide a vector is beyond `svcntw`: `svwhilelt`
//! builds a predicate covering the lanes still in range, so the final partial
//! vector needs no scalar tail.

use super::model::{self, Predicate, VectorLength};
use super::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::{Error, Result};
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// `result[i] = a[i] + b[i]` with predicated vectors of length `vl`.
pub fn vector_add(vl: VectorLength, a: &[f32], b: &[f32], result: &mut [f32]) -> Result<()> {
    let n = a.len();
    if b.len() != n {
        return Err(Error::LengthMismatch { expected: n, got: b.len() });
    }
    if result.len() != n {
        return Err(Error::LengthMismatch { expected: n, got: result.len() });
    }

    let lanes = vl.cntw();
    let mut i = 0;
    let mut pg = Predicate::whilelt(lanes, 0, n as i64);
    while pg.first() {
        let vec_a = model::ld1(&pg, &a[i..])?;
        let vec_b = model::ld1(&pg, &b[i..])?;
        let sum = model::add_x(&pg, &vec_a, &vec_b);
        model::st1(&pg, &mut result[i..], &sum)?;

        i += lanes;
        pg = Predicate::whilelt(lanes, i as i64, n as i64);
    }
    Ok(())
}

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    let vl = config.vector_length()?;
    let mut t = modelled_transcript("SVE Vector Add", Isa::Sve, vl);

    let n = vl.cntw();
    let a: Vec<f32> = (0..n).map(|i| i as f32).collect();
    let b: Vec<f32> = (0..n).map(|i| (n - i) as f32).collect();
    let mut result = vec![0f32; n];
    vector_add(vl, &a, &b, &mut result)?;
    t.listing("SVE Result", &result);

    // An odd length ends on a partially active vector
    let m = n + n / 2 + 1;
    let a: Vec<f32> = (0..m).map(|i| i as f32).collect();
    let b = vec![0.5f32; m];
    let mut result = vec![0f32; m];
    vector_add(vl, &a, &b, &mut result)?;
    t.note(format!("{} elements need {} predicated iterations.", m, m.div_ceil(n)));
    t.listing("SVE Result (partial tail)", &result);
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lanes::Lanes;
    use proptest::prelude::*;

    #[test]
    fn test_full_vector() {
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(t.lanes("SVE Result").and_then(Lanes::as_f32), Some(&[4.0; 4][..]));
    }

    #[test]
    fn test_partial_tail() {
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(
            t.lanes("SVE Result (partial tail)").and_then(Lanes::as_f32),
            Some(&[0.5, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5][..])
        );
    }

    #[test]
    fn test_empty_input() {
        let mut result = [];
        vector_add(VectorLength::MIN, &[], &[], &mut result).unwrap();
    }

    #[test]
    fn test_length_mismatch() {
        let mut result = [0f32; 3];
        let err = vector_add(VectorLength::MIN, &[1.0; 3], &[1.0; 2], &mut result).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 3, got: 2 }));
    }

    proptest! {
        #[test]
        fn prop_matches_scalar_add(
            values in prop::collection::vec(-1000.0f32..1000.0, 0..70),
            granules in 1u32..=16,
        ) {
            let vl = VectorLength::new(granules * 128).unwrap();
            let other: Vec<f32> = values.iter().map(|v| v * 0.5).collect();
            let mut result = vec![0f32; values.len()];
            vector_add(vl, &values, &other, &mut result).unwrap();
            for i in 0..values.len() {
                prop_assert_eq!(result[i], values[i] + other[i]);
            }
        }
    }
}
