//! Complex-number addition on interleaved `(re, im)` float pairs.
//!
//! [`complex_add`] is a plain predicated add over the interleaved floats.
//! [`complex_add_rotate`] uses the SVE2 `FCADD` form, which rotates the
//! second operand by 90 or 270 degrees (multiplies it by `i` or `-i`) before
//! adding.

use crate::arm::sve::model::{self, Predicate, Rotation, ScalableVector, VectorLength};
use crate::arm::sve::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::{Error, Result};
use crate::common::features::Isa;
use crate::common::transcript::Transcript;
use num_complex::Complex32;

fn interleave(values: &[Complex32]) -> Vec<f32> {
    values.iter().flat_map(|c| [c.re, c.im]).collect()
}

fn check_lengths(a: &[Complex32], b: &[Complex32], out: &[Complex32]) -> Result<()> {
    for len in [b.len(), out.len()] {
        if len != a.len() {
            return Err(Error::LengthMismatch {
                expected: a.len(),
                got: len,
            });
        }
    }
    Ok(())
}

/// Predicated loop over the interleaved floats of `a` and `b`; `op` combines
/// one vector of each.
fn interleaved_loop(
    vl: VectorLength,
    a: &[Complex32],
    b: &[Complex32],
    out: &mut [Complex32],
    op: impl Fn(&Predicate, &ScalableVector<f32>, &ScalableVector<f32>) -> ScalableVector<f32>,
) -> Result<()> {
    check_lengths(a, b, out)?;
    let a = interleave(a);
    let b = interleave(b);
    let mut result = vec![0f32; a.len()];

    let n = a.len() as i64;
    let lanes = vl.cntw();
    let mut i = 0;
    let mut pg = Predicate::whilelt(lanes, 0, n);
    while pg.first() {
        let vec_a = model::ld1(&pg, &a[i..])?;
        let vec_b = model::ld1(&pg, &b[i..])?;
        model::st1(&pg, &mut result[i..], &op(&pg, &vec_a, &vec_b))?;

        i += lanes;
        pg = Predicate::whilelt(lanes, i as i64, n);
    }

    for (slot, pair) in out.iter_mut().zip(result.chunks_exact(2)) {
        *slot = Complex32::new(pair[0], pair[1]);
    }
    Ok(())
}

/// `out[i] = a[i] + b[i]`.
pub fn complex_add(vl: VectorLength, a: &[Complex32], b: &[Complex32], out: &mut [Complex32]) -> Result<()> {
    interleaved_loop(vl, a, b, out, model::add_x)
}

/// `out[i] = a[i] + b[i] * i` for [`Rotation::Deg90`], `a[i] - b[i] * i`
/// for [`Rotation::Deg270`].
pub fn complex_add_rotate(
    vl: VectorLength,
    a: &[Complex32],
    b: &[Complex32],
    rotation: Rotation,
    out: &mut [Complex32],
) -> Result<()> {
    interleaved_loop(vl, a, b, out, |pg, x, y| model::cadd(pg, x, y, rotation))
}

fn write_pairs(values: &[Complex32]) -> String {
    let mut buf = String::with_capacity(values.len() * 8);
    for c in values {
        buf.push('(');
        crate::common::lanes::write_float(&mut buf, c.re as f64);
        buf.push_str(", ");
        crate::common::lanes::write_float(&mut buf, c.im as f64);
        buf.push_str(") ");
    }
    buf
}

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    let vl = config.vector_length()?;
    let mut t = modelled_transcript("SVE2 Complex Add", Isa::Sve2, vl);

    let n = vl.cntw() / 2;
    let a: Vec<Complex32> = (0..n).map(|i| Complex32::new(i as f32, (i + 1) as f32)).collect();
    let b: Vec<Complex32> = (0..n)
        .map(|i| Complex32::new((n - i) as f32, n as f32 - i as f32 - 1.0))
        .collect();
    t.note(format!("{} complex numbers per vector.", n));

    let mut result = vec![Complex32::default(); n];
    complex_add(vl, &a, &b, &mut result)?;
    t.note(format!("SVE2 Result: {}", write_pairs(&result)));
    t.listing("SVE2 Result (interleaved)", interleave(&result));

    t.heading("Complex add with rotation (svcadd)");
    for (rotation, label) in [(Rotation::Deg90, "Rotated 90"), (Rotation::Deg270, "Rotated 270")] {
        complex_add_rotate(vl, &a, &b, rotation, &mut result)?;
        t.note(format!("{}: {}", label, write_pairs(&result)));
        t.listing(label, interleave(&result));
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_demo_sums() {
        let t = run(&TourConfig::default()).unwrap();
        // n = 2: (0,1)+(2,1) and (1,2)+(1,0)
        assert_eq!(
            t.lanes("SVE2 Result (interleaved)").and_then(Lanes::as_f32),
            Some(&[2.0, 2.0, 2.0, 2.0][..])
        );
        assert!(t.mentions("SVE2 Result: (2, 2) (2, 2)"));
    }

    #[test]
    fn test_rotations_match_complex_arithmetic() {
        let vl = VectorLength::new(256).unwrap();
        let a: Vec<Complex32> = (0..7).map(|i| Complex32::new(i as f32, -(i as f32))).collect();
        let b: Vec<Complex32> = (0..7).map(|i| Complex32::new(1.0, i as f32 * 0.5)).collect();
        let mut out = vec![Complex32::default(); 7];

        complex_add_rotate(vl, &a, &b, Rotation::Deg90, &mut out).unwrap();
        for k in 0..7 {
            assert_eq!(out[k], a[k] + b[k] * Complex32::i());
        }

        complex_add_rotate(vl, &a, &b, Rotation::Deg270, &mut out).unwrap();
        for k in 0..7 {
            assert_eq!(out[k], a[k] - b[k] * Complex32::i());
        }
    }

    #[test]
    fn test_plain_add_any_length() {
        let vl = VectorLength::MIN;
        let a = vec![Complex32::new(1.0, 2.0); 5];
        let b = vec![Complex32::new(0.5, -2.0); 5];
        let mut out = vec![Complex32::default(); 5];
        complex_add(vl, &a, &b, &mut out).unwrap();
        assert!(out.iter().all(|&c| c == Complex32::new(1.5, 0.0)));
    }

    #[test]
    fn test_length_mismatch() {
        let mut out = vec![Complex32::default(); 2];
        let err = complex_add(VectorLength::MIN, &[Complex32::default(); 2], &[], &mut out).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, got: 0 }));
    }
}
