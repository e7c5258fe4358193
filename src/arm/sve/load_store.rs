//! Basic predicated load, store and add on 32-bit floats.
//!
//! The same walkthrough runs for SVE and SVE2, which share these instructions.

use super::model::{self, Predicate, ScalableVector, VectorLength};
use super::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// Value added to every lane in the second half of the walkthrough.
const INCREMENT: f32 = 5.5;

/// Run the demonstration for SVE.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    walkthrough(Isa::Sve, config.vector_length()?)
}

/// Load, store and modify one vector of floats under an all-true predicate.
pub(crate) fn walkthrough(isa: Isa, vl: VectorLength) -> Result<Transcript> {
    let lanes = vl.cntw();
    let mut t = modelled_transcript(&format!("{} Memory Load and Store", isa), isa, vl);
    t.note(format!("{} vector holds {} float32 elements.", isa, lanes));

    t.heading("Basic Load and Store");
    let input: Vec<f32> = (1..=lanes).map(|i| 1.1 * i as f32).collect();
    t.listing("Original data ", &input);

    // svptrue_b32 enables every 32-bit lane
    let all_lanes = Predicate::all::<f32>(vl);
    let vector = model::ld1(&all_lanes, &input)?;

    let mut output = vec![0f32; lanes];
    model::st1(&all_lanes, &mut output, &vector)?;
    t.listing("Stored data   ", &output);

    t.heading("Modifying data with SIMD");
    let mut numbers: Vec<f32> = (1..=lanes).map(|i| 10.0 * i as f32).collect();
    t.listing("Initial numbers ", &numbers);

    let numbers_vec = model::ld1(&all_lanes, &numbers)?;
    let constants = ScalableVector::dup(lanes, INCREMENT);
    let sum = model::add_z(&all_lanes, &numbers_vec, &constants);
    model::st1(&all_lanes, &mut numbers, &sum)?;
    t.listing("Modified numbers", &numbers);
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_load_store_and_modify() {
        let t = run(&TourConfig::default()).unwrap();
        let stored = t.lanes("Stored data").and_then(Lanes::as_f32).unwrap();
        assert_eq!(stored, t.lanes("Original data").and_then(Lanes::as_f32).unwrap());
        assert_eq!(
            t.lanes("Modified numbers").and_then(Lanes::as_f32),
            Some(&[15.5, 25.5, 35.5, 45.5][..])
        );
    }

    #[test]
    fn test_lane_count_follows_vector_length() {
        let t = walkthrough(Isa::Sve2, VectorLength::new(512).unwrap()).unwrap();
        assert_eq!(t.lanes("Modified numbers").map(Lanes::len), Some(16));
        assert!(t.title().starts_with("SVE2"));
        assert!(t.mentions("holds 16 float32"));
    }
}
