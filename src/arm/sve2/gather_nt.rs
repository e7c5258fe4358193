//! SVE2 non-temporal gathers (`svldnt1_gather_*`).
//!
//! Non-temporal gathers take unsigned 32-bit byte offsets. The hint only
//! affects caching, so the model reads memory like an ordinary gather.

use crate::arm::sve::model::{self, Predicate, VectorLength};
use crate::arm::sve::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    let vl = config.vector_length()?;
    let mut t = modelled_transcript("SVE2 Non-Temporal Gather Loads", Isa::Sve2, vl);
    t.note(format!("SVE2 vector width for int32_t is {} elements.", vl.cntw()));

    gather_offset_s32(vl, &mut t)?;
    gather_offset_u32(vl, &mut t)?;
    gather_sign_extend_s16(vl, &mut t)?;
    Ok(t)
}

fn offsets(vl: VectorLength, f: impl Fn(u32) -> u32) -> Vec<u32> {
    (0..vl.cntw() as u32).map(f).collect()
}

fn gather_offset_s32(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Gather Load with Offsets (s32)");
    let count = vl.cntw();
    let data_source: Vec<i32> = (100..).take(count * 2).collect();
    let offset_vals = offsets(vl, |i| i * 2);
    t.listing("Data Source  ", &data_source);
    t.listing("Offsets      ", &offset_vals);

    let pg = Predicate::all::<u32>(vl);
    let offsets_vec = model::ld1(&pg, &offset_vals)?;
    let gathered = model::ld1_gather_offset(&pg, &data_source, &offsets_vec)?;

    let mut result = vec![0i32; count];
    model::st1(&pg, &mut result, &gathered)?;
    t.listing("Gathered Data", &result);
    Ok(())
}

fn gather_offset_u32(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Gather Load with Offsets (u32)");
    let count = vl.cntw();
    let data_source: Vec<u32> = (200..).take(count * 2).collect();
    let offset_vals = offsets(vl, |i| i * 2 + 1);
    t.listing("Data Source  ", &data_source);
    t.listing("Offsets      ", &offset_vals);

    let pg = Predicate::all::<u32>(vl);
    let offsets_vec = model::ld1(&pg, &offset_vals)?;
    // Odd byte offsets: each lane takes three bytes of one word and one of the next
    let gathered = model::ld1_gather_offset(&pg, &data_source, &offsets_vec)?;

    let mut result = vec![0u32; count];
    model::st1(&pg, &mut result, &gathered)?;
    t.listing("Gathered Data", &result);
    Ok(())
}

fn gather_sign_extend_s16(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Gather Load with Sign-Extension (s16)");
    let count = vl.cntw();
    let data_source: Vec<i16> = (-50..).take(count * 2).collect();
    let offset_vals = offsets(vl, |i| i);
    t.listing("Data Source (s16)", &data_source);
    t.listing("Offsets (u32)    ", &offset_vals);

    let pg = Predicate::all::<u32>(vl);
    let offsets_vec = model::ld1(&pg, &offset_vals)?;
    // svldnt1sh: 16-bit loads sign-extended into 32-bit lanes
    let gathered = model::ld1_gather_offset_extend::<i16, i32, u32>(&pg, &data_source, &offsets_vec)?;

    let mut result = vec![0i32; count];
    model::st1(&pg, &mut result, &gathered)?;
    t.listing("Gathered Data (s32)", &result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_s32_gather() {
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(
            t.lanes("Gathered Data").and_then(Lanes::as_i32),
            Some(&[100, 101 << 16, 101, 102 << 16][..])
        );
    }

    #[test]
    fn test_u32_gather_with_odd_offsets() {
        let t = run(&TourConfig::default()).unwrap();
        let lanes = t.last_lanes("Gathered Data").and_then(Lanes::as_u32).unwrap();
        assert_eq!(lanes[0], 201 << 24);
        assert_eq!(lanes[1], 201 << 8);
    }

    #[test]
    fn test_sign_extending_gather() {
        let t = run(&TourConfig::default()).unwrap();
        let lanes = t.lanes("Gathered Data (s32)").and_then(Lanes::as_i32).unwrap();
        // Offsets 0 and 2 are element-aligned
        assert_eq!(lanes[0], -50);
        assert_eq!(lanes[2], -49);
        // Offset 1 straddles -50 (0xFFCE) and -49 (0xFFCF)
        assert_eq!(lanes[1], i16::from_le_bytes([0xFF, 0xCF]) as i32);
    }
}
