//! SVE2 non-temporal scatters (`svstnt1_scatter_*`).

use crate::arm::sve::model::{self, Predicate, VectorLength};
use crate::arm::sve::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    let vl = config.vector_length()?;
    let mut t = modelled_transcript("SVE2 Non-Temporal Scatter Stores", Isa::Sve2, vl);
    t.note(format!("SVE2 vector width for int32_t is {} elements.", vl.cntw()));

    scatter_offset_s32(vl, &mut t)?;
    scatter_offset_u32(vl, &mut t)?;
    scatter_truncate_s16(vl, &mut t)?;
    Ok(t)
}

fn scatter_offset_s32(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Scatter Store with Offsets (s32)");
    let count = vl.cntw();
    let data: Vec<i32> = (100..).take(count).collect();
    let offset_vals: Vec<u32> = (0..count as u32).map(|i| i * 2).collect();
    t.listing("Data to Store", &data);
    t.listing("Offsets      ", &offset_vals);

    let pg = Predicate::all::<i32>(vl);
    let data_vec = model::ld1(&pg, &data)?;
    let offsets = model::ld1(&pg, &offset_vals)?;

    let mut destination = vec![0i32; count * 2];
    model::st1_scatter_offset(&pg, &mut destination, &offsets, &data_vec)?;
    t.listing("Scattered Data", &destination);
    Ok(())
}

fn scatter_offset_u32(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Scatter Store with Offsets (u32)");
    let count = vl.cntw();
    let data: Vec<u32> = (200..).take(count).collect();
    let offset_vals: Vec<u32> = (0..count as u32).map(|i| i * 2 + 1).collect();
    t.listing("Data to Store", &data);
    t.listing("Offsets      ", &offset_vals);

    let pg = Predicate::all::<u32>(vl);
    let data_vec = model::ld1(&pg, &data)?;
    let offsets = model::ld1(&pg, &offset_vals)?;

    let mut destination = vec![0u32; count * 2];
    model::st1_scatter_offset(&pg, &mut destination, &offsets, &data_vec)?;
    t.listing("Scattered Data", &destination);
    Ok(())
}

fn scatter_truncate_s16(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Scatter Store with Truncation (s32 -> s16)");
    let count = vl.cntw();
    let data: Vec<i32> = (300..).take(count).collect();
    let offset_vals: Vec<u32> = (0..count as u32).collect();
    t.listing("Data to Store (s32)", &data);
    t.listing("Offsets (u32)    ", &offset_vals);

    let pg = Predicate::all::<i32>(vl);
    let data_vec = model::ld1(&pg, &data)?;
    let offsets = model::ld1(&pg, &offset_vals)?;

    // svstnt1h: each 32-bit lane keeps its low 16 bits
    let mut destination = vec![0i16; count * 2];
    model::st1_scatter_offset_truncate::<i32, i16, u32>(&pg, &mut destination, &offsets, &data_vec)?;
    t.listing("Scattered Data (s16)", &destination);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::lanes::Lanes;

    #[test]
    fn test_s32_scatter() {
        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(
            t.lanes("Scattered Data").and_then(Lanes::as_i32),
            Some(&[100 + (101 << 16), 102 + (103 << 16), 0, 0, 0, 0, 0, 0][..])
        );
    }

    #[test]
    fn test_u32_scatter_with_odd_offsets() {
        let t = run(&TourConfig::default()).unwrap();
        let lanes = t.last_lanes("Scattered Data").and_then(Lanes::as_u32).unwrap();
        assert_eq!(lanes[0], (200 << 8) | (201 << 24));
        assert_eq!(lanes[1], (202 << 8) | (203 << 24));
        assert!(lanes[2..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_truncating_scatter() {
        let t = run(&TourConfig::default()).unwrap();
        let lanes = t.lanes("Scattered Data (s16)").and_then(Lanes::as_i16).unwrap();
        assert_eq!(&lanes[..3], &[0x2D2C, 0x2F2E, 0x0001]);
        assert!(lanes[3..].iter().all(|&v| v == 0));
    }
}
