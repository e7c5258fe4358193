//! SVE signed 32-bit loads: contiguous, gather by byte offset and by index,
//! de-interleaving, first-fault, non-fault and non-temporal.

use super::model::{self, Predicate, ScalableVector, VectorLength};
use super::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    let vl = config.vector_length()?;
    let mut t = modelled_transcript("SVE int32_t Load Instructions", Isa::Sve, vl);
    t.note(format!("SVE vector width for int32_t is {} elements.", vl.cntw()));

    consecutive_load(vl, &mut t)?;
    gather_load_offset(vl, &mut t)?;
    gather_load_index(vl, &mut t)?;
    multi_vector_load(vl, &mut t)?;
    special_loads(vl, &mut t)?;
    Ok(t)
}

fn consecutive_load(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Consecutive Load (svld1_s32)");
    let count = vl.cntw();
    let data: Vec<i32> = (10..).take(count).collect();
    t.listing("Original Data ", &data);

    let pg = Predicate::all::<i32>(vl);
    let vec = model::ld1(&pg, &data)?;

    let mut result = vec![0i32; count];
    model::st1(&pg, &mut result, &vec)?;
    t.listing("Loaded Vector ", &result);
    Ok(())
}

fn gather_load_offset(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Gather Load with Offsets (svld1_gather_s32offset_s32)");
    let count = vl.cntw();
    // Offsets may point anywhere, so the source is larger than one vector
    let data_source: Vec<i32> = (100..).take(count * 2).collect();
    let offset_vals: Vec<i32> = (0..count as i32).map(|i| i * 2).collect();
    t.listing("Data Source   ", &data_source);
    t.listing("Offsets       ", &offset_vals);
    t.note("Offsets are in bytes: odd multiples of 2 read across two int32_t elements.");

    let pg = Predicate::all::<i32>(vl);
    let offsets = model::ld1(&pg, &offset_vals)?;
    let gathered = model::ld1_gather_offset(&pg, &data_source, &offsets)?;

    let mut result = vec![0i32; count];
    model::st1(&pg, &mut result, &gathered)?;
    t.listing("Gathered Data ", &result);
    Ok(())
}

fn gather_load_index(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Gather Load with Indices (svld1_gather_s32index_s32)");
    let count = vl.cntw();
    let data_source: Vec<i32> = (200..).take(count * 2).collect();
    let index_vals: Vec<i32> = (0..count as i32).map(|i| i * 2 + 1).collect();
    t.listing("Data Source  ", &data_source);
    t.listing("Indices      ", &index_vals);

    let pg = Predicate::all::<i32>(vl);
    let indices = model::ld1(&pg, &index_vals)?;
    // Indices are scaled by the element size
    let gathered = model::ld1_gather_index(&pg, &data_source, &indices)?;

    let mut result = vec![0i32; count];
    model::st1(&pg, &mut result, &gathered)?;
    t.listing("Gathered Data", &result);
    Ok(())
}

fn multi_vector_load(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Multi-vector Load for De-interleaving (svld2_s32)");
    let count = vl.cntw();
    let interleaved: Vec<i32> = (0..count as i32).flat_map(|i| [300 + i, 400 + i]).collect();
    t.listing("Interleaved Data", &interleaved);

    let pg = Predicate::all::<i32>(vl);
    let (vec0, vec1) = model::ld2(&pg, &interleaved)?;

    let mut result0 = vec![0i32; count];
    let mut result1 = vec![0i32; count];
    model::st1(&pg, &mut result0, &vec0)?;
    model::st1(&pg, &mut result1, &vec1)?;
    t.listing("De-interleaved Vec 0", &result0);
    t.listing("De-interleaved Vec 1", &result1);
    Ok(())
}

fn special_loads(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Specialized Loads (First-Fault, Non-Fault, Non-Temporal)");
    let count = vl.cntw();
    let data: Vec<i32> = (600..).take(count).collect();
    t.listing("Original Data", &data);

    let pg = Predicate::all::<i32>(vl);
    let mut result = vec![0i32; count];

    // First-fault: a fault after the first active lane only trims the FFR
    let (ff_vec, _) = model::ldff1(&pg, &data)?;
    model::st1(&pg, &mut result, &ff_vec)?;
    t.listing("First-Fault Load Result", &result);

    // Non-fault: a fault anywhere zeroes the lane and clears the FFR from there on
    let (nf_vec, _) = model::ldnf1(&pg, &data);
    model::st1(&pg, &mut result, &nf_vec)?;
    t.listing("Non-Fault Load Result  ", &result);

    // Non-temporal: data will not be reused soon
    let nt_vec = model::ldnt1(&pg, &data)?;
    model::st1(&pg, &mut result, &nt_vec)?;
    t.listing("Non-Temporal Load Result", &result);

    t.note("A first-fault load that runs off the end of a shorter buffer:");
    let short = &data[..count - 1];
    let (partial, ffr) = model::ldff1(&pg, short)?;
    t.listing("First-Fault Partial Result", partial.to_lanes());
    t.mask("First-Fault Register", ffr.bits(), ffr.lanes() as u32);
    t.listing("Loaded Before Fault", loaded_prefix(&partial, &ffr));
    t.note(format!("{} of {} lanes loaded before the fault.", ffr.count(), count));
    Ok(())
}

/// Lanes loaded before the first fault recorded in `ffr`.
#[inline]
pub fn loaded_prefix<T: model::Element>(vec: &ScalableVector<T>, ffr: &Predicate) -> Vec<T> {
    vec.as_slice()
        .iter()
        .enumerate()
        .take_while(|(lane, _)| ffr.is_active(*lane))
        .map(|(_, &v)| v)
        .collect()
}
