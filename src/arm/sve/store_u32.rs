//! SVE unsigned 32-bit stores: contiguous, scatter by byte offset and by
//! index, interleaving and non-temporal.

use super::model::{self, Predicate, VectorLength};
use super::modelled_transcript;
use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    let vl = config.vector_length()?;
    let mut t = modelled_transcript("SVE uint32_t Store Instructions", Isa::Sve, vl);
    t.note(format!("SVE vector width for uint32_t is {} elements.", vl.cntw()));

    consecutive_store(vl, &mut t)?;
    scatter_store_offset(vl, &mut t)?;
    scatter_store_index(vl, &mut t)?;
    multi_vector_store(vl, &mut t)?;
    non_temporal_store(vl, &mut t)?;
    Ok(t)
}

fn consecutive_store(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Consecutive Store (svst1_u32)");
    let count = vl.cntw();
    let data: Vec<u32> = (10..).take(count).collect();
    t.listing("Vector to Store", &data);

    let pg = Predicate::all::<u32>(vl);
    let vec = model::ld1(&pg, &data)?;

    let mut destination = vec![0u32; count];
    model::st1(&pg, &mut destination, &vec)?;
    t.listing("Stored Data    ", &destination);
    Ok(())
}

fn scatter_store_offset(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Scatter Store with Offsets (svst1_scatter_u32offset_u32)");
    let count = vl.cntw();
    let data: Vec<u32> = (100..).take(count).collect();
    let offset_vals: Vec<u32> = (0..count as u32).map(|i| i * 2).collect();
    t.listing("Vector to Store", &data);
    t.listing("Offsets        ", &offset_vals);

    let pg = Predicate::all::<u32>(vl);
    let data_vec = model::ld1(&pg, &data)?;
    let offsets = model::ld1(&pg, &offset_vals)?;

    // Byte offsets 2 apart overlap: each lane overwrites the upper half of the previous one
    let mut destination = vec![0u32; count * 2];
    model::st1_scatter_offset(&pg, &mut destination, &offsets, &data_vec)?;
    t.listing("Scattered Data ", &destination);
    Ok(())
}

fn scatter_store_index(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Scatter Store with Indices (svst1_scatter_u32index_u32)");
    let count = vl.cntw();
    let data: Vec<u32> = (200..).take(count).collect();
    let index_vals: Vec<u32> = (0..count as u32).map(|i| i * 2 + 1).collect();
    t.listing("Vector to Store", &data);
    t.listing("Indices        ", &index_vals);

    let pg = Predicate::all::<u32>(vl);
    let data_vec = model::ld1(&pg, &data)?;
    let indices = model::ld1(&pg, &index_vals)?;

    let mut destination = vec![0u32; count * 2];
    model::st1_scatter_index(&pg, &mut destination, &indices, &data_vec)?;
    t.listing("Scattered Data ", &destination);
    Ok(())
}

fn multi_vector_store(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Multi-vector Store for Interleaving (svst2_u32)");
    let count = vl.cntw();
    let data0: Vec<u32> = (300..).take(count).collect();
    let data1: Vec<u32> = (400..).take(count).collect();
    t.listing("Vector 0 to Store", &data0);
    t.listing("Vector 1 to Store", &data1);

    let pg = Predicate::all::<u32>(vl);
    let pair = (model::ld1(&pg, &data0)?, model::ld1(&pg, &data1)?);

    let mut destination = vec![0u32; count * 2];
    model::st2(&pg, &mut destination, &pair)?;
    t.listing("Interleaved Data ", &destination);
    Ok(())
}

fn non_temporal_store(vl: VectorLength, t: &mut Transcript) -> Result<()> {
    t.heading("Non-Temporal Store (svstnt1_u32)");
    let count = vl.cntw();
    let data: Vec<u32> = (500..).take(count).collect();
    t.listing("Vector to Store", &data);

    let pg = Predicate::all::<u32>(vl);
    let vec = model::ld1(&pg, &data)?;

    let mut destination = vec![0u32; count];
    model::stnt1(&pg, &mut destination, &vec)?;
    t.listing("Stored Data    ", &destination);
    Ok(())
}
