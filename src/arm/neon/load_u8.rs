//! NEON byte loads: contiguous, duplicate, single lane, de-interleaving and
//! multi-register.

use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

#[cfg(target_arch = "aarch64")]
use super::spill_u8;
#[cfg(target_arch = "aarch64")]
use crate::common::aligned::A16;
#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

const TITLE: &str = "NEON uint8_t Load Instruction Examples";

/// Run the demonstration.
#[cfg(target_arch = "aarch64")]
pub fn run(_config: &TourConfig) -> Result<Transcript> {
    Isa::Neon.ensure()?;
    // SAFETY: NEON availability was checked above and every pointer below
    // covers the bytes the intrinsic reads
    Ok(unsafe { demo() })
}

/// NEON needs an aarch64 target.
#[cfg(not(target_arch = "aarch64"))]
pub fn run(_config: &TourConfig) -> Result<Transcript> {
    log::debug!("{} skipped: not an aarch64 target", TITLE);
    Err(crate::common::error::Error::Unsupported(Isa::Neon))
}

#[cfg(target_arch = "aarch64")]
unsafe fn demo() -> Transcript {
    let mut t = Transcript::new(TITLE);
    unsafe {
        t.heading("1. Basic Load (vld1q_u8)");
        let data_array = A16(std::array::from_fn::<u8, 16, _>(|i| i as u8));
        t.note("Original Data: An array from 0 to 15");
        let vec1 = vld1q_u8(data_array.as_ptr());
        t.vector("vld1q_u8 result", spill_u8(vec1));
        t.note("// vld1_u8 would load only the first 8 elements into a 64-bit vector.");

        t.heading("2. Load and Duplicate (vld1q_dup_u8)");
        let single_value: u8 = 42;
        t.note(format!("Original Value: {}", single_value));
        let vec_dup = vld1q_dup_u8(&single_value);
        t.vector("vld1q_dup_u8 result", spill_u8(vec_dup));

        t.heading("3. Load into a Single Lane (vld1q_lane_u8)");
        let value_to_insert: u8 = 99;
        let mut target = vdupq_n_u8(0);
        t.vector("Target vector (before)", spill_u8(target));
        t.note(format!("Value to insert: {} into lane 5", value_to_insert));
        target = vld1q_lane_u8::<5>(&value_to_insert, target);
        t.vector("Target vector (after)", spill_u8(target));

        t.heading("4. De-interleaving Load (vld3q_u8)");
        t.note("Simulating loading 16 RGB pixels (R1,G1,B1, R2,G2,B2, ...)");
        let mut rgb_data = A16([0u8; 48]);
        for (i, pixel) in rgb_data.chunks_exact_mut(3).enumerate() {
            let base = (i * 10) as u8;
            pixel.copy_from_slice(&[base, base + 1, base + 2]);
        }
        let rgb = vld3q_u8(rgb_data.as_ptr());
        t.note("// vld3q_u8 separates the data into R, G, and B vectors:");
        t.vector("RGB vectors[0]", spill_u8(rgb.0));
        t.vector("RGB vectors[1]", spill_u8(rgb.1));
        t.vector("RGB vectors[2]", spill_u8(rgb.2));
        t.note("// vld2q_u8 and vld4q_u8 work similarly for 2 and 4 channels.");

        t.heading("5. Multi-Vector Load (vld1q_u8_x2)");
        t.note("Loading two separate, contiguous vectors from one array.");
        let two_vectors_data = A16(std::array::from_fn::<u8, 32, _>(|i| i as u8));
        let two = vld1q_u8_x2(two_vectors_data.as_ptr());
        t.vector("Two vectors[0]", spill_u8(two.0));
        t.vector("Two vectors[1]", spill_u8(two.1));
        t.note("// This is different from vld2q_u8, which de-interleaves data.");
        t.note("// vld1q_u8_x3 and vld1q_u8_x4 work similarly.");
    }

    t.heading("6. Note on Combined Concepts");
    t.note("The patterns can be combined. For example:");
    t.note(" - vld3_dup_u8: Loads 3 values and creates 3 vectors, each duplicating one value.");
    t.note(" - vld4_lane_u8: Loads 4 values and inserts them into a specific lane of 4 existing vectors.");
    t.note("Understanding the basic patterns allows you to infer how these combined instructions work.");
    t
}
