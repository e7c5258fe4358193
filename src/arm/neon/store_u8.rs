//! NEON byte stores: contiguous, single lane, interleaving and
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

const TITLE: &str = "NEON uint8_t Store Instruction Examples";

/// Lane stored by the single-lane example.
#[cfg(target_arch = "aarch64")]
const STORED_LANE: i32 = 7;

/// Run the demonstration.
#[cfg(target_arch = "aarch64")]
pub fn run(_config: &TourConfig) -> Result<Transcript> {
    Isa::Neon.ensure()?;
    // SAFETY: NEON availability was checked above and every destination
    // covers the bytes the intrinsic writes
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
        t.heading("1. Basic Store (vst1q_u8)");
        let vec1 = vmovq_n_u8(42);
        let mut dest_array = A16([0u8; 16]);
        t.vector("Vector to store", spill_u8(vec1));
        vst1q_u8(dest_array.as_mut_ptr(), vec1);
        t.vector("Resulting array", &dest_array.0);
        t.note("// vst1_u8 would store only the 8 elements from a 64-bit vector.");

        t.heading("2. Store a Single Lane (vst1q_lane_u8)");
        // vcreate puts the least significant byte in lane 0
        let src = vcombine_u8(vcreate_u8(0x0102030405060708), vcreate_u8(0x090A0B0C0D0E0F10));
        t.vector("Source vector", spill_u8(src));
        let mut dest_lane: u8 = 0;
        vst1q_lane_u8::<STORED_LANE>(&mut dest_lane, src);
        t.note(format!("Storing lane {} into a variable.", STORED_LANE));
        t.array("Resulting value: ", [dest_lane]);

        t.heading("3. Interleaving Store (vst3q_u8)");
        t.note("Simulating storing separate R, G, B vectors into a single interleaved array.");
        let rgb = uint8x16x3_t(vmovq_n_u8(255), vmovq_n_u8(128), vmovq_n_u8(0));
        let mut interleaved = A16([0u8; 48]);
        t.note("Storing 3 separate vectors (R, G, B)...");
        vst3q_u8(interleaved.as_mut_ptr(), rgb);
        t.vector("Interleaved result (R1,G1,B1, R2,G2,B2, ...)", &interleaved.0);
        t.note("// vst2q_u8 and vst4q_u8 work similarly for 2 and 4 vectors.");

        t.heading("4. Multi-Vector Store (vst1q_u8_x2)");
        t.note("Storing two separate vectors into one contiguous array.");
        let two = uint8x16x2_t(vmovq_n_u8(1), vmovq_n_u8(2));
        let mut multi_dest = A16([0u8; 32]);
        vst1q_u8_x2(multi_dest.as_mut_ptr(), two);
        t.vector("Multi-vector store result", &multi_dest.0);
        t.note("// This is different from vst2q_u8, which interleaves data.");
        t.note("// vst1q_u8_x3 and vst1q_u8_x4 work similarly.");
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_stores() {
        use crate::common::lanes::Lanes;

        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(t.lanes("Resulting array").and_then(Lanes::as_u8), Some(&[42u8; 16][..]));

        let source = t.lanes("Source vector").and_then(Lanes::as_u8).unwrap();
        assert_eq!(&source[..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(t.lanes("Resulting value:").and_then(Lanes::as_u8), Some(&[1u8][..]));
        assert_eq!(source[STORED_LANE as usize], 1);
        assert!(t.mentions("Storing lane 7"));

        let interleaved = t
            .lanes("Interleaved result (R1,G1,B1, R2,G2,B2, ...)")
            .and_then(Lanes::as_u8)
            .unwrap();
        assert_eq!(interleaved.len(), 48);
        assert!(interleaved.chunks_exact(3).all(|px| px == [255, 128, 0]));

        let multi = t.lanes("Multi-vector store result").and_then(Lanes::as_u8).unwrap();
        assert!(multi[..16].iter().all(|&v| v == 1));
        assert!(multi[16..].iter().all(|&v| v == 2));
    }

    #[cfg(not(target_arch = "aarch64"))]
    #[test]
    fn test_unsupported_off_aarch64() {
        assert!(run(&TourConfig::default()).is_err());
    }
}
