//! NEON float load and store, then a vector add of a broadcast constant.

use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

#[cfg(target_arch = "aarch64")]
use super::spill_f32;
#[cfg(target_arch = "aarch64")]
use crate::common::aligned::A16;
#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

const TITLE: &str = "NEON Memory Load and Store";

/// Run the demonstration.
#[cfg(target_arch = "aarch64")]
pub fn run(_config: &TourConfig) -> Result<Transcript> {
    Isa::Neon.ensure()?;
    // SAFETY: NEON availability was checked above; all arrays hold 4 floats
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
        t.heading("Basic Load and Store");
        let input_data = A16([1.1f32, 2.2, 3.3, 4.4]);
        t.listing("Original data ", &input_data.0);

        let neon_vector = vld1q_f32(input_data.as_ptr());
        let mut output_data = A16([0f32; 4]);
        vst1q_f32(output_data.as_mut_ptr(), neon_vector);
        t.listing("Stored data   ", &output_data.0);

        t.heading("Modifying data with SIMD");
        let mut numbers = A16([10.0f32, 20.0, 30.0, 40.0]);
        t.listing("Initial numbers ", &numbers.0);

        let constants_to_add = vdupq_n_f32(5.5);
        let sum = vaddq_f32(vld1q_f32(numbers.as_ptr()), constants_to_add);
        t.register("Sum register", spill_f32(sum));
        vst1q_f32(numbers.as_mut_ptr(), sum);
        t.listing("Modified numbers", &numbers.0);
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_round_trip_and_add() {
        use crate::common::lanes::Lanes;

        let t = run(&TourConfig::default()).unwrap();
        assert_eq!(
            t.lanes("Stored data").and_then(Lanes::as_f32),
            Some(&[1.1f32, 2.2, 3.3, 4.4][..])
        );
        assert_eq!(
            t.lanes("Modified numbers").and_then(Lanes::as_f32),
            Some(&[15.5f32, 25.5, 35.5, 45.5][..])
        );
    }

    #[cfg(not(target_arch = "aarch64"))]
    #[test]
    fn test_unsupported_off_aarch64() {
        assert!(run(&TourConfig::default()).is_err());
    }
}
