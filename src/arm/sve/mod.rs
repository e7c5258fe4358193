//! SVE (Scalable Vector Extension) demonstrations.
//!
//! SVE registers are 128 to 2048 bits wide, chosen by the implementation; code
//! asks for the lane count at runtime (`svcntw`) and governs every operation
//! with a predicate. The demonstrations here run on [`model`], with the
//! vector length taken from [`TourConfig::sve_vector_bits`](crate::common::TourConfig).

pub mod load_s32;
pub mod load_store;
pub mod model;
pub mod store_u32;
pub mod vector_add;

use crate::common::features::Isa;
use crate::common::transcript::Transcript;
use model::VectorLength;

/// Start a transcript for a modelled demonstration and note the model settings.
pub(crate) fn modelled_transcript(title: &str, isa: Isa, vl: VectorLength) -> Transcript {
    let mut t = Transcript::new(title);
    t.note(format!(
        "Modelled {} with a {}-bit vector length ({} on this CPU: {}).",
        isa,
        vl.bits(),
        isa,
        if isa.is_available() { "yes" } else { "no" }
    ));
    t
}
