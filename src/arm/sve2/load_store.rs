//! SVE2 load, store and predicated add.
//!
//! SVE2 uses the SVE instructions for these, so this is the SVE walkthrough
//! under an SVE2 banner.

use crate::arm::sve::load_store::walkthrough;
use crate::common::config::TourConfig;
use crate::common::error::Result;
use crate::common::features::Isa;
use crate::common::transcript::Transcript;

/// Run the demonstration.
pub fn run(config: &TourConfig) -> Result<Transcript> {
    walkthrough(Isa::Sve2, config.vector_length()?)
}
