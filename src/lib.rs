//! simd-tour - A guided tour of SIMD load and store instructions
//!
//! Each demonstration exercises one family of vector memory instructions and
//! records what it did in a [`Transcript`]: the registers and memory it read
//! and wrote, lane by lane.
//!
//! # Instruction sets
//!
//! - **x86_64**: SSE through SSE4.1, AVX, AVX2 and AVX-512F, run on the host
//!   CPU through `std::arch` after runtime feature detection
//! - **aarch64**: NEON, run on the host CPU
//! - **SVE / SVE2**: run on a software model of scalable predicated vectors
//!   ([`arm::sve::model`]) with a configurable vector length, so they work on
//!   any host
//!
//! # Example - Running one demonstration
//!
//! ```
//! use simd_tour::{TourConfig, catalog};
//!
//! # fn main() -> simd_tour::Result<()> {
//! let config = TourConfig { sve_vector_bits: 256, ..TourConfig::default() };
//! let transcript = catalog::run("sve-vector-add", &config)?;
//! println!("{}", transcript);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Running everything the host supports
//!
//! ```no_run
//! use simd_tour::{TourConfig, catalog::{self, Outcome}};
//!
//! # fn main() -> simd_tour::Result<()> {
//! for report in catalog::run_selected(&TourConfig::default())? {
//!     if let Outcome::Completed(transcript) = report.outcome {
//!         println!("{}", transcript);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Using the SVE model directly
//!
//! ```
//! use simd_tour::arm::sve::model::{self, Predicate, VectorLength};
//!
//! # fn main() -> simd_tour::Result<()> {
//! let vl = VectorLength::new(256)?;
//! let pg = Predicate::whilelt(vl.cntw(), 0, 5);
//! let v = model::ld1(&pg, &[1i32, 2, 3, 4, 5])?;
//! assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5, 0, 0, 0]);
//! # Ok(())
//! # }
//! ```

/// Shared infrastructure: errors, configuration, feature detection, aligned
/// storage and transcripts.
pub mod common;

/// SSE, AVX, AVX2 and AVX-512 demonstrations.
pub mod x86;

/// NEON, SVE and SVE2 demonstrations.
pub mod arm;

/// Demonstration registry and runner.
pub mod catalog;

// Re-export commonly used types for convenience
pub use catalog::{Demo, Outcome, Report};
pub use common::{Error, Isa, IsaSet, Result, TourConfig, Transcript};
