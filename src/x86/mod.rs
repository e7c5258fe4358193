//! x86_64 demonstrations: SSE, AVX, AVX2 and AVX-512 loads and stores.
//!
//! Every demonstration checks its instruction set at runtime with
//! [`Isa::ensure`](crate::common::Isa::ensure) before entering a
//! `#[target_feature]` function. On other architectures each one reports
//! [`Error::Unsupported`](crate::common::Error::Unsupported).

/// Define `run` for a demonstration whose body lives in `demo`, an
/// `unsafe fn() -> Result<Transcript>` compiled with the features of `$isa`.
macro_rules! x86_demo {
    ($isa:expr) => {
        /// Run the demonstration.
        #[cfg(target_arch = "x86_64")]
        pub fn run(
            _config: &crate::common::config::TourConfig,
        ) -> crate::common::error::Result<crate::common::transcript::Transcript> {
            $isa.ensure()?;
            // SAFETY: the instruction set was detected above
            unsafe { demo() }
        }

        /// x86 instruction sets need an x86_64 target.
        #[cfg(not(target_arch = "x86_64"))]
        pub fn run(
            _config: &crate::common::config::TourConfig,
        ) -> crate::common::error::Result<crate::common::transcript::Transcript> {
            Err(crate::common::error::Error::Unsupported($isa))
        }
    };
}

#[cfg(target_arch = "x86_64")]
pub mod lanes;

pub mod avx;
pub mod avx2;
pub mod avx512;
pub mod sse;
