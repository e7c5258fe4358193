//! The list of demonstrations and the code that runs them.
//!
//! Names are stable identifiers used by the runner and by
//! [`TourConfig::demos`](crate::common::TourConfig).

use crate::arm::{neon, sve, sve2};
use crate::common::config::TourConfig;
use crate::common::error::{Error, Result};
use crate::common::features::Isa;
use crate::common::transcript::Transcript;
use crate::x86::{avx, avx2, avx512, sse};

/// Entry point of one demonstration.
pub type DemoFn = fn(&TourConfig) -> Result<Transcript>;

/// One runnable demonstration.
#[derive(Debug, Clone, Copy)]
pub struct Demo {
    /// Stable identifier, e.g. `sse-load`
    pub name: &'static str,
    /// Instruction set the demonstration exercises
    pub isa: Isa,
    /// One-line description
    pub summary: &'static str,
    pub run: DemoFn,
}

impl Demo {
    /// Whether this demonstration can run on the current host.
    #[inline]
    pub fn is_runnable(&self) -> bool {
        self.isa.is_runnable()
    }
}

macro_rules! demos {
    ($($name:literal, $isa:ident, $run:path, $summary:literal;)*) => {
        [$(Demo { name: $name, isa: Isa::$isa, summary: $summary, run: $run },)*]
    };
}

static CATALOG: [Demo; 20] = demos![
    "sse-load", Sse41, sse::load::run,
        "SSE aligned, unaligned, broadcast, scalar, partial, reversed and streaming loads";
    "sse-store", Sse2, sse::store::run,
        "SSE aligned, unaligned, scalar, partial, masked and streaming stores";
    "sse-load-store", Sse, sse::round_trip::run,
        "SSE round trip through 16-byte aligned heap buffers";
    "avx-memory", Avx, avx::memory::run,
        "AVX loads and stores, broadcasts, masked and streaming stores";
    "avx-load-store", Avx, avx::round_trip::run,
        "AVX round trip through 32-byte aligned heap buffers";
    "avx2-memory", Avx2, avx2::memory::run,
        "AVX2 gathers and integer masked load/store";
    "avx512-memory", Avx512f, avx512::memory::run,
        "AVX-512 mask registers, gather/scatter and compress/expand";
    "avx512-load-store", Avx512f, avx512::round_trip::run,
        "AVX-512 round trip through 64-byte aligned heap buffers";
    "neon-load-u8", Neon, neon::load_u8::run,
        "NEON byte loads: contiguous, duplicate, lane, de-interleaving, multi-register";
    "neon-store-u8", Neon, neon::store_u8::run,
        "NEON byte stores: contiguous, lane, interleaving, multi-register";
    "neon-load-store", Neon, neon::load_store::run,
        "NEON float load/store and broadcast add";
    "neon-vector-add", Neon, neon::vector_add::run,
        "NEON array addition with a scalar tail";
    "sve-load-s32", Sve, sve::load_s32::run,
        "SVE contiguous, gather, de-interleaving, first-fault, non-fault and non-temporal loads";
    "sve-store-u32", Sve, sve::store_u32::run,
        "SVE contiguous, scatter, interleaving and non-temporal stores";
    "sve-load-store", Sve, sve::load_store::run,
        "SVE predicated float load/store and add";
    "sve-vector-add", Sve, sve::vector_add::run,
        "SVE vector-length-agnostic array addition";
    "sve2-nt-gather", Sve2, sve2::gather_nt::run,
        "SVE2 non-temporal gathers, including sign-extending";
    "sve2-nt-scatter", Sve2, sve2::scatter_nt::run,
        "SVE2 non-temporal scatters, including truncating";
    "sve2-load-store", Sve2, sve2::load_store::run,
        "SVE2 predicated float load/store and add";
    "sve2-complex-add", Sve2, sve2::complex_add::run,
        "SVE2 complex addition, plain and with rotation";
];

/// Every demonstration, grouped by instruction set.
pub fn catalog() -> &'static [Demo] {
    &CATALOG
}

/// Look a demonstration up by name.
pub fn find(name: &str) -> Option<&'static Demo> {
    CATALOG.iter().find(|demo| demo.name == name)
}

/// Run one demonstration by name.
pub fn run(name: &str, config: &TourConfig) -> Result<Transcript> {
    let demo = find(name).ok_or_else(|| Error::UnknownDemo(name.to_string()))?;
    log::debug!("Running {} ({})", demo.name, demo.isa);
    (demo.run)(config)
}

/// What happened to one demonstration in [`run_selected`].
#[derive(Debug)]
pub enum Outcome {
    Completed(Transcript),
    /// The instruction set is unavailable and the config allows skipping
    Skipped(Isa),
    Failed(Error),
}

impl Outcome {
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// A demonstration and its outcome.
#[derive(Debug)]
pub struct Report {
    pub demo: &'static Demo,
    pub outcome: Outcome,
}

/// Run the demonstrations named in `config.demos`, or the whole catalog
/// when that list is empty.
///
/// Every name is resolved before anything runs, so an unknown name fails the
/// call without side effects. After that each demonstration gets a
/// [`Report`]; unsupported instruction sets become [`Outcome::Skipped`] when
/// `config.skip_unsupported` is set and [`Outcome::Failed`] otherwise.
pub fn run_selected(config: &TourConfig) -> Result<Vec<Report>> {
    let selected: Vec<&'static Demo> = if config.demos.is_empty() {
        CATALOG.iter().collect()
    } else {
        config
            .demos
            .iter()
            .map(|name| find(name).ok_or_else(|| Error::UnknownDemo(name.clone())))
            .collect::<Result<_>>()?
    };

    let mut reports = Vec::with_capacity(selected.len());
    for demo in selected {
        log::debug!("Running {} ({})", demo.name, demo.isa);
        let outcome = match (demo.run)(config) {
            Ok(transcript) => Outcome::Completed(transcript),
            Err(Error::Unsupported(isa)) if config.skip_unsupported => {
                log::warn!("Skipping {}: {} is not available on this CPU", demo.name, isa);
                Outcome::Skipped(isa)
            },
            Err(e) => {
                log::error!("{} failed: {}", demo.name, e);
                Outcome::Failed(e)
            },
        };
        reports.push(Report { demo, outcome });
    }
    Ok(reports)
}
