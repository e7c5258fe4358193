//! Instruction-set identification and runtime detection.
//!
//! Detection runs once per process and is cached. x86_64 uses
//! `is_x86_feature_detected!`, aarch64 uses `is_aarch64_feature_detected!`;
//! every other target reports an empty set.
//!
//! SVE and SVE2 are reported for information only: the scalable-vector
//! demonstrations execute on [`crate::arm::sve::model`] so they run on any host.

use crate::common::error::{Error, Result};
use bitflags::bitflags;
use once_cell::sync::Lazy;
use std::fmt;

/// A SIMD instruction-set extension covered by the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    /// Streaming SIMD Extensions (128-bit float)
    Sse,
    /// SSE2 (128-bit double and integer)
    Sse2,
    /// SSE3 (`lddqu`)
    Sse3,
    /// SSE4.1 (`movntdqa` streaming load)
    Sse41,
    /// Advanced Vector Extensions (256-bit float)
    Avx,
    /// AVX2 (256-bit integer, gathers)
    Avx2,
    /// AVX-512 Foundation (512-bit, mask registers)
    Avx512f,
    /// ARM Advanced SIMD (128-bit)
    Neon,
    /// ARM Scalable Vector Extension
    Sve,
    /// ARM Scalable Vector Extension 2
    Sve2,
}

impl Isa {
    /// Every instruction set, in presentation order.
    pub const ALL: [Isa; 10] = [
        Isa::Sse,
        Isa::Sse2,
        Isa::Sse3,
        Isa::Sse41,
        Isa::Avx,
        Isa::Avx2,
        Isa::Avx512f,
        Isa::Neon,
        Isa::Sve,
        Isa::Sve2,
    ];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Isa::Sse => "SSE",
            Isa::Sse2 => "SSE2",
            Isa::Sse3 => "SSE3",
            Isa::Sse41 => "SSE4.1",
            Isa::Avx => "AVX",
            Isa::Avx2 => "AVX2",
            Isa::Avx512f => "AVX-512F",
            Isa::Neon => "NEON",
            Isa::Sve => "SVE",
            Isa::Sve2 => "SVE2",
        }
    }

    /// Register width in bits, or `None` for the scalable extensions.
    pub const fn vector_bits(self) -> Option<u32> {
        match self {
            Isa::Sse | Isa::Sse2 | Isa::Sse3 | Isa::Sse41 | Isa::Neon => Some(128),
            Isa::Avx | Isa::Avx2 => Some(256),
            Isa::Avx512f => Some(512),
            Isa::Sve | Isa::Sve2 => None,
        }
    }

    /// Whether the demonstrations for this set run on the software model.
    pub const fn is_modelled(self) -> bool {
        matches!(self, Isa::Sve | Isa::Sve2)
    }

    /// The flag for this set inside an [`IsaSet`].
    pub const fn flag(self) -> IsaSet {
        match self {
            Isa::Sse => IsaSet::SSE,
            Isa::Sse2 => IsaSet::SSE2,
            Isa::Sse3 => IsaSet::SSE3,
            Isa::Sse41 => IsaSet::SSE41,
            Isa::Avx => IsaSet::AVX,
            Isa::Avx2 => IsaSet::AVX2,
            Isa::Avx512f => IsaSet::AVX512F,
            Isa::Neon => IsaSet::NEON,
            Isa::Sve => IsaSet::SVE,
            Isa::Sve2 => IsaSet::SVE2,
        }
    }

    /// Whether the host CPU implements this set.
    #[inline]
    pub fn is_available(self) -> bool {
        detected().contains(self.flag())
    }

    /// Whether a demonstration for this set can run here.
    ///
    /// Modelled sets always can; hardware sets need the CPU feature.
    #[inline]
    pub fn is_runnable(self) -> bool {
        self.is_modelled() || self.is_available()
    }

    /// Return [`Error::Unsupported`] unless the host CPU implements this set.
    #[inline]
    pub fn ensure(self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::Unsupported(self))
        }
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of instruction-set extensions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IsaSet: u16 {
        const SSE = 1 << 0;
        const SSE2 = 1 << 1;
        const SSE3 = 1 << 2;
        const SSE41 = 1 << 3;
        const AVX = 1 << 4;
        const AVX2 = 1 << 5;
        const AVX512F = 1 << 6;
        const NEON = 1 << 7;
        const SVE = 1 << 8;
        const SVE2 = 1 << 9;
    }
}

impl IsaSet {
    /// The members of this set, in presentation order.
    pub fn isas(self) -> impl Iterator<Item = Isa> {
        Isa::ALL.into_iter().filter(move |isa| self.contains(isa.flag()))
    }
}

impl fmt::Display for IsaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, isa) in self.isas().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(isa.name())?;
        }
        Ok(())
    }
}

static DETECTED: Lazy<IsaSet> = Lazy::new(|| {
    let set = detect();
    log::info!("Detected instruction sets: {}", set);
    set
});

/// Instruction sets implemented by the host CPU.
#[inline]
pub fn detected() -> IsaSet {
    *DETECTED
}

#[allow(unused_mut)]
fn detect() -> IsaSet {
    let mut set = IsaSet::empty();

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("sse") {
            set |= IsaSet::SSE;
        }
        if is_x86_feature_detected!("sse2") {
            set |= IsaSet::SSE2;
        }
        if is_x86_feature_detected!("sse3") {
            set |= IsaSet::SSE3;
        }
        if is_x86_feature_detected!("sse4.1") {
            set |= IsaSet::SSE41;
        }
        if is_x86_feature_detected!("avx") {
            set |= IsaSet::AVX;
        }
        if is_x86_feature_detected!("avx2") {
            set |= IsaSet::AVX2;
        }
        if is_x86_feature_detected!("avx512f") {
            set |= IsaSet::AVX512F;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            set |= IsaSet::NEON;
        }
        if std::arch::is_aarch64_feature_detected!("sve") {
            set |= IsaSet::SVE;
        }
        if std::arch::is_aarch64_feature_detected!("sve2") {
            set |= IsaSet::SVE2;
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_distinct() {
        let mut seen = IsaSet::empty();
        for isa in Isa::ALL {
            assert!(!seen.intersects(isa.flag()), "{} shares a flag", isa);
            seen |= isa.flag();
        }
        assert_eq!(seen, IsaSet::all());
    }

    #[test]
    fn test_display() {
        assert_eq!(Isa::Avx512f.to_string(), "AVX-512F");
        assert_eq!(IsaSet::empty().to_string(), "none");
        assert_eq!((IsaSet::SSE | IsaSet::AVX2).to_string(), "SSE AVX2");
    }

    #[test]
    fn test_modelled_sets_are_always_runnable() {
        assert!(Isa::Sve.is_runnable());
        assert!(Isa::Sve2.is_runnable());
        assert_eq!(Isa::Sve.vector_bits(), None);
    }

    #[test]
    fn test_ensure_matches_detection() {
        for isa in Isa::ALL {
            assert_eq!(isa.ensure().is_ok(), isa.is_available());
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_x86_baseline() {
        // SSE2 is part of the x86_64 baseline
        assert!(detected().contains(IsaSet::SSE | IsaSet::SSE2));
        assert!(!detected().contains(IsaSet::NEON));
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_aarch64_baseline() {
        assert!(Isa::Neon.is_available());
        assert!(!Isa::Sse2.is_available());
    }
}
