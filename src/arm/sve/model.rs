//! Software model of SVE/SVE2 predicated vectors.
//!
//! Stable Rust exposes no SVE intrinsics, so the scalable-vector half of the
//! tour runs on this model instead. It reproduces the architectural behaviour
//! the demonstrations rely on:
//!
//! - the vector length is a runtime value ([`VectorLength`], 128 to 2048 bits)
//! - every operation is governed by a [`Predicate`]; inactive lanes are never
//!   read from or written to memory and come back as zero
//! - memory is byte addressed, so gathers and scatters with byte offsets that
//!   are not multiples of the element size read and write straddling
//!   elements exactly as the hardware would
//! - accesses that would fault on hardware return [`Error::OutOfBounds`],
//!   except for the first-fault and non-fault loads, which record the fault
//!   in the returned first-fault register instead
//!
//! Scatter writes are applied in ascending lane order, so when two active
//! lanes overlap the higher lane wins.

use crate::common::error::{Error, Result};
use crate::common::lanes::{LaneValue, LaneVec, Lanes};
use smallvec::SmallVec;
use std::mem::size_of;
use std::ops::{Add, Sub};
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Scalar type that can be loaded from or stored to modelled memory.
pub trait Memory: Copy + FromBytes + IntoBytes + Immutable {}

impl<T> Memory for T where T: Copy + FromBytes + IntoBytes + Immutable {}

/// Scalar type that can occupy a modelled vector lane.
pub trait Element: Memory + LaneValue + Default {}

impl<T> Element for T where T: Memory + LaneValue + Default {}

/// Narrowing conversion used by truncating stores (`st1h`, `st1b`, ...).
pub trait Truncate<M> {
    fn truncate(self) -> M;
}

macro_rules! impl_truncate {
    ($($from:ty => $($to:ty),+);* $(;)?) => {
        $($(
            impl Truncate<$to> for $from {
                #[inline]
                fn truncate(self) -> $to {
                    self as $to
                }
            }
        )+)*
    };
}

impl_truncate!(
    i64 => i32, i16, i8;
    i32 => i16, i8;
    u32 => u16, u8;
    i16 => i8;
);

/// SVE vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorLength {
    bits: u32,
}

impl VectorLength {
    /// Smallest architectural vector length.
    pub const MIN_BITS: u32 = 128;
    /// Largest architectural vector length.
    pub const MAX_BITS: u32 = 2048;
    /// Vector lengths are multiples of this granule.
    pub const GRANULE_BITS: u32 = 128;

    /// The smallest vector length; every SVE implementation supports it.
    pub const MIN: VectorLength = VectorLength {
        bits: Self::MIN_BITS,
    };

    /// Validate a vector length in bits.
    pub fn new(bits: u32) -> Result<Self> {
        if (Self::MIN_BITS..=Self::MAX_BITS).contains(&bits) && bits % Self::GRANULE_BITS == 0 {
            Ok(Self { bits })
        } else {
            Err(Error::InvalidVectorLength(bits))
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Number of 8-bit lanes (`svcntb`).
    #[inline]
    pub const fn cntb(self) -> usize {
        (self.bits / 8) as usize
    }

    /// Number of 16-bit lanes (`svcnth`).
    #[inline]
    pub const fn cnth(self) -> usize {
        self.cntb() / 2
    }

    /// Number of 32-bit lanes (`svcntw`).
    #[inline]
    pub const fn cntw(self) -> usize {
        self.cntb() / 4
    }

    /// Number of 64-bit lanes (`svcntd`).
    #[inline]
    pub const fn cntd(self) -> usize {
        self.cntb() / 8
    }

    /// Number of lanes of type `T`.
    #[inline]
    pub const fn lanes<T>(self) -> usize {
        self.cntb() / size_of::<T>()
    }
}

impl Default for VectorLength {
    fn default() -> Self {
        Self::MIN
    }
}

/// Per-lane activity mask (`svbool_t`) for one element width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    active: SmallVec<[bool; 16]>,
}

impl Predicate {
    /// All `lanes` lanes active.
    pub fn ptrue(lanes: usize) -> Self {
        Self {
            active: SmallVec::from_elem(true, lanes),
        }
    }

    /// All lanes inactive.
    pub fn pfalse(lanes: usize) -> Self {
        Self {
            active: SmallVec::from_elem(false, lanes),
        }
    }

    /// All lanes of type `T` active (`svptrue_b8/16/32/64`).
    pub fn all<T>(vl: VectorLength) -> Self {
        Self::ptrue(vl.lanes::<T>())
    }

    /// Lane `i` active while `start + i < end` (`svwhilelt`).
    pub fn whilelt(lanes: usize, start: i64, end: i64) -> Self {
        Self {
            active: (0..lanes).map(|i| start.saturating_add(i as i64) < end).collect(),
        }
    }

    /// Build from explicit lane states.
    pub fn from_lanes(active: impl IntoIterator<Item = bool>) -> Self {
        Self {
            active: active.into_iter().collect(),
        }
    }

    /// Build from a bit mask, lane 0 in bit 0; lanes past bit 63 are inactive.
    pub fn from_bits(lanes: usize, bits: u64) -> Self {
        Self {
            active: (0..lanes).map(|i| i < 64 && (bits >> i) & 1 == 1).collect(),
        }
    }

    #[inline]
    pub fn lanes(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_active(&self, lane: usize) -> bool {
        self.active.get(lane).copied().unwrap_or(false)
    }

    /// Number of active lanes (`svcntp`).
    pub fn count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Whether the first lane is active (`svptest_first` under an all-true governor).
    #[inline]
    pub fn first(&self) -> bool {
        self.is_active(0)
    }

    /// Whether any lane is active (`svptest_any`).
    pub fn any(&self) -> bool {
        self.active.iter().any(|&a| a)
    }

    /// Lane-wise AND.
    pub fn and(&self, other: &Predicate) -> Predicate {
        Self {
            active: self
                .active
                .iter()
                .enumerate()
                .map(|(i, &a)| a && other.is_active(i))
                .collect(),
        }
    }

    /// The first 64 lanes as bits, lane 0 in bit 0.
    pub fn bits(&self) -> u64 {
        self.active
            .iter()
            .take(64)
            .enumerate()
            .fold(0, |acc, (i, &a)| if a { acc | 1u64 << i } else { acc })
    }

    fn active_lanes(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().enumerate().filter(|(_, a)| **a).map(|(i, _)| i)
    }
}

/// A scalable vector register holding lanes of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalableVector<T: Element> {
    lanes: LaneVec<T>,
}

impl<T: Element> ScalableVector<T> {
    /// Every lane zero.
    pub fn zero(lanes: usize) -> Self {
        Self::dup(lanes, T::default())
    }

    /// Every lane `value` (`svdup_n`).
    pub fn dup(lanes: usize, value: T) -> Self {
        Self {
            lanes: SmallVec::from_elem(value, lanes),
        }
    }

    /// Lane `i` is `f(i)`.
    pub fn from_fn(lanes: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            lanes: (0..lanes).map(f).collect(),
        }
    }

    /// Copy of `values`, one lane each.
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            lanes: SmallVec::from_slice(values),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    #[inline]
    pub fn get(&self, lane: usize) -> Option<T> {
        self.lanes.get(lane).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    /// Copy of the lanes for display.
    pub fn to_lanes(&self) -> Lanes {
        Lanes::from(self.as_slice())
    }
}

/// A pair of vectors (`svint32x2_t` and friends).
pub type VectorPair<T> = (ScalableVector<T>, ScalableVector<T>);

/// Rotation applied to the second operand of a complex add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// `b * i`: `(a.re - b.im, a.im + b.re)`
    Deg90,
    /// `b * -i`: `(a.re + b.im, a.im - b.re)`
    Deg270,
}

// ============================================================================
// Byte-addressed memory access
// ============================================================================

fn out_of_bounds<M>(offset: i64, len: usize) -> Error {
    Error::OutOfBounds {
        offset,
        width: size_of::<M>(),
        len,
    }
}

fn byte_range<M>(offset: i64, len: usize) -> Result<std::ops::Range<usize>> {
    let start = usize::try_from(offset).map_err(|_| out_of_bounds::<M>(offset, len))?;
    let end = start
        .checked_add(size_of::<M>())
        .filter(|&end| end <= len)
        .ok_or_else(|| out_of_bounds::<M>(offset, len))?;
    Ok(start..end)
}

/// Read one `M` at byte `offset` of `base`.
fn read_at<M: Memory>(base: &[u8], offset: i64) -> Result<M> {
    let range = byte_range::<M>(offset, base.len())?;
    M::read_from_bytes(&base[range]).map_err(|_| out_of_bounds::<M>(offset, base.len()))
}

/// Write one `M` at byte `offset` of `base`.
fn write_at<M: Memory>(base: &mut [u8], offset: i64, value: M) -> Result<()> {
    let range = byte_range::<M>(offset, base.len())?;
    base[range].copy_from_slice(value.as_bytes());
    Ok(())
}

fn ensure_lanes(pg: &Predicate, lanes: usize) -> Result<()> {
    if pg.lanes() == lanes {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            expected: pg.lanes(),
            got: lanes,
        })
    }
}

#[inline]
fn element_offset<T>(lane: usize) -> i64 {
    (lane * size_of::<T>()) as i64
}

// ============================================================================
// Contiguous loads and stores
// ============================================================================

/// Contiguous load (`svld1`): lane `i` reads `base[i]`.
pub fn ld1<T: Element>(pg: &Predicate, base: &[T]) -> Result<ScalableVector<T>> {
    let bytes = base.as_bytes();
    let mut out = ScalableVector::zero(pg.lanes());
    for lane in pg.active_lanes() {
        out.lanes[lane] = read_at(bytes, element_offset::<T>(lane))?;
    }
    Ok(out)
}

/// Non-temporal contiguous load (`svldnt1`); same result as [`ld1`].
pub fn ldnt1<T: Element>(pg: &Predicate, base: &[T]) -> Result<ScalableVector<T>> {
    ld1(pg, base)
}

/// First-fault contiguous load (`svldff1`).
///
/// A fault on the first active lane is reported as an error. A fault on any
/// later lane is suppressed: that lane and every lane after it are zeroed and
/// cleared in the returned first-fault register.
pub fn ldff1<T: Element>(pg: &Predicate, base: &[T]) -> Result<(ScalableVector<T>, Predicate)> {
    let bytes = base.as_bytes();
    let mut out = ScalableVector::zero(pg.lanes());
    let mut ffr = Predicate::ptrue(pg.lanes());
    let mut first = true;

    for lane in pg.active_lanes() {
        match read_at(bytes, element_offset::<T>(lane)) {
            Ok(value) => out.lanes[lane] = value,
            Err(e) if first => return Err(e),
            Err(_) => {
                ffr.active[lane..].fill(false);
                break;
            },
        }
        first = false;
    }
    Ok((out, ffr))
}

/// Non-fault contiguous load (`svldnf1`).
///
/// Never fails: the first faulting lane and every lane after it are zeroed
/// and cleared in the returned first-fault register.
pub fn ldnf1<T: Element>(pg: &Predicate, base: &[T]) -> (ScalableVector<T>, Predicate) {
    let bytes = base.as_bytes();
    let mut out = ScalableVector::zero(pg.lanes());
    let mut ffr = Predicate::ptrue(pg.lanes());

    for lane in pg.active_lanes() {
        match read_at(bytes, element_offset::<T>(lane)) {
            Ok(value) => out.lanes[lane] = value,
            Err(_) => {
                ffr.active[lane..].fill(false);
                break;
            },
        }
    }
    (out, ffr)
}

/// Contiguous store (`svst1`): active lane `i` writes `base[i]`.
pub fn st1<T: Element>(pg: &Predicate, base: &mut [T], data: &ScalableVector<T>) -> Result<()> {
    ensure_lanes(pg, data.len())?;
    let bytes = base.as_mut_bytes();
    for lane in pg.active_lanes() {
        write_at(bytes, element_offset::<T>(lane), data.lanes[lane])?;
    }
    Ok(())
}

/// Non-temporal contiguous store (`svstnt1`); same effect as [`st1`].
pub fn stnt1<T: Element>(pg: &Predicate, base: &mut [T], data: &ScalableVector<T>) -> Result<()> {
    st1(pg, base, data)
}

/// De-interleaving load of two vectors (`svld2`).
pub fn ld2<T: Element>(pg: &Predicate, base: &[T]) -> Result<VectorPair<T>> {
    let bytes = base.as_bytes();
    let mut first = ScalableVector::zero(pg.lanes());
    let mut second = ScalableVector::zero(pg.lanes());
    for lane in pg.active_lanes() {
        first.lanes[lane] = read_at(bytes, element_offset::<T>(2 * lane))?;
        second.lanes[lane] = read_at(bytes, element_offset::<T>(2 * lane + 1))?;
    }
    Ok((first, second))
}

/// Interleaving store of two vectors (`svst2`).
pub fn st2<T: Element>(pg: &Predicate, base: &mut [T], data: &VectorPair<T>) -> Result<()> {
    ensure_lanes(pg, data.0.len())?;
    ensure_lanes(pg, data.1.len())?;
    let bytes = base.as_mut_bytes();
    for lane in pg.active_lanes() {
        write_at(bytes, element_offset::<T>(2 * lane), data.0.lanes[lane])?;
        write_at(bytes, element_offset::<T>(2 * lane + 1), data.1.lanes[lane])?;
    }
    Ok(())
}

// ============================================================================
// Gathers and scatters
// ============================================================================

/// Gather with byte offsets (`svld1_gather_[su]32offset`).
pub fn ld1_gather_offset<T, O>(
    pg: &Predicate,
    base: &[T],
    offsets: &ScalableVector<O>,
) -> Result<ScalableVector<T>>
where
    T: Element,
    O: Element + Into<i64>,
{
    ld1_gather_offset_extend::<T, T, O>(pg, base, offsets)
}

/// Gather with element indices (`svld1_gather_[su]32index`); indices are scaled
/// by the element size.
pub fn ld1_gather_index<T, O>(
    pg: &Predicate,
    base: &[T],
    indices: &ScalableVector<O>,
) -> Result<ScalableVector<T>>
where
    T: Element,
    O: Element + Into<i64>,
{
    ensure_lanes(pg, indices.len())?;
    let bytes = base.as_bytes();
    let mut out = ScalableVector::zero(pg.lanes());
    for lane in pg.active_lanes() {
        let offset = indices.lanes[lane].into().saturating_mul(size_of::<T>() as i64);
        out.lanes[lane] = read_at(bytes, offset)?;
    }
    Ok(out)
}

/// Gather narrower memory elements with byte offsets and widen each one
/// (`svld1sh_gather`, `svldnt1sh_gather`, ...). Signed sources sign-extend,
/// unsigned sources zero-extend.
pub fn ld1_gather_offset_extend<M, T, O>(
    pg: &Predicate,
    base: &[M],
    offsets: &ScalableVector<O>,
) -> Result<ScalableVector<T>>
where
    M: Memory,
    T: Element + From<M>,
    O: Element + Into<i64>,
{
    ensure_lanes(pg, offsets.len())?;
    let bytes = base.as_bytes();
    let mut out = ScalableVector::zero(pg.lanes());
    for lane in pg.active_lanes() {
        let narrow: M = read_at(bytes, offsets.lanes[lane].into())?;
        out.lanes[lane] = T::from(narrow);
    }
    Ok(out)
}

/// Scatter with byte offsets (`svst1_scatter_[su]32offset`).
pub fn st1_scatter_offset<T, O>(
    pg: &Predicate,
    base: &mut [T],
    offsets: &ScalableVector<O>,
    data: &ScalableVector<T>,
) -> Result<()>
where
    T: Element,
    O: Element + Into<i64>,
{
    scatter_with(pg, base, offsets, data, |offset| offset, |value| value)
}

/// Scatter with element indices (`svst1_scatter_[su]32index`).
pub fn st1_scatter_index<T, O>(
    pg: &Predicate,
    base: &mut [T],
    indices: &ScalableVector<O>,
    data: &ScalableVector<T>,
) -> Result<()>
where
    T: Element,
    O: Element + Into<i64>,
{
    let scale = size_of::<T>() as i64;
    scatter_with(pg, base, indices, data, |index| index.saturating_mul(scale), |value| value)
}

/// Scatter with byte offsets, truncating each lane to the memory element
/// type (`svst1h_scatter`, `svstnt1h_scatter`, ...).
pub fn st1_scatter_offset_truncate<T, M, O>(
    pg: &Predicate,
    base: &mut [M],
    offsets: &ScalableVector<O>,
    data: &ScalableVector<T>,
) -> Result<()>
where
    T: Element + Truncate<M>,
    M: Memory,
    O: Element + Into<i64>,
{
    scatter_with(pg, base, offsets, data, |offset| offset, <T as Truncate<M>>::truncate)
}

fn scatter_with<T, M, O>(
    pg: &Predicate,
    base: &mut [M],
    offsets: &ScalableVector<O>,
    data: &ScalableVector<T>,
    address: impl Fn(i64) -> i64,
    narrow: impl Fn(T) -> M,
) -> Result<()>
where
    T: Element,
    M: Memory,
    O: Element + Into<i64>,
{
    ensure_lanes(pg, offsets.len())?;
    ensure_lanes(pg, data.len())?;
    let bytes = base.as_mut_bytes();
    for lane in pg.active_lanes() {
        let offset = address(offsets.lanes[lane].into());
        write_at(bytes, offset, narrow(data.lanes[lane]))?;
    }
    Ok(())
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Predicated add, inactive lanes zeroed (`svadd_z`).
pub fn add_z<T>(pg: &Predicate, a: &ScalableVector<T>, b: &ScalableVector<T>) -> ScalableVector<T>
where
    T: Element + Add<Output = T>,
{
    ScalableVector::from_fn(pg.lanes(), |lane| match (pg.is_active(lane), a.get(lane), b.get(lane)) {
        (true, Some(x), Some(y)) => x + y,
        _ => T::default(),
    })
}

/// Predicated add, inactive lanes unspecified (`svadd_x`).
///
/// The model leaves inactive lanes holding the first operand.
pub fn add_x<T>(pg: &Predicate, a: &ScalableVector<T>, b: &ScalableVector<T>) -> ScalableVector<T>
where
    T: Element + Add<Output = T>,
{
    ScalableVector::from_fn(pg.lanes(), |lane| {
        let x = a.get(lane).unwrap_or_default();
        match (pg.is_active(lane), b.get(lane)) {
            (true, Some(y)) => x + y,
            _ => x,
        }
    })
}

/// Complex add with rotation (`svcadd`), on vectors of interleaved
/// `(re, im)` pairs. Inactive lanes keep the first operand.
pub fn cadd<T>(
    pg: &Predicate,
    a: &ScalableVector<T>,
    b: &ScalableVector<T>,
    rotation: Rotation,
) -> ScalableVector<T>
where
    T: Element + Add<Output = T> + Sub<Output = T>,
{
    ScalableVector::from_fn(pg.lanes(), |lane| {
        let x = a.get(lane).unwrap_or_default();
        if !pg.is_active(lane) {
            return x;
        }
        let pair = lane & !1;
        let b_re = b.get(pair).unwrap_or_default();
        let b_im = b.get(pair + 1).unwrap_or_default();
        match (lane % 2 == 0, rotation) {
            (true, Rotation::Deg90) => x - b_im,
            (false, Rotation::Deg90) => x + b_re,
            (true, Rotation::Deg270) => x + b_im,
            (false, Rotation::Deg270) => x - b_re,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vl(bits: u32) -> VectorLength {
        VectorLength::new(bits).unwrap()
    }

    #[test]
    fn test_vector_length_validation() {
        assert!(VectorLength::new(128).is_ok());
        assert!(VectorLength::new(2048).is_ok());
        assert!(VectorLength::new(384).is_ok());
        assert!(matches!(VectorLength::new(64), Err(Error::InvalidVectorLength(64))));
        assert!(VectorLength::new(200).is_err());
        assert!(VectorLength::new(4096).is_err());
    }

    #[test]
    fn test_lane_counts() {
        let v = vl(256);
        assert_eq!(v.cntb(), 32);
        assert_eq!(v.cnth(), 16);
        assert_eq!(v.cntw(), 8);
        assert_eq!(v.cntd(), 4);
        assert_eq!(v.lanes::<f32>(), 8);
        assert_eq!(v.lanes::<u8>(), 32);
    }

    #[test]
    fn test_whilelt() {
        let pg = Predicate::whilelt(4, 6, 8);
        assert_eq!(pg.bits(), 0b0011);
        assert!(pg.first());
        assert_eq!(pg.count(), 2);
        assert!(!Predicate::whilelt(4, 8, 8).first());
    }

    #[test]
    fn test_predicate_from_bits() {
        let pg = Predicate::from_bits(6, 0b101001);
        assert_eq!(pg.count(), 3);
        assert!(pg.first());
        assert!(!pg.is_active(1));
        assert!(pg.is_active(5));
        assert_eq!(pg.bits(), 0b101001);
        assert_eq!(ScalableVector::from_slice(&[1u32, 2]).as_slice(), &[1, 2]);
    }

    #[test]
    fn test_ld1_skips_inactive_lanes() {
        // Only lane 0 is active, so the short buffer is never over-read
        let pg = Predicate::from_lanes([true, false, false, false]);
        let v = ld1(&pg, &[7i32]).unwrap();
        assert_eq!(v.as_slice(), &[7, 0, 0, 0]);
    }

    #[test]
    fn test_ld1_out_of_bounds() {
        let pg = Predicate::ptrue(4);
        let err = ld1(&pg, &[1i32, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 12, width: 4, len: 12 }));
    }

    #[test]
    fn test_first_fault_load() {
        let pg = Predicate::ptrue(4);
        let (v, ffr) = ldff1(&pg, &[1i32, 2]).unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 0, 0]);
        assert_eq!(ffr.bits(), 0b0011);

        // A fault on the first active lane is not suppressed
        assert!(ldff1::<i32>(&pg, &[]).is_err());
    }

    #[test]
    fn test_first_fault_skips_inactive_leading_lanes() {
        // Lane 0 is inactive, so lane 1 is the first active lane and its fault is reported
        let pg = Predicate::from_lanes([false, true, true, true]);
        let err = ldff1(&pg, &[1i32]).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 4, width: 4, len: 4 }));

        // With lane 1 in bounds, the fault on lane 2 is suppressed
        let (v, ffr) = ldff1(&pg, &[1i32, 2]).unwrap();
        assert_eq!(v.as_slice(), &[0, 2, 0, 0]);
        assert_eq!(ffr.bits(), 0b0011);
    }

    #[test]
    fn test_non_fault_load() {
        let pg = Predicate::ptrue(4);
        let (v, ffr) = ldnf1::<i32>(&pg, &[]);
        assert_eq!(v.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(ffr.bits(), 0);

        let (v, ffr) = ldnf1(&pg, &[5i32, 6, 7, 8]);
        assert_eq!(v.as_slice(), &[5, 6, 7, 8]);
        assert_eq!(ffr.bits(), 0b1111);
    }

    #[test]
    fn test_non_fault_load_stops_mid_vector() {
        let pg = Predicate::ptrue(4);
        let (v, ffr) = ldnf1(&pg, &[5i32, 6]);
        assert_eq!(v.as_slice(), &[5, 6, 0, 0]);
        assert_eq!(ffr.bits(), 0b0011);
        assert!(ffr.is_active(1));
        assert!(!ffr.is_active(2));
    }

    #[test]
    fn test_gather_byte_offsets_straddle_elements() {
        let pg = Predicate::ptrue(4);
        let data: Vec<i32> = (100..108).collect();
        let offsets = ScalableVector::from_fn(4, |i| (i * 2) as i32);
        let v = ld1_gather_offset(&pg, &data, &offsets).unwrap();
        // Offset 2 reads the upper half of 100 and the lower half of 101
        assert_eq!(v.as_slice(), &[100, 101 << 16, 101, 102 << 16]);
    }

    #[test]
    fn test_gather_negative_offset_faults() {
        let pg = Predicate::ptrue(4);
        let offsets = ScalableVector::from_fn(4, |i| i as i32 - 1);
        let err = ld1_gather_offset(&pg, &[0i32; 8], &offsets).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: -1, .. }));
    }

    #[test]
    fn test_extending_gather() {
        let pg = Predicate::ptrue(4);
        let data: Vec<i16> = (-50..-42).collect();
        let offsets = ScalableVector::from_fn(4, |i| (i * 2) as u32);
        let v: ScalableVector<i32> = ld1_gather_offset_extend(&pg, &data, &offsets).unwrap();
        assert_eq!(v.as_slice(), &[-50, -49, -48, -47]);
    }

    #[test]
    fn test_scatter_overlap_higher_lane_wins() {
        let pg = Predicate::ptrue(2);
        let offsets = ScalableVector::from_fn(2, |_| 0u32);
        let data = ScalableVector::from_fn(2, |i| i as u32 + 1);
        let mut dest = [0u32; 2];
        st1_scatter_offset(&pg, &mut dest, &offsets, &data).unwrap();
        assert_eq!(dest, [2, 0]);
    }

    #[test]
    fn test_truncating_scatter() {
        let pg = Predicate::ptrue(4);
        let offsets = ScalableVector::from_fn(4, |i| (i * 2) as u32);
        let data = ScalableVector::from_fn(4, |i| 0x1_0000 + i as i32);
        let mut dest = [-1i16; 4];
        st1_scatter_offset_truncate(&pg, &mut dest, &offsets, &data).unwrap();
        assert_eq!(dest, [0, 1, 2, 3]);
    }

    #[test]
    fn test_ld2_st2() {
        let pg = Predicate::ptrue(4);
        let interleaved = [1u32, 10, 2, 20, 3, 30, 4, 40];
        let pair = ld2(&pg, &interleaved).unwrap();
        assert_eq!(pair.0.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(pair.1.as_slice(), &[10, 20, 30, 40]);

        let mut back = [0u32; 8];
        st2(&pg, &mut back, &pair).unwrap();
        assert_eq!(back, interleaved);
    }

    #[test]
    fn test_st1_lane_mismatch() {
        let pg = Predicate::ptrue(4);
        let data = ScalableVector::<f32>::zero(8);
        let mut dest = [0f32; 8];
        assert!(matches!(
            st1(&pg, &mut dest, &data),
            Err(Error::LengthMismatch { expected: 4, got: 8 })
        ));
    }

    #[test]
    fn test_add_variants() {
        let pg = Predicate::from_lanes([true, false, true, false]);
        let a = ScalableVector::from_fn(4, |i| i as f32);
        let b = ScalableVector::dup(4, 10.0f32);
        assert_eq!(add_z(&pg, &a, &b).as_slice(), &[10.0, 0.0, 12.0, 0.0]);
        assert_eq!(add_x(&pg, &a, &b).as_slice(), &[10.0, 1.0, 12.0, 3.0]);
    }

    #[test]
    fn test_cadd_rotations() {
        let pg = Predicate::ptrue(2);
        let a = ScalableVector::from_fn(2, |i| [1.0f32, 2.0][i]);
        let b = ScalableVector::from_fn(2, |i| [3.0f32, 4.0][i]);
        // (1 + 2i) + i(3 + 4i) = (1 - 4) + (2 + 3)i
        assert_eq!(cadd(&pg, &a, &b, Rotation::Deg90).as_slice(), &[-3.0, 5.0]);
        // (1 + 2i) - i(3 + 4i) = (1 + 4) + (2 - 3)i
        assert_eq!(cadd(&pg, &a, &b, Rotation::Deg270).as_slice(), &[5.0, -1.0]);
    }

    proptest! {
        #[test]
        fn prop_whilelt_counts(start in 0i64..100, end in 0i64..100, lanes in 1usize..64) {
            let pg = Predicate::whilelt(lanes, start, end);
            let expected = (end - start).clamp(0, lanes as i64) as usize;
            prop_assert_eq!(pg.count(), expected);
        }

        #[test]
        fn prop_index_gather_matches_slice_indexing(
            data in proptest::collection::vec(any::<i32>(), 16),
            indices in proptest::collection::vec(0u32..16, 4),
        ) {
            let pg = Predicate::ptrue(4);
            let idx = ScalableVector::from_fn(4, |i| indices[i]);
            let v = ld1_gather_index(&pg, &data, &idx).unwrap();
            for lane in 0..4 {
                prop_assert_eq!(v.get(lane), Some(data[indices[lane] as usize]));
            }
        }

        #[test]
        fn prop_scatter_then_gather_by_distinct_index(
            values in proptest::collection::vec(any::<u32>(), 4),
            perm in Just([3u32, 0, 2, 1]),
        ) {
            let pg = Predicate::ptrue(4);
            let idx = ScalableVector::from_fn(4, |i| perm[i]);
            let data = ScalableVector::from_fn(4, |i| values[i]);
            let mut memory = [0u32; 4];
            st1_scatter_index(&pg, &mut memory, &idx, &data).unwrap();
            let back = ld1_gather_index(&pg, &memory, &idx).unwrap();
            prop_assert_eq!(back, data);
        }
    }
}
