//! Aligned storage for vector loads and stores.
//!
//! Stack arrays get their alignment from the `A16`/`A32`/`A64` wrappers. Heap
//! buffers come from [`AlignedBuf`], which pairs the aligned allocation with
//! its release through `Drop`, so the deallocation always uses the layout the
//! allocation was made with.

use crate::common::error::{Error, Result};
use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use zerocopy::FromZeros;

macro_rules! aligned_wrapper {
    ($($name:ident => $align:literal),* $(,)?) => {
        $(
            #[doc = concat!("Value stored on a ", stringify!($align), "-byte boundary.")]
            #[repr(C, align($align))]
            #[derive(Debug, Clone, Copy, Default, PartialEq)]
            pub struct $name<T>(pub T);

            impl<T> Deref for $name<T> {
                type Target = T;

                #[inline]
                fn deref(&self) -> &T {
                    &self.0
                }
            }

            impl<T> DerefMut for $name<T> {
                #[inline]
                fn deref_mut(&mut self) -> &mut T {
                    &mut self.0
                }
            }
        )*
    };
}

aligned_wrapper!(A16 => 16, A32 => 32, A64 => 64);

/// Return [`Error::Misaligned`] unless `ptr` sits on an `align`-byte boundary.
#[inline]
pub fn ensure_aligned<T>(ptr: *const T, align: usize) -> Result<()> {
    let addr = ptr as usize;
    if align.is_power_of_two() && addr % align == 0 {
        Ok(())
    } else {
        Err(Error::Misaligned { addr, align })
    }
}

/// Zero-initialised heap buffer with a caller-chosen alignment.
///
/// The `FromZeros` bound restricts `T` to types for which the all-zero bit
/// pattern is a valid value.
pub struct AlignedBuf<T: Copy + FromZeros> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    _marker: PhantomData<T>,
}

impl<T: Copy + FromZeros> AlignedBuf<T> {
    /// Allocate `len` zeroed elements aligned to `align` bytes.
    ///
    /// The effective alignment is at least `align_of::<T>()`.
    pub fn zeroed(len: usize, align: usize) -> Result<Self> {
        let align = align.max(std::mem::align_of::<T>());
        let size = std::mem::size_of::<T>()
            .checked_mul(len)
            .ok_or(Error::Allocation { size: usize::MAX, align })?;
        // Zero-sized requests still get one element so the pointer is real
        let layout = Layout::from_size_align(size.max(std::mem::size_of::<T>()).max(1), align)?;

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw as *mut T).ok_or(Error::Allocation { size, align })?;

        log::trace!("Allocated {} bytes aligned to {}", layout.size(), layout.align());
        Ok(Self {
            ptr,
            len,
            layout,
            _marker: PhantomData,
        })
    }

    /// Allocate an aligned copy of `values`.
    pub fn from_slice(values: &[T], align: usize) -> Result<Self> {
        let mut buf = Self::zeroed(values.len(), align)?;
        buf.copy_from_slice(values);
        Ok(buf)
    }

    /// Alignment the buffer was allocated with.
    #[inline]
    pub fn align(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T: Copy + FromZeros> Deref for AlignedBuf<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        // SAFETY: ptr is valid for len zeroed elements, and T: FromZeros makes zero a valid T
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy + FromZeros> DerefMut for AlignedBuf<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: ptr is valid for len elements and uniquely borrowed
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy + FromZeros> Drop for AlignedBuf<T> {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated with exactly this layout
        unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
    }
}

impl<T: Copy + FromZeros + std::fmt::Debug> std::fmt::Debug for AlignedBuf<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuf")
            .field("align", &self.align())
            .field("data", &&**self)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_wrappers_are_aligned() {
        let a = A16([0f32; 4]);
        let b = A32([0f64; 4]);
        let c = A64([0i32; 16]);
        assert!(ensure_aligned(a.as_ptr(), 16).is_ok());
        assert!(ensure_aligned(b.as_ptr(), 32).is_ok());
        assert!(ensure_aligned(c.as_ptr(), 64).is_ok());
        assert_eq!(std::mem::align_of::<A64<[i32; 16]>>(), 64);
    }

    #[test]
    fn test_misaligned_pointer_is_reported() {
        let a = A16([0f32; 5]);
        let err = ensure_aligned(a[1..].as_ptr(), 16).unwrap_err();
        assert!(matches!(err, Error::Misaligned { align: 16, .. }));
    }

    #[test]
    fn test_heap_buffer_alignment_and_contents() {
        for align in [16, 32, 64, 128] {
            let mut buf = AlignedBuf::<f32>::zeroed(16, align).unwrap();
            assert_eq!(buf.len(), 16);
            assert!(buf.iter().all(|&v| v == 0.0));
            assert!(ensure_aligned(buf.as_ptr(), align).is_ok());
            buf[3] = 4.0;
            assert_eq!(buf[3], 4.0);
        }
    }

    #[test]
    fn test_from_slice_copies() {
        let buf = AlignedBuf::from_slice(&[1i32, 2, 3], 32).unwrap();
        assert_eq!(&*buf, &[1, 2, 3]);
        assert_eq!(buf.align(), 32);
    }

    #[test]
    fn test_invalid_alignment() {
        let err = AlignedBuf::<u8>::zeroed(8, 24).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }

    #[test]
    fn test_scalar_element_types() {
        fn zeroed_is_default<T: Copy + FromZeros + Default + PartialEq + std::fmt::Debug>() {
            let buf = AlignedBuf::<T>::zeroed(8, 32).unwrap();
            assert!(buf.iter().all(|v| *v == T::default()));
            assert!(ensure_aligned(buf.as_ptr(), 32).is_ok());
        }
        zeroed_is_default::<f32>();
        zeroed_is_default::<f64>();
        zeroed_is_default::<i32>();
        zeroed_is_default::<u32>();
        zeroed_is_default::<i16>();
        zeroed_is_default::<u8>();
        zeroed_is_default::<i64>();
    }

    #[test]
    fn test_empty_buffer() {
        let buf = AlignedBuf::<f64>::zeroed(0, 64).unwrap();
        assert!(buf.is_empty());
        assert!(ensure_aligned(buf.as_ptr(), 64).is_ok());
    }
}
