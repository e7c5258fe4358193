//! Lane values and their textual form.
//!
//! Lane values are printed the way a C++ `std::ostream` prints them with default
//! flags: floats use six significant digits with trailing zeros removed
//! (`%g`), integers are decimal, and `u8` lanes print as numbers rather than
//! characters. Floats go through `ryu`, integers through `itoa`.
//!
//! # Examples
//!
//! ```
//! use simd_tour::common::lanes::Lanes;
//!
//! let lanes = Lanes::from([1.1f32, 2.2, 3.3000002, 4.0]);
//! assert_eq!(lanes.joined(" "), "1.1 2.2 3.3 4");
//! ```

use smallvec::SmallVec;
use std::fmt;

/// Inline capacity for lane storage; covers every fixed-width register.
pub const INLINE_LANES: usize = 16;

/// Significant digits used for float lanes.
const FLOAT_PRECISION: i32 = 6;

/// Storage for the lanes of one register or array.
pub type LaneVec<T> = SmallVec<[T; INLINE_LANES]>;

/// A scalar type that can occupy a SIMD lane.
pub trait LaneValue: Copy + PartialEq + fmt::Debug + 'static {
    /// Append the textual form of this value to `buf`.
    fn write_lane(self, buf: &mut String);

    /// Wrap owned lane values in the matching [`Lanes`] variant.
    fn wrap(values: LaneVec<Self>) -> Lanes;
}

/// Lane values tagged by element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Lanes {
    F32(LaneVec<f32>),
    F64(LaneVec<f64>),
    I64(LaneVec<i64>),
    I32(LaneVec<i32>),
    U32(LaneVec<u32>),
    I16(LaneVec<i16>),
    U8(LaneVec<u8>),
}

macro_rules! impl_int_lane {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl LaneValue for $ty {
                #[inline]
                fn write_lane(self, buf: &mut String) {
                    let mut buffer = itoa::Buffer::new();
                    buf.push_str(buffer.format(self));
                }

                #[inline]
                fn wrap(values: LaneVec<Self>) -> Lanes {
                    Lanes::$variant(values)
                }
            }
        )*
    };
}

impl_int_lane!(i64 => I64, i32 => I32, u32 => U32, i16 => I16, u8 => U8);

impl LaneValue for f32 {
    #[inline]
    fn write_lane(self, buf: &mut String) {
        write_float(buf, self as f64);
    }

    #[inline]
    fn wrap(values: LaneVec<Self>) -> Lanes {
        Lanes::F32(values)
    }
}

impl LaneValue for f64 {
    #[inline]
    fn write_lane(self, buf: &mut String) {
        write_float(buf, self);
    }

    #[inline]
    fn wrap(values: LaneVec<Self>) -> Lanes {
        Lanes::F64(values)
    }
}

/// Write a float with `%g` semantics (six significant digits).
///
/// ```
/// let mut buf = String::new();
/// simd_tour::common::lanes::write_float(&mut buf, 2.5);
/// assert_eq!(buf, "2.5");
/// ```
pub fn write_float(buf: &mut String, value: f64) {
    if value.is_nan() {
        buf.push_str("nan");
        return;
    }
    if value.is_infinite() {
        buf.push_str(if value < 0.0 { "-inf" } else { "inf" });
        return;
    }
    if value == 0.0 {
        buf.push_str(if value.is_sign_negative() { "-0" } else { "0" });
        return;
    }

    let rounded = round_significant(value, FLOAT_PRECISION);
    let exponent = rounded.abs().log10().floor() as i32;

    if exponent < -4 || exponent >= FLOAT_PRECISION {
        // Scientific form: mantissa, then e+XX / e-XX with at least two digits
        let mantissa = round_significant(rounded / 10f64.powi(exponent), FLOAT_PRECISION);
        write_fixed(buf, mantissa, FLOAT_PRECISION - 1);
        buf.push('e');
        buf.push(if exponent < 0 { '-' } else { '+' });
        let magnitude = exponent.unsigned_abs();
        if magnitude < 10 {
            buf.push('0');
        }
        let mut buffer = itoa::Buffer::new();
        buf.push_str(buffer.format(magnitude));
    } else {
        write_fixed(buf, rounded, FLOAT_PRECISION - 1 - exponent);
    }
}

#[inline]
fn round_significant(value: f64, digits: i32) -> f64 {
    let exponent = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - exponent);
    (value * factor).round() / factor
}

fn write_fixed(buf: &mut String, value: f64, decimals: i32) {
    let factor = 10f64.powi(decimals.max(0));
    let value = (value * factor).round() / factor;

    // Whole numbers skip ryu's trailing ".0"
    if value.fract() == 0.0 && value.abs() < 1e15 {
        let mut buffer = itoa::Buffer::new();
        buf.push_str(buffer.format(value as i64));
        return;
    }

    let mut buffer = ryu::Buffer::new();
    let s = buffer.format_finite(value);
    if s.contains('.') && !s.contains('e') {
        buf.push_str(s.trim_end_matches('0').trim_end_matches('.'));
    } else {
        buf.push_str(s);
    }
}

macro_rules! typed_view {
    ($($name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("The lanes as `", stringify!($ty), "` values, if that is their type.")]
            #[inline]
            pub fn $name(&self) -> Option<&[$ty]> {
                match self {
                    Lanes::$variant(values) => Some(values.as_slice()),
                    _ => None,
                }
            }
        )*
    };
}

impl Lanes {
    typed_view!(
        as_f32 => F32: f32,
        as_f64 => F64: f64,
        as_i64 => I64: i64,
        as_i32 => I32: i32,
        as_u32 => U32: u32,
        as_i16 => I16: i16,
        as_u8 => U8: u8,
    );

    /// Number of lanes.
    pub fn len(&self) -> usize {
        match self {
            Lanes::F32(v) => v.len(),
            Lanes::F64(v) => v.len(),
            Lanes::I64(v) => v.len(),
            Lanes::I32(v) => v.len(),
            Lanes::U32(v) => v.len(),
            Lanes::I16(v) => v.len(),
            Lanes::U8(v) => v.len(),
        }
    }

    /// Whether there are no lanes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the element type, as used in intrinsic names.
    pub fn element_name(&self) -> &'static str {
        match self {
            Lanes::F32(_) => "f32",
            Lanes::F64(_) => "f64",
            Lanes::I64(_) => "s64",
            Lanes::I32(_) => "s32",
            Lanes::U32(_) => "u32",
            Lanes::I16(_) => "s16",
            Lanes::U8(_) => "u8",
        }
    }

    /// Append every lane to `buf`, separated by `sep`.
    pub fn write_joined(&self, buf: &mut String, sep: &str) {
        fn join<T: LaneValue>(values: &[T], buf: &mut String, sep: &str) {
            for (i, &v) in values.iter().enumerate() {
                if i > 0 {
                    buf.push_str(sep);
                }
                v.write_lane(buf);
            }
        }

        match self {
            Lanes::F32(v) => join(v, buf, sep),
            Lanes::F64(v) => join(v, buf, sep),
            Lanes::I64(v) => join(v, buf, sep),
            Lanes::I32(v) => join(v, buf, sep),
            Lanes::U32(v) => join(v, buf, sep),
            Lanes::I16(v) => join(v, buf, sep),
            Lanes::U8(v) => join(v, buf, sep),
        }
    }

    /// Every lane joined by `sep` into a new string.
    pub fn joined(&self, sep: &str) -> String {
        let mut buf = String::with_capacity(self.len() * 4);
        self.write_joined(&mut buf, sep);
        buf
    }
}

impl<T: LaneValue> From<&[T]> for Lanes {
    fn from(values: &[T]) -> Self {
        T::wrap(SmallVec::from_slice(values))
    }
}

impl<T: LaneValue> From<&Vec<T>> for Lanes {
    fn from(values: &Vec<T>) -> Self {
        T::wrap(SmallVec::from_slice(values))
    }
}

impl<T: LaneValue> From<Vec<T>> for Lanes {
    fn from(values: Vec<T>) -> Self {
        T::wrap(SmallVec::from_vec(values))
    }
}

impl<T: LaneValue, const N: usize> From<[T; N]> for Lanes {
    fn from(values: [T; N]) -> Self {
        T::wrap(values.into_iter().collect())
    }
}

impl<T: LaneValue, const N: usize> From<&[T; N]> for Lanes {
    fn from(values: &[T; N]) -> Self {
        T::wrap(SmallVec::from_slice(values))
    }
}
