//! Tagged fixed-width scalar values.
//!
//! A [`ScalarValue`] pairs a [`Kind`] with a payload of exactly that kind's
//! width. Values are `Copy`, immutable, and produced either by [`convert`]
//! from an arbitrary-precision [`Literal`] or directly from a Rust primitive
//! via `From`.

mod convert;
mod display;
mod literal;

pub use convert::convert;
pub(crate) use convert::{integer_value, wrap_to_width};
pub use literal::Literal;

use half::f16;
use num_complex::{Complex32, Complex64};

use crate::category::Category;
use crate::config::ConvertMode;
use crate::error::Result;
use crate::kind::{Kind, KindDescriptor};
use crate::temporal::Ticks;

/// The fixed-width payload of a [`ScalarValue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float16(f16),
    Float32(f32),
    /// Also the carrier of `longdouble` values.
    Float64(f64),
    Complex64(Complex32),
    Complex128(Complex64),
    Datetime(Ticks),
    Timedelta(Ticks),
}

/// A kind together with a payload interpreted per that kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarValue {
    kind: Kind,
    payload: Payload,
}

impl ScalarValue {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Convert `source` to `kind`, wrapping or truncating silently.
    pub fn new(source: impl Into<Literal>, kind: Kind) -> Result<Self> {
        convert(&source.into(), kind, ConvertMode::Permissive)
    }

    /// Convert `source` to `kind`, failing on any change of value.
    pub fn exact(source: impl Into<Literal>, kind: Kind) -> Result<Self> {
        convert(&source.into(), kind, ConvertMode::Strict)
    }

    /// A `longdouble` value.
    #[inline]
    pub fn longdouble(value: f64) -> Self {
        Self {
            kind: Kind::LongDouble,
            payload: Payload::Float64(value),
        }
    }

    #[inline]
    pub fn datetime(ticks: Ticks) -> Self {
        Self {
            kind: Kind::Datetime64,
            payload: Payload::Datetime(ticks),
        }
    }

    #[inline]
    pub fn timedelta(ticks: Ticks) -> Self {
        Self {
            kind: Kind::Timedelta64,
            payload: Payload::Timedelta(ticks),
        }
    }

    /// Cast to another kind under `mode`.
    pub fn cast(self, kind: Kind, mode: ConvertMode) -> Result<Self> {
        if kind == self.kind {
            return Ok(self);
        }
        convert(&Literal::from(self), kind, mode)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn descriptor(&self) -> &'static KindDescriptor {
        self.kind.descriptor()
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    #[inline]
    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// The value of an integer or bool, widened to `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match self.payload {
            Payload::Bool(v) => Some(i128::from(v)),
            Payload::Int8(v) => Some(i128::from(v)),
            Payload::Int16(v) => Some(i128::from(v)),
            Payload::Int32(v) => Some(i128::from(v)),
            Payload::Int64(v) => Some(i128::from(v)),
            Payload::UInt8(v) => Some(i128::from(v)),
            Payload::UInt16(v) => Some(i128::from(v)),
            Payload::UInt32(v) => Some(i128::from(v)),
            Payload::UInt64(v) => Some(i128::from(v)),
            _ => None,
        }
    }

    /// The value of a real number (bool, integer or float) as `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self.payload {
            Payload::Float16(v) => Some(v.to_f64()),
            Payload::Float32(v) => Some(f64::from(v)),
            Payload::Float64(v) => Some(v),
            _ => self.as_i128().map(|v| v as f64),
        }
    }

    /// The value of any number as a double-precision complex.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self.payload {
            Payload::Complex64(c) => Some(Complex64::new(f64::from(c.re), f64::from(c.im))),
            Payload::Complex128(c) => Some(c),
            _ => self.as_f64().map(|re| Complex64::new(re, 0.0)),
        }
    }

    /// The tick count of a datetime or timedelta.
    pub fn as_ticks(&self) -> Option<Ticks> {
        match self.payload {
            Payload::Datetime(t) | Payload::Timedelta(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn is_nat(&self) -> bool {
        self.as_ticks().is_some_and(Ticks::is_nat)
    }

    pub fn is_nan(&self) -> bool {
        match self.payload {
            Payload::Float16(v) => v.is_nan(),
            Payload::Float32(v) => v.is_nan(),
            Payload::Float64(v) => v.is_nan(),
            Payload::Complex64(c) => c.re.is_nan() || c.im.is_nan(),
            Payload::Complex128(c) => c.re.is_nan() || c.im.is_nan(),
            _ => false,
        }
    }

    /// The raw bit pattern, zero-extended to 128 bits.
    ///
    /// Complex values place the real part in the low half.
    #[allow(clippy::cast_sign_loss)]
    pub fn to_bits(&self) -> u128 {
        match self.payload {
            Payload::Bool(v) => u128::from(v),
            Payload::Int8(v) => u128::from(v as u8),
            Payload::Int16(v) => u128::from(v as u16),
            Payload::Int32(v) => u128::from(v as u32),
            Payload::Int64(v) => u128::from(v as u64),
            Payload::UInt8(v) => u128::from(v),
            Payload::UInt16(v) => u128::from(v),
            Payload::UInt32(v) => u128::from(v),
            Payload::UInt64(v) => u128::from(v),
            Payload::Float16(v) => u128::from(v.to_bits()),
            Payload::Float32(v) => u128::from(v.to_bits()),
            Payload::Float64(v) => u128::from(v.to_bits()),
            Payload::Complex64(c) => {
                u128::from(c.re.to_bits()) | (u128::from(c.im.to_bits()) << 32)
            }
            Payload::Complex128(c) => {
                u128::from(c.re.to_bits()) | (u128::from(c.im.to_bits()) << 64)
            }
            Payload::Datetime(t) | Payload::Timedelta(t) => u128::from(t.value as u64),
        }
    }
}

macro_rules! impl_from_native {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl From<$ty> for ScalarValue {
            #[inline]
            fn from(v: $ty) -> Self {
                Self {
                    kind: Kind::$kind,
                    payload: Payload::$variant(v),
                }
            }
        }
    };
}

impl_from_native!(bool, Bool, Bool);
impl_from_native!(i8, Int8, Int8);
impl_from_native!(i16, Int16, Int16);
impl_from_native!(i32, Int32, Int32);
impl_from_native!(i64, Int64, Int64);
impl_from_native!(u8, UInt8, UInt8);
impl_from_native!(u16, UInt16, UInt16);
impl_from_native!(u32, UInt32, UInt32);
impl_from_native!(u64, UInt64, UInt64);
impl_from_native!(f16, Float16, Float16);
impl_from_native!(f32, Float32, Float32);
impl_from_native!(f64, Float64, Float64);
impl_from_native!(Complex32, Complex64, Complex64);
impl_from_native!(Complex64, Complex128, Complex128);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::temporal::TimeUnit;

    #[test]
    fn test_from_native_kinds() {
        assert_eq!(ScalarValue::from(1_u8).kind(), Kind::UInt8);
        assert_eq!(ScalarValue::from(1_i64).kind(), Kind::Int64);
        assert_eq!(ScalarValue::from(1.0_f32).kind(), Kind::Float32);
        assert_eq!(ScalarValue::from(Complex32::new(1.0, 2.0)).kind(), Kind::Complex64);
        assert_eq!(ScalarValue::longdouble(1.0).kind(), Kind::LongDouble);
    }

    #[test]
    fn test_to_bits() {
        assert_eq!(ScalarValue::from(-1_i8).to_bits(), 0xFF);
        assert_eq!(ScalarValue::from(-1_i32).to_bits(), 0xFFFF_FFFF);
        assert_eq!(ScalarValue::from(1.0_f64).to_bits(), 0x3FF0_0000_0000_0000);
        assert_eq!(ScalarValue::from(true).to_bits(), 1);
        let c = ScalarValue::from(Complex32::new(0.0, 1.0));
        assert_eq!(c.to_bits(), u128::from(1.0_f32.to_bits()) << 32);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ScalarValue::from(200_u8).as_i128(), Some(200));
        assert_eq!(ScalarValue::from(2.5_f32).as_f64(), Some(2.5));
        assert_eq!(ScalarValue::from(3_i16).as_f64(), Some(3.0));
        assert_eq!(ScalarValue::from(1.5_f64).as_i128(), None);
        assert_eq!(
            ScalarValue::from(4_i32).as_complex(),
            Some(Complex64::new(4.0, 0.0))
        );
    }

    #[test]
    fn test_temporal_accessors() {
        let dt = ScalarValue::datetime(Ticks::new(10, TimeUnit::Second));
        assert_eq!(dt.kind(), Kind::Datetime64);
        assert_eq!(dt.as_ticks(), Some(Ticks::new(10, TimeUnit::Second)));
        assert!(!dt.is_nat());
        assert!(ScalarValue::timedelta(Ticks::nat(TimeUnit::Day)).is_nat());
    }

    #[test]
    fn test_cast_same_kind_is_identity() {
        let v = ScalarValue::from(7_i32);
        assert_eq!(v.cast(Kind::Int32, ConvertMode::Strict).unwrap(), v);
    }

    #[test]
    fn test_cast_widens() {
        let v = ScalarValue::from(-7_i8).cast(Kind::Int64, ConvertMode::Strict).unwrap();
        assert_eq!(v, ScalarValue::from(-7_i64));
    }
}
