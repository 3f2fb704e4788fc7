//! Conversion of literals into fixed-width values.
//!
//! | target      | from int             | from float           | from complex | from temporal |
//! |-------------|----------------------|----------------------|--------------|---------------|
//! | bool        | `!= 0`               | `!= 0.0`             | `!= 0`       | n/a           |
//! | integer     | wrap mod 2^width     | truncate, then wrap  | real part    | tick count    |
//! | float       | round to nearest     | round to nearest     | real part    | tick count    |
//! | complex     | `(x, 0)`             | `(x, 0)`             | round parts  | n/a           |
//! | datetime    | generic-unit ticks   | n/a                  | n/a          | datetime only |
//! | timedelta   | generic-unit ticks   | n/a                  | n/a          | timedelta only|
//!
//! In [`ConvertMode::Strict`] every cell that changes the value fails with
//! `PrecisionLoss` instead.

use half::f16;
use num_bigint::BigInt;
use num_complex::{Complex32, Complex64};
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use crate::category::Category;
use crate::config::ConvertMode;
use crate::error::{NumkindError, Result};
use crate::kind::Kind;
use crate::temporal::{Ticks, TimeUnit};

use super::{Literal, ScalarValue};

/// Convert `source` to a value of kind `target`.
///
/// ```
/// use numkind_core::config::ConvertMode;
/// use numkind_core::value::{convert, Literal, ScalarValue};
/// use numkind_core::Kind;
///
/// let wrapped = convert(&Literal::from(300), Kind::UInt8, ConvertMode::Permissive).unwrap();
/// assert_eq!(wrapped, ScalarValue::from(44_u8));
/// assert!(convert(&Literal::from(300), Kind::UInt8, ConvertMode::Strict).is_err());
/// ```
pub fn convert(source: &Literal, target: Kind, mode: ConvertMode) -> Result<ScalarValue> {
    let converter = Converter {
        source,
        target,
        strict: mode == ConvertMode::Strict,
    };
    match target.category() {
        Category::Boolean => converter.to_bool(),
        Category::SignedInt | Category::UnsignedInt => converter.to_integer(),
        Category::Float => converter.to_float(),
        Category::Complex => converter.to_complex(),
        Category::Datetime | Category::Timedelta => converter.to_temporal(),
        Category::Character | Category::Object => Err(NumkindError::UnsupportedKind {
            kind: target,
            operation: "value conversion",
        }),
    }
}

/// Wrap `value` into the range of integer kind `kind`, two's complement.
pub(crate) fn wrap_to_width(value: &BigInt, kind: Kind) -> BigInt {
    let modulus = BigInt::one() << kind.width_bits();
    let mut wrapped = value.mod_floor(&modulus);
    if kind.is_signed() && wrapped >= (&modulus >> 1_u32) {
        wrapped -= modulus;
    }
    wrapped
}

/// Build a value of integer kind `kind` from an in-range `value`.
pub(crate) fn integer_value(value: &BigInt, kind: Kind) -> Option<ScalarValue> {
    let v = match kind {
        Kind::Int8 => ScalarValue::from(value.to_i8()?),
        Kind::Int16 => ScalarValue::from(value.to_i16()?),
        Kind::Int32 => ScalarValue::from(value.to_i32()?),
        Kind::Int64 => ScalarValue::from(value.to_i64()?),
        Kind::UInt8 => ScalarValue::from(value.to_u8()?),
        Kind::UInt16 => ScalarValue::from(value.to_u16()?),
        Kind::UInt32 => ScalarValue::from(value.to_u32()?),
        Kind::UInt64 => ScalarValue::from(value.to_u64()?),
        _ => return None,
    };
    Some(v)
}

/// Round an `f64` to float kind `kind`.
pub(crate) fn float_value(value: f64, kind: Kind) -> ScalarValue {
    #[allow(clippy::cast_possible_truncation)]
    match kind {
        Kind::Float16 => ScalarValue::from(f16::from_f64(value)),
        Kind::Float32 => ScalarValue::from(value as f32),
        Kind::LongDouble => ScalarValue::longdouble(value),
        _ => ScalarValue::from(value),
    }
}

struct Converter<'a> {
    source: &'a Literal,
    target: Kind,
    strict: bool,
}

impl Converter<'_> {
    fn precision_loss(&self) -> NumkindError {
        NumkindError::PrecisionLoss {
            value: self.source.to_string(),
            target: self.target,
        }
    }

    fn mismatch(&self, from: Kind) -> NumkindError {
        NumkindError::KindMismatch {
            left: from,
            right: self.target,
        }
    }

    /// Fail in strict mode when `changed` holds.
    fn check(&self, changed: bool) -> Result<()> {
        if self.strict && changed {
            Err(self.precision_loss())
        } else {
            Ok(())
        }
    }

    fn to_bool(&self) -> Result<ScalarValue> {
        let (truth, exact) = match self.source {
            Literal::Bool(b) => (*b, true),
            Literal::Int(i) => (!i.is_zero(), i.is_zero() || i.is_one()),
            Literal::Float(x) => (*x != 0.0, *x == 0.0 || *x == 1.0),
            Literal::Complex(c) => (!c.is_zero(), c.im == 0.0 && (c.re == 0.0 || c.re == 1.0)),
            Literal::Datetime(_) => return Err(self.mismatch(Kind::Datetime64)),
            Literal::Timedelta(_) => return Err(self.mismatch(Kind::Timedelta64)),
        };
        self.check(!exact)?;
        Ok(ScalarValue::from(truth))
    }

    fn to_integer(&self) -> Result<ScalarValue> {
        let exact = match self.source {
            Literal::Bool(b) => BigInt::from(u8::from(*b)),
            Literal::Int(i) => i.clone(),
            Literal::Float(x) => self.truncate(*x)?,
            Literal::Complex(c) => {
                self.check(c.im != 0.0)?;
                self.truncate(c.re)?
            }
            Literal::Datetime(t) | Literal::Timedelta(t) => BigInt::from(t.value),
        };
        if let Some(v) = integer_value(&exact, self.target) {
            return Ok(v);
        }
        self.check(true)?;
        let wrapped = wrap_to_width(&exact, self.target);
        integer_value(&wrapped, self.target).ok_or_else(|| self.precision_loss())
    }

    /// Truncate toward zero. Non-finite inputs become 0.
    fn truncate(&self, x: f64) -> Result<BigInt> {
        if !x.is_finite() {
            self.check(true)?;
            return Ok(BigInt::zero());
        }
        self.check(x.fract() != 0.0)?;
        BigInt::from_f64(x.trunc()).ok_or_else(|| self.precision_loss())
    }

    #[allow(clippy::cast_precision_loss)]
    fn to_float(&self) -> Result<ScalarValue> {
        let wide = match self.source {
            Literal::Bool(b) => f64::from(u8::from(*b)),
            Literal::Int(i) => {
                let x = i.to_f64().unwrap_or(if i.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                });
                self.check(!x.is_finite() || BigInt::from_f64(x).as_ref() != Some(i))?;
                x
            }
            Literal::Float(x) => *x,
            Literal::Complex(c) => {
                self.check(c.im != 0.0)?;
                c.re
            }
            Literal::Datetime(t) | Literal::Timedelta(t) => {
                if t.is_nat() {
                    f64::NAN
                } else {
                    t.value as f64
                }
            }
        };
        let value = float_value(wide, self.target);
        if self.strict {
            let back = value.as_f64().unwrap_or(f64::NAN);
            let same = back == wide || (back.is_nan() && wide.is_nan());
            self.check(!same)?;
        }
        Ok(value)
    }

    fn to_complex(&self) -> Result<ScalarValue> {
        let wide = match self.source {
            Literal::Complex(c) => *c,
            Literal::Datetime(_) => return Err(self.mismatch(Kind::Datetime64)),
            Literal::Timedelta(_) => return Err(self.mismatch(Kind::Timedelta64)),
            other => {
                let re = convert(other, Kind::Float64, self.mode())?;
                Complex64::new(re.as_f64().unwrap_or(f64::NAN), 0.0)
            }
        };
        if self.target == Kind::Complex128 {
            return Ok(ScalarValue::from(wide));
        }
        #[allow(clippy::cast_possible_truncation)]
        let narrow = Complex32::new(wide.re as f32, wide.im as f32);
        let lossless = |a: f32, b: f64| f64::from(a) == b || (a.is_nan() && b.is_nan());
        self.check(!(lossless(narrow.re, wide.re) && lossless(narrow.im, wide.im)))?;
        Ok(ScalarValue::from(narrow))
    }

    fn to_temporal(&self) -> Result<ScalarValue> {
        let build = |ticks: Ticks| {
            if self.target == Kind::Datetime64 {
                ScalarValue::datetime(ticks)
            } else {
                ScalarValue::timedelta(ticks)
            }
        };
        match self.source {
            Literal::Datetime(t) if self.target == Kind::Datetime64 => Ok(build(*t)),
            Literal::Timedelta(t) if self.target == Kind::Timedelta64 => Ok(build(*t)),
            Literal::Datetime(_) => Err(self.mismatch(Kind::Datetime64)),
            Literal::Timedelta(_) => Err(self.mismatch(Kind::Timedelta64)),
            Literal::Bool(b) if self.target == Kind::Timedelta64 => {
                Ok(build(Ticks::new(i64::from(*b), TimeUnit::Generic)))
            }
            Literal::Int(i) => {
                let value = match i.to_i64() {
                    Some(v) => v,
                    None => {
                        self.check(true)?;
                        wrap_to_width(i, Kind::Int64).to_i64().unwrap_or(0)
                    }
                };
                Ok(build(Ticks::new(value, TimeUnit::Generic)))
            }
            Literal::Bool(_) => Err(self.mismatch(Kind::Bool)),
            Literal::Float(_) => Err(self.mismatch(Kind::Float64)),
            Literal::Complex(_) => Err(self.mismatch(Kind::Complex128)),
        }
    }

    fn mode(&self) -> ConvertMode {
        if self.strict {
            ConvertMode::Strict
        } else {
            ConvertMode::Permissive
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn permissive(source: impl Into<Literal>, kind: Kind) -> ScalarValue {
        convert(&source.into(), kind, ConvertMode::Permissive).unwrap()
    }

    fn strict(source: impl Into<Literal>, kind: Kind) -> Result<ScalarValue> {
        convert(&source.into(), kind, ConvertMode::Strict)
    }

    #[test]
    fn test_integer_in_range_is_exact() {
        assert_eq!(strict(-128, Kind::Int8).unwrap(), ScalarValue::from(-128_i8));
        assert_eq!(strict(u64::MAX, Kind::UInt64).unwrap(), ScalarValue::from(u64::MAX));
    }

    #[test]
    fn test_integer_wraps_permissive() {
        assert_eq!(permissive(256, Kind::UInt8), ScalarValue::from(0_u8));
        assert_eq!(permissive(128, Kind::Int8), ScalarValue::from(-128_i8));
        assert_eq!(permissive(-1, Kind::UInt16), ScalarValue::from(u16::MAX));
        assert_eq!(
            permissive(BigInt::from(u64::MAX) + 1, Kind::Int64),
            ScalarValue::from(0_i64)
        );
    }

    #[test]
    fn test_integer_overflow_strict() {
        assert!(matches!(
            strict(256, Kind::UInt8),
            Err(NumkindError::PrecisionLoss { target: Kind::UInt8, .. })
        ));
        assert!(strict(-1, Kind::UInt64).is_err());
    }

    #[test]
    fn test_float_to_integer() {
        assert_eq!(permissive(-2.7, Kind::Int32), ScalarValue::from(-2_i32));
        assert_eq!(permissive(300.5, Kind::UInt8), ScalarValue::from(44_u8));
        assert_eq!(permissive(f64::NAN, Kind::Int16), ScalarValue::from(0_i16));
        assert!(strict(2.5, Kind::Int32).is_err());
        assert_eq!(strict(3.0, Kind::Int32).unwrap(), ScalarValue::from(3_i32));
    }

    #[test]
    fn test_integer_to_float() {
        assert_eq!(permissive(3, Kind::Float32), ScalarValue::from(3.0_f32));
        assert_eq!(
            strict(1_i64 << 53, Kind::Float64).unwrap().as_f64(),
            Some(9_007_199_254_740_992.0)
        );
        assert!(strict((1_i64 << 53) + 1, Kind::Float64).is_err());
        assert!(strict(2049, Kind::Float16).is_err());
        assert_eq!(strict(2048, Kind::Float16).unwrap().as_f64(), Some(2048.0));
    }

    #[test]
    fn test_float_narrowing() {
        let v = permissive(1e40, Kind::Float32);
        assert_eq!(v.as_f64(), Some(f64::INFINITY));
        assert!(strict(0.1, Kind::Float32).is_err());
        assert!(strict(0.5, Kind::Float32).is_ok());
        assert!(strict(f64::NAN, Kind::Float16).unwrap().is_nan());
    }

    #[test]
    fn test_complex_conversions() {
        let c = Complex64::new(1.5, -2.0);
        assert_eq!(permissive(c, Kind::Float64), ScalarValue::from(1.5_f64));
        assert!(strict(c, Kind::Float64).is_err());
        assert_eq!(
            permissive(c, Kind::Complex64),
            ScalarValue::from(Complex32::new(1.5, -2.0))
        );
        assert_eq!(
            permissive(2, Kind::Complex128),
            ScalarValue::from(Complex64::new(2.0, 0.0))
        );
    }

    #[test]
    fn test_bool_conversions() {
        assert_eq!(permissive(5, Kind::Bool), ScalarValue::from(true));
        assert_eq!(permissive(0.0, Kind::Bool), ScalarValue::from(false));
        assert!(strict(5, Kind::Bool).is_err());
        assert_eq!(permissive(true, Kind::Int32), ScalarValue::from(1_i32));
    }

    #[test]
    fn test_temporal_conversions() {
        let td = permissive(90, Kind::Timedelta64);
        assert_eq!(td.as_ticks(), Some(Ticks::new(90, TimeUnit::Generic)));

        let dt = Literal::Datetime(Ticks::new(5, TimeUnit::Second));
        assert_eq!(permissive(dt.clone(), Kind::Int64), ScalarValue::from(5_i64));
        assert!(matches!(
            convert(&dt, Kind::Timedelta64, ConvertMode::Permissive),
            Err(NumkindError::KindMismatch { .. })
        ));
        assert!(convert(&Literal::Float(1.0), Kind::Datetime64, ConvertMode::Permissive).is_err());
        assert!(convert(&Literal::Bool(true), Kind::Datetime64, ConvertMode::Permissive).is_err());
    }

    #[test]
    fn test_nat_to_float_is_nan() {
        let nat = Literal::Timedelta(Ticks::nat(TimeUnit::Second));
        assert!(permissive(nat, Kind::Float64).is_nan());
    }

    #[test]
    fn test_character_targets_unsupported() {
        assert!(matches!(
            convert(&Literal::from(1), Kind::Str, ConvertMode::Permissive),
            Err(NumkindError::UnsupportedKind { kind: Kind::Str, .. })
        ));
    }

    #[test]
    fn test_wrap_to_width() {
        assert_eq!(wrap_to_width(&BigInt::from(255), Kind::Int8), BigInt::from(-1));
        assert_eq!(wrap_to_width(&BigInt::from(-129), Kind::Int8), BigInt::from(127));
        assert_eq!(wrap_to_width(&BigInt::from(-1), Kind::UInt32), BigInt::from(u32::MAX));
    }
}
