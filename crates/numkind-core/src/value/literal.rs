//! Arbitrary-precision conversion sources.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigInt;
use num_complex::{Complex32, Complex64};
use num_traits::Num;

use crate::error::NumkindError;
use crate::temporal::Ticks;

use super::{Payload, ScalarValue};

/// An unbounded input to [`convert`](super::convert).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Complex(Complex64),
    Datetime(Ticks),
    Timedelta(Ticks),
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                #[inline]
                fn from(v: $ty) -> Self {
                    Literal::Int(BigInt::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for Literal {
    fn from(v: BigInt) -> Self {
        Literal::Int(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<f32> for Literal {
    fn from(v: f32) -> Self {
        Literal::Float(f64::from(v))
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<Complex32> for Literal {
    fn from(v: Complex32) -> Self {
        Literal::Complex(Complex64::new(f64::from(v.re), f64::from(v.im)))
    }
}

impl From<Complex64> for Literal {
    fn from(v: Complex64) -> Self {
        Literal::Complex(v)
    }
}

/// Lossless: every payload has an exact literal.
impl From<ScalarValue> for Literal {
    fn from(v: ScalarValue) -> Self {
        match v.payload() {
            Payload::Bool(b) => Literal::Bool(b),
            Payload::Int8(x) => x.into(),
            Payload::Int16(x) => x.into(),
            Payload::Int32(x) => x.into(),
            Payload::Int64(x) => x.into(),
            Payload::UInt8(x) => x.into(),
            Payload::UInt16(x) => x.into(),
            Payload::UInt32(x) => x.into(),
            Payload::UInt64(x) => x.into(),
            Payload::Float16(x) => Literal::Float(x.to_f64()),
            Payload::Float32(x) => x.into(),
            Payload::Float64(x) => x.into(),
            Payload::Complex64(c) => c.into(),
            Payload::Complex128(c) => c.into(),
            Payload::Datetime(t) => Literal::Datetime(t),
            Payload::Timedelta(t) => Literal::Timedelta(t),
        }
    }
}

impl FromStr for Literal {
    type Err = NumkindError;

    /// Parse `true`/`false`, integers (decimal, `0x`, `0o`, `0b`, with `_`
    /// separators), or anything `f64` accepts (`1.5`, `1e300`, `inf`, `nan`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NumkindError::InvalidLiteral(s.to_string());
        let text = s.trim().replace('_', "");
        match text.as_str() {
            "" => return Err(invalid()),
            "true" | "True" => return Ok(Literal::Bool(true)),
            "false" | "False" => return Ok(Literal::Bool(false)),
            _ => {}
        }

        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(&text)),
        };
        let (radix, body) = match digits.get(..2) {
            Some("0x" | "0X") => (16, &digits[2..]),
            Some("0o" | "0O") => (8, &digits[2..]),
            Some("0b" | "0B") => (2, &digits[2..]),
            _ => (10, digits),
        };
        if body.starts_with(['+', '-']) {
            return Err(invalid());
        }
        if let Ok(magnitude) = BigInt::from_str_radix(body, radix) {
            return Ok(Literal::Int(if negative { -magnitude } else { magnitude }));
        }
        if radix != 10 {
            return Err(invalid());
        }
        text.parse::<f64>().map(Literal::Float).map_err(|_| invalid())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Complex(c) => write!(f, "{c}"),
            Literal::Datetime(t) | Literal::Timedelta(t) => write!(f, "{t}"),
        }
    }
}
