//! Machine limits of integer and floating kinds (`iinfo` / `finfo`).

use half::f16;

use crate::category::Category;
use crate::error::{NumkindError, Result};
use crate::kind::Kind;

/// Limits of an integer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntInfo {
    pub kind: Kind,
    pub bits: u32,
    pub min: i128,
    pub max: i128,
}

/// Limits of a floating kind. Complex kinds report their component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatInfo {
    pub kind: Kind,
    pub bits: u32,
    /// Difference between 1.0 and the next representable value.
    pub eps: f64,
    pub max: f64,
    pub min: f64,
    /// Smallest positive normal value.
    pub tiny: f64,
    /// Approximate number of significant decimal digits.
    pub precision: u32,
    /// Explicitly stored mantissa bits.
    pub mantissa_bits: u32,
}

/// Integer limits of `kind`.
///
/// ```
/// use numkind_core::{info::iinfo, Kind};
///
/// let info = iinfo(Kind::Int16).unwrap();
/// assert_eq!((info.min, info.max), (-32768, 32767));
/// ```
pub fn iinfo(kind: Kind) -> Result<IntInfo> {
    let (min, max) = kind.int_bounds().ok_or(NumkindError::UnsupportedKind {
        kind,
        operation: "iinfo",
    })?;
    Ok(IntInfo {
        kind,
        bits: kind.width_bits(),
        min,
        max,
    })
}

/// Floating-point limits of `kind`.
///
/// `longdouble` reports the limits of the `float64` representation its
/// values are carried in.
pub fn finfo(kind: Kind) -> Result<FloatInfo> {
    let component = match kind {
        Kind::Complex64 => Kind::Float32,
        Kind::Complex128 => Kind::Float64,
        k if k.category() == Category::Float => k,
        _ => {
            return Err(NumkindError::UnsupportedKind {
                kind,
                operation: "finfo",
            })
        }
    };

    let info = match component {
        Kind::Float16 => FloatInfo {
            kind,
            bits: 16,
            eps: f16::EPSILON.to_f64(),
            max: f16::MAX.to_f64(),
            min: f16::MIN.to_f64(),
            tiny: f16::MIN_POSITIVE.to_f64(),
            precision: 3,
            mantissa_bits: 10,
        },
        Kind::Float32 => FloatInfo {
            kind,
            bits: 32,
            eps: f64::from(f32::EPSILON),
            max: f64::from(f32::MAX),
            min: f64::from(f32::MIN),
            tiny: f64::from(f32::MIN_POSITIVE),
            precision: 6,
            mantissa_bits: 23,
        },
        _ => FloatInfo {
            kind,
            bits: component.width_bits(),
            eps: f64::EPSILON,
            max: f64::MAX,
            min: f64::MIN,
            tiny: f64::MIN_POSITIVE,
            precision: 15,
            mantissa_bits: 52,
        },
    };
    Ok(info)
}
