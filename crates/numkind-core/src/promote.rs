//! Type promotion and cast-safety rules.
//!
//! Kinds are ordered by how much they can represent:
//!
//! ```text
//! bool < unsigned/signed integers < floats < complex
//! ```
//!
//! [`promote_types`] finds the smallest kind both operands cast to safely.
//! [`next_wider`] walks up one width inside a category, which is what
//! scalar-context arithmetic uses to rescue an overflowing result.

use num_bigint::BigInt;

use crate::category::Category;
use crate::error::{NumkindError, Result};
use crate::kind::Kind;

/// Cast-safety levels, from strictest to most lenient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Casting {
    /// Only identical kinds.
    No,
    /// Identical kinds (byte order is not modelled).
    Equiv,
    /// Only casts that preserve every value.
    Safe,
    /// Safe casts, or casts within the same category or towards a more
    /// general one (e.g. `float64` to `float32`).
    SameKind,
    /// Any cast a value conversion exists for.
    Unsafe,
}

/// The next wider kind in the same category, if any.
pub fn next_wider(kind: Kind) -> Option<Kind> {
    match kind {
        Kind::Int8 => Some(Kind::Int16),
        Kind::Int16 => Some(Kind::Int32),
        Kind::Int32 => Some(Kind::Int64),
        Kind::UInt8 => Some(Kind::UInt16),
        Kind::UInt16 => Some(Kind::UInt32),
        Kind::UInt32 => Some(Kind::UInt64),
        Kind::Float16 => Some(Kind::Float32),
        Kind::Float32 => Some(Kind::Float64),
        Kind::Float64 => Some(Kind::LongDouble),
        Kind::Complex64 => Some(Kind::Complex128),
        _ => None,
    }
}

/// The narrowest strictly wider integer kind of the same category that
/// holds `value`.
pub(crate) fn widen_to_fit(kind: Kind, value: &BigInt) -> Option<Kind> {
    let mut candidate = next_wider(kind);
    while let Some(wider) = candidate {
        let (min, max) = wider.int_bounds()?;
        if *value >= BigInt::from(min) && *value <= BigInt::from(max) {
            return Some(wider);
        }
        candidate = next_wider(wider);
    }
    None
}

fn signed_of_width(bits: u32) -> Option<Kind> {
    match bits {
        8 => Some(Kind::Int8),
        16 => Some(Kind::Int16),
        32 => Some(Kind::Int32),
        64 => Some(Kind::Int64),
        _ => None,
    }
}

fn float_rank(kind: Kind) -> u8 {
    match kind {
        Kind::Float16 => 0,
        Kind::Float32 => 1,
        Kind::Float64 => 2,
        _ => 3,
    }
}

fn promote_integers(a: Kind, b: Kind) -> Kind {
    if a.is_signed() == b.is_signed() {
        return if a.width_bits() >= b.width_bits() { a } else { b };
    }
    let (signed, unsigned) = if a.is_signed() { (a, b) } else { (b, a) };
    if signed.width_bits() > unsigned.width_bits() {
        signed
    } else {
        signed_of_width(unsigned.width_bits() * 2).unwrap_or(Kind::Float64)
    }
}

/// Smallest float holding every value of integer kind `int` exactly enough,
/// combined with float kind `float`.
fn promote_int_float(int: Kind, float: Kind) -> Kind {
    let needed = match int.width_bits() {
        8 => Kind::Float16,
        16 => Kind::Float32,
        _ => Kind::Float64,
    };
    if float_rank(needed) > float_rank(float) {
        needed
    } else {
        float
    }
}

fn promote_real_complex(real: Kind, complex: Kind) -> Kind {
    let needs_double = match real.category() {
        Category::Float => float_rank(real) >= float_rank(Kind::Float64),
        Category::SignedInt | Category::UnsignedInt => real.width_bits() > 16,
        _ => false,
    };
    if needs_double {
        Kind::Complex128
    } else {
        complex
    }
}

/// The smallest kind both `a` and `b` can be safely cast to.
///
/// ```
/// use numkind_core::promote::promote_types;
/// use numkind_core::Kind;
///
/// assert_eq!(promote_types(Kind::Int8, Kind::UInt8).unwrap(), Kind::Int16);
/// assert_eq!(promote_types(Kind::Int64, Kind::UInt64).unwrap(), Kind::Float64);
/// assert_eq!(promote_types(Kind::Int16, Kind::Float16).unwrap(), Kind::Float32);
/// assert!(promote_types(Kind::Str, Kind::Int32).is_err());
/// ```
pub fn promote_types(a: Kind, b: Kind) -> Result<Kind> {
    if a == b {
        return Ok(a);
    }
    let (ca, cb) = (a.category(), b.category());
    let mismatch = || NumkindError::KindMismatch { left: a, right: b };

    let promoted = match (ca, cb) {
        (Category::Object, _) | (_, Category::Object) => Kind::Object,
        (Category::Boolean, c) if c.is_numeric() || c == Category::Timedelta => b,
        (c, Category::Boolean) if c.is_numeric() || c == Category::Timedelta => a,
        (x, y) if x.is_integer() && y.is_integer() => promote_integers(a, b),
        (x, Category::Float) if x.is_integer() => promote_int_float(a, b),
        (Category::Float, y) if y.is_integer() => promote_int_float(b, a),
        (Category::Float, Category::Float) => {
            if float_rank(a) >= float_rank(b) {
                a
            } else {
                b
            }
        }
        (Category::Complex, Category::Complex) => Kind::Complex128,
        (x, Category::Complex) if x.is_numeric() => promote_real_complex(a, b),
        (Category::Complex, y) if y.is_numeric() => promote_real_complex(b, a),
        (x, Category::Timedelta) if x.is_integer() => Kind::Timedelta64,
        (Category::Timedelta, y) if y.is_integer() => Kind::Timedelta64,
        (Category::Character, Category::Character) => Kind::Str,
        _ => return Err(mismatch()),
    };
    Ok(promoted)
}

/// Order used by `SameKind` casting: a cast may move up this ladder.
fn same_kind_rank(category: Category) -> Option<u8> {
    match category {
        Category::Boolean => Some(0),
        Category::UnsignedInt => Some(1),
        Category::SignedInt => Some(2),
        Category::Float => Some(3),
        Category::Complex => Some(4),
        _ => None,
    }
}

/// Whether a value conversion exists from `from` to `to` at all.
fn unsafe_cast_exists(from: Category, to: Category) -> bool {
    let real_or_bool = |c: Category| c == Category::Boolean || c.is_numeric();
    match (from, to) {
        (_, Category::Object) => true,
        (Category::Character, Category::Character) => true,
        (x, y) if real_or_bool(x) && real_or_bool(y) => true,
        (x, y) if (x.is_integer() || x == Category::Boolean) && y.is_temporal() => {
            x != Category::Boolean || y == Category::Timedelta
        }
        (x, y) if x.is_temporal() && (y.is_integer() || y == Category::Float) => true,
        (x, y) => x == y,
    }
}

/// Whether `from` can be cast to `to` under the `casting` rule.
pub fn can_cast(from: Kind, to: Kind, casting: Casting) -> bool {
    if from == to {
        return true;
    }
    match casting {
        Casting::No | Casting::Equiv => false,
        Casting::Safe => promote_types(from, to) == Ok(to),
        Casting::SameKind => {
            if can_cast(from, to, Casting::Safe) {
                return true;
            }
            match (same_kind_rank(from.category()), same_kind_rank(to.category())) {
                (Some(f), Some(t)) => t >= f,
                _ => from.category() == to.category(),
            }
        }
        Casting::Unsafe => unsafe_cast_exists(from.category(), to.category()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_identity() {
        for kind in Kind::ALL {
            assert_eq!(promote_types(kind, kind).unwrap(), kind);
        }
    }

    #[test]
    fn test_promote_commutative() {
        for a in Kind::ALL {
            for b in Kind::ALL {
                assert_eq!(promote_types(a, b).ok(), promote_types(b, a).ok(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_promote_integers() {
        assert_eq!(promote_types(Kind::Int8, Kind::Int32).unwrap(), Kind::Int32);
        assert_eq!(promote_types(Kind::UInt16, Kind::UInt8).unwrap(), Kind::UInt16);
        assert_eq!(promote_types(Kind::Int32, Kind::UInt16).unwrap(), Kind::Int32);
        assert_eq!(promote_types(Kind::Int32, Kind::UInt32).unwrap(), Kind::Int64);
        assert_eq!(promote_types(Kind::UInt64, Kind::Int8).unwrap(), Kind::Float64);
    }

    #[test]
    fn test_promote_with_floats() {
        assert_eq!(promote_types(Kind::UInt8, Kind::Float16).unwrap(), Kind::Float16);
        assert_eq!(promote_types(Kind::Int32, Kind::Float32).unwrap(), Kind::Float64);
        assert_eq!(promote_types(Kind::Int64, Kind::LongDouble).unwrap(), Kind::LongDouble);
        assert_eq!(promote_types(Kind::Float16, Kind::Float64).unwrap(), Kind::Float64);
        assert_eq!(promote_types(Kind::Bool, Kind::Float32).unwrap(), Kind::Float32);
    }

    #[test]
    fn test_promote_with_complex() {
        assert_eq!(promote_types(Kind::Float32, Kind::Complex64).unwrap(), Kind::Complex64);
        assert_eq!(promote_types(Kind::Float64, Kind::Complex64).unwrap(), Kind::Complex128);
        assert_eq!(promote_types(Kind::Int16, Kind::Complex64).unwrap(), Kind::Complex64);
        assert_eq!(promote_types(Kind::Int32, Kind::Complex64).unwrap(), Kind::Complex128);
    }

    #[test]
    fn test_promote_non_numeric() {
        assert_eq!(promote_types(Kind::Int64, Kind::Timedelta64).unwrap(), Kind::Timedelta64);
        assert_eq!(promote_types(Kind::Bytes, Kind::Str).unwrap(), Kind::Str);
        assert_eq!(promote_types(Kind::Float64, Kind::Object).unwrap(), Kind::Object);
        assert!(promote_types(Kind::Datetime64, Kind::Timedelta64).is_err());
        assert!(promote_types(Kind::Float64, Kind::Datetime64).is_err());
        assert!(promote_types(Kind::Bool, Kind::Str).is_err());
    }

    #[test]
    fn test_next_wider() {
        assert_eq!(next_wider(Kind::Int32), Some(Kind::Int64));
        assert_eq!(next_wider(Kind::Int64), None);
        assert_eq!(next_wider(Kind::UInt64), None);
        assert_eq!(next_wider(Kind::Float64), Some(Kind::LongDouble));
        assert_eq!(next_wider(Kind::Bool), None);
    }

    #[test]
    fn test_widen_to_fit() {
        assert_eq!(widen_to_fit(Kind::Int8, &BigInt::from(128)), Some(Kind::Int16));
        assert_eq!(widen_to_fit(Kind::Int8, &BigInt::from(100_000)), Some(Kind::Int32));
        assert_eq!(widen_to_fit(Kind::Int64, &(BigInt::from(i64::MAX) + 1)), None);
        assert_eq!(widen_to_fit(Kind::UInt8, &BigInt::from(-1)), None);
    }

    #[test]
    fn test_can_cast_safe() {
        assert!(can_cast(Kind::Int8, Kind::Int64, Casting::Safe));
        assert!(can_cast(Kind::UInt8, Kind::Int16, Casting::Safe));
        assert!(!can_cast(Kind::Int64, Kind::Int32, Casting::Safe));
        assert!(!can_cast(Kind::UInt64, Kind::Int64, Casting::Safe));
        assert!(can_cast(Kind::Int64, Kind::Float64, Casting::Safe));
        assert!(!can_cast(Kind::Float64, Kind::Int64, Casting::Safe));
        assert!(can_cast(Kind::Bool, Kind::UInt8, Casting::Safe));
    }

    #[test]
    fn test_can_cast_same_kind() {
        assert!(can_cast(Kind::Float64, Kind::Float32, Casting::SameKind));
        assert!(can_cast(Kind::Int64, Kind::Int8, Casting::SameKind));
        assert!(can_cast(Kind::UInt32, Kind::Int8, Casting::SameKind));
        assert!(!can_cast(Kind::Int8, Kind::UInt8, Casting::SameKind));
        assert!(!can_cast(Kind::Float32, Kind::Int64, Casting::SameKind));
        assert!(!can_cast(Kind::Datetime64, Kind::Timedelta64, Casting::SameKind));
    }

    #[test]
    fn test_can_cast_unsafe() {
        assert!(can_cast(Kind::Float64, Kind::UInt8, Casting::Unsafe));
        assert!(can_cast(Kind::Int64, Kind::Datetime64, Casting::Unsafe));
        assert!(can_cast(Kind::Datetime64, Kind::Int64, Casting::Unsafe));
        assert!(!can_cast(Kind::Float64, Kind::Datetime64, Casting::Unsafe));
        assert!(!can_cast(Kind::Str, Kind::Int32, Casting::Unsafe));
        assert!(!can_cast(Kind::Int32, Kind::Int64, Casting::No));
    }

    #[test]
    fn test_casting_levels_nest() {
        for from in Kind::ALL {
            for to in Kind::ALL {
                if can_cast(from, to, Casting::Safe) {
                    assert!(can_cast(from, to, Casting::SameKind), "{from} -> {to}");
                }
                if can_cast(from, to, Casting::SameKind) {
                    assert!(can_cast(from, to, Casting::Unsafe), "{from} -> {to}");
                }
            }
        }
    }
}
