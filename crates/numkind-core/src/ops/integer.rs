//! Fixed-width integer arithmetic.
//!
//! The fast path is the checked native operation. Only when it fails is the
//! exact result computed with `BigInt` and then either promoted (scalar
//! context) or wrapped.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{PrimInt, WrappingAdd, WrappingMul, WrappingSub};

use crate::config::Context;
use crate::diagnostic::Signal;
use crate::error::{NumkindError, Result};
use crate::kind::Kind;
use crate::promote::widen_to_fit;
use crate::value::{integer_value, wrap_to_width, ScalarValue};

use super::{BinaryOp, Reporter};

/// Native integer payloads.
pub(super) trait NativeInt:
    PrimInt + WrappingAdd + WrappingSub + WrappingMul + Into<BigInt> + Into<ScalarValue>
{
}

impl<T> NativeInt for T where
    T: PrimInt + WrappingAdd + WrappingSub + WrappingMul + Into<BigInt> + Into<ScalarValue>
{
}

pub(super) fn apply<T: NativeInt>(
    a: T,
    b: T,
    kind: Kind,
    reporter: &Reporter<'_>,
) -> Result<ScalarValue> {
    let (checked, wrapped) = match reporter.op {
        BinaryOp::Add => (a.checked_add(&b), a.wrapping_add(&b)),
        BinaryOp::Sub => (a.checked_sub(&b), a.wrapping_sub(&b)),
        BinaryOp::Mul => (a.checked_mul(&b), a.wrapping_mul(&b)),
        BinaryOp::FloorDiv | BinaryOp::Rem => return divide(a, b, kind, reporter),
        BinaryOp::Div => return Err(reporter.unsupported(kind, kind)),
    };
    if let Some(v) = checked {
        return Ok(v.into());
    }
    if reporter.context == Context::Bulk {
        return Ok(wrapped.into());
    }
    let (x, y): (BigInt, BigInt) = (a.into(), b.into());
    let exact = match reporter.op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        _ => x * y,
    };
    settle(&exact, kind, reporter)
}

/// Floored division and remainder. Division by zero gives 0 in both
/// contexts and signals `DivideByZero`.
fn divide<T: NativeInt>(a: T, b: T, kind: Kind, reporter: &Reporter<'_>) -> Result<ScalarValue> {
    if b.is_zero() {
        return reporter.signal(Signal::DivideByZero, kind, T::zero().into());
    }
    let (x, y): (BigInt, BigInt) = (a.into(), b.into());
    let exact = if reporter.op == BinaryOp::FloorDiv {
        x.div_floor(&y)
    } else {
        x.mod_floor(&y)
    };
    settle(&exact, kind, reporter)
}

/// Place an exact result: in `kind` if it fits, else in a wider kind
/// (scalar context), else wrapped.
fn settle(exact: &BigInt, kind: Kind, reporter: &Reporter<'_>) -> Result<ScalarValue> {
    if let Some(v) = integer_value(exact, kind) {
        return Ok(v);
    }
    if reporter.context == Context::Scalar {
        if let Some(wider) = widen_to_fit(kind, exact) {
            log::debug!("{kind} {} promoted to {wider}", reporter.op);
            return integer_value(exact, wider).ok_or(NumkindError::UnsupportedKind {
                kind: wider,
                operation: "integer arithmetic",
            });
        }
    }
    let wrapped = integer_value(&wrap_to_width(exact, kind), kind)
        .ok_or(NumkindError::UnsupportedKind {
            kind,
            operation: "integer arithmetic",
        })?;
    reporter.wrapped(kind, wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorPolicy;
    use crate::diagnostic::{DiagnosticPolicy, DiagnosticTracker};

    fn run<T: NativeInt>(
        op: BinaryOp,
        a: T,
        b: T,
        kind: Kind,
        context: Context,
    ) -> Result<ScalarValue> {
        let tracker = DiagnosticTracker::new();
        let policy = ErrorPolicy::uniform(DiagnosticPolicy::Raise);
        let reporter = Reporter {
            op,
            context,
            policy: &policy,
            tracker: &tracker,
        };
        apply(a, b, kind, &reporter)
    }

    #[test]
    fn test_in_range_is_native() {
        let r = run(BinaryOp::Mul, 12_i16, -3, Kind::Int16, Context::Scalar).unwrap();
        assert_eq!(r, ScalarValue::from(-36_i16));
    }

    #[test]
    fn test_bulk_wraps() {
        let r = run(BinaryOp::Sub, 0_u32, 1, Kind::UInt32, Context::Bulk).unwrap();
        assert_eq!(r, ScalarValue::from(u32::MAX));
        let r = run(BinaryOp::Mul, 64_i8, 4, Kind::Int8, Context::Bulk).unwrap();
        assert_eq!(r, ScalarValue::from(0_i8));
    }

    #[test]
    fn test_scalar_promotes_to_narrowest_fit() {
        let r = run(BinaryOp::Add, 127_i8, 1, Kind::Int8, Context::Scalar).unwrap();
        assert_eq!(r, ScalarValue::from(128_i16));
        let r = run(BinaryOp::Mul, 30_000_i16, 30_000, Kind::Int16, Context::Scalar).unwrap();
        assert_eq!(r, ScalarValue::from(900_000_000_i32));
    }

    #[test]
    fn test_scalar_unsigned_underflow_wraps() {
        let err = run(BinaryOp::Sub, 0_u8, 1, Kind::UInt8, Context::Scalar).unwrap_err();
        match err {
            NumkindError::Overflow(event) => assert_eq!(event.result, ScalarValue::from(255_u8)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_floor_division_and_remainder() {
        let r = run(BinaryOp::FloorDiv, -7_i32, 2, Kind::Int32, Context::Bulk).unwrap();
        assert_eq!(r, ScalarValue::from(-4_i32));
        let r = run(BinaryOp::Rem, -7_i32, 2, Kind::Int32, Context::Bulk).unwrap();
        assert_eq!(r, ScalarValue::from(1_i32));
        let r = run(BinaryOp::Rem, 7_i64, -2, Kind::Int64, Context::Bulk).unwrap();
        assert_eq!(r, ScalarValue::from(-1_i64));
    }

    #[test]
    fn test_division_by_zero_signals_in_bulk() {
        let err = run(BinaryOp::FloorDiv, 5_u16, 0, Kind::UInt16, Context::Bulk).unwrap_err();
        assert!(matches!(err, NumkindError::DivideByZero(_)));
    }

    #[test]
    fn test_min_floor_div_minus_one() {
        let r = run(BinaryOp::FloorDiv, i32::MIN, -1, Kind::Int32, Context::Scalar).unwrap();
        assert_eq!(r, ScalarValue::from(1_i64 << 31));
        let r = run(BinaryOp::FloorDiv, i64::MIN, -1, Kind::Int64, Context::Bulk).unwrap();
        assert_eq!(r, ScalarValue::from(i64::MIN));
    }
}
