//! IEEE-754 arithmetic with signal detection.
//!
//! Results are always the IEEE value. A condition is signalled when the
//! result is non-finite but the operands were not:
//!
//! | result | operands      | signal         |
//! |--------|---------------|----------------|
//! | NaN    | no NaN        | `Invalid`      |
//! | ±inf   | finite, b = 0 | `DivideByZero` |
//! | ±inf   | finite        | `Overflow`     |

use num_traits::Float;

use crate::diagnostic::Signal;
use crate::error::Result;
use crate::kind::Kind;
use crate::value::ScalarValue;

use super::{BinaryOp, Reporter};

pub(super) fn apply<T: Float>(
    a: T,
    b: T,
    kind: Kind,
    build: fn(T) -> ScalarValue,
    reporter: &Reporter<'_>,
) -> Result<ScalarValue> {
    let op = reporter.op;
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::FloorDiv => divmod(a, b).0,
        BinaryOp::Rem => divmod(a, b).1,
    };
    let result = build(value);
    match classify(a, b, value, op.is_division()) {
        Some(signal) => reporter.signal(signal, kind, result),
        None => Ok(result),
    }
}

fn classify<T: Float>(a: T, b: T, value: T, division: bool) -> Option<Signal> {
    if value.is_nan() {
        return (!a.is_nan() && !b.is_nan()).then_some(Signal::Invalid);
    }
    if value.is_infinite() && a.is_finite() && b.is_finite() {
        return Some(if division && b.is_zero() {
            Signal::DivideByZero
        } else {
            Signal::Overflow
        });
    }
    None
}

/// Floored quotient and remainder; the remainder takes the divisor's sign.
pub(super) fn divmod<T: Float>(a: T, b: T) -> (T, T) {
    let zero = T::zero();
    let mut rem = a % b;
    if b.is_zero() {
        return (a / b, rem);
    }
    let mut div = (a - rem) / b;
    if rem.is_zero() {
        rem = zero.copysign(b);
    } else if (b < zero) != (rem < zero) {
        rem = rem + b;
        div = div - T::one();
    }
    let floor = if div.is_zero() {
        zero.copysign(a / b)
    } else {
        let half = T::one() / (T::one() + T::one());
        let mut floor = div.floor();
        if div - floor > half {
            floor = floor + T::one();
        }
        floor
    };
    (floor, rem)
}
