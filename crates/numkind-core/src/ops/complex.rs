//! Complex arithmetic.

use num_complex::Complex;
use num_traits::{Float, Zero};

use crate::diagnostic::Signal;
use crate::error::Result;
use crate::kind::Kind;
use crate::value::ScalarValue;

use super::{BinaryOp, Reporter};

pub(super) fn apply<T>(
    a: Complex<T>,
    b: Complex<T>,
    kind: Kind,
    reporter: &Reporter<'_>,
) -> Result<ScalarValue>
where
    T: Float,
    Complex<T>: Into<ScalarValue>,
{
    let value = match reporter.op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b.is_zero() => {
            let scale = b.re.abs();
            Complex::new(a.re / scale, a.im / scale)
        }
        BinaryOp::Div => a / b,
        BinaryOp::FloorDiv | BinaryOp::Rem => return Err(reporter.unsupported(kind, kind)),
    };

    let has_nan = |c: &Complex<T>| c.re.is_nan() || c.im.is_nan();
    let is_finite = |c: &Complex<T>| c.re.is_finite() && c.im.is_finite();
    let signal = if reporter.op == BinaryOp::Div && b.is_zero() && !has_nan(&a) {
        Some(if a.is_zero() {
            Signal::Invalid
        } else {
            Signal::DivideByZero
        })
    } else if has_nan(&value) && !has_nan(&a) && !has_nan(&b) {
        Some(Signal::Invalid)
    } else if !is_finite(&value) && is_finite(&a) && is_finite(&b) {
        Some(Signal::Overflow)
    } else {
        None
    };

    let result = value.into();
    match signal {
        Some(signal) => reporter.signal(signal, kind, result),
        None => Ok(result),
    }
}
