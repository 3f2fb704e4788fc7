//! Datetime and timedelta arithmetic.
//!
//! | op | lhs         | rhs         | result      |
//! |----|-------------|-------------|-------------|
//! | -  | datetime    | datetime    | timedelta   |
//! | ±  | datetime    | timedelta   | datetime    |
//! | +  | timedelta   | datetime    | datetime    |
//! | ±  | timedelta   | timedelta   | timedelta   |
//! | *  | timedelta   | integer     | timedelta   |
//! | /  | timedelta   | timedelta   | float64     |
//! | // | timedelta   | timedelta   | int64       |
//! | %  | timedelta   | timedelta   | timedelta   |
//!
//! Integer and bool operands act as generic-unit timedeltas, except as the
//! scale factor of `*`. Operands are brought to the finer of their units
//! first. NaT in, NaT (or NaN) out.

use num_integer::Integer;

use crate::config::ConvertMode;
use crate::diagnostic::Signal;
use crate::error::{NumkindError, Result};
use crate::kind::Kind;
use crate::temporal::{Ticks, TimeUnit};
use crate::value::{Payload, ScalarValue};

use super::{float, BinaryOp, Reporter};

#[derive(Clone, Copy)]
enum Operand {
    Datetime(Ticks),
    Timedelta(Ticks),
    Count(i64),
}

impl Operand {
    fn of(value: ScalarValue) -> Option<Operand> {
        match value.payload() {
            Payload::Datetime(t) => Some(Operand::Datetime(t)),
            Payload::Timedelta(t) => Some(Operand::Timedelta(t)),
            _ if value.as_i128().is_some() => {
                let wide = value.cast(Kind::Int64, ConvertMode::Permissive).ok()?;
                Some(Operand::Count(i64::try_from(wide.as_i128()?).ok()?))
            }
            _ => None,
        }
    }

    /// A bare count becomes a generic-unit timedelta.
    fn ticked(self) -> Operand {
        match self {
            Operand::Count(n) => Operand::Timedelta(Ticks::new(n, TimeUnit::Generic)),
            other => other,
        }
    }
}

pub(super) fn apply(
    a: ScalarValue,
    b: ScalarValue,
    reporter: &Reporter<'_>,
) -> Result<ScalarValue> {
    let mismatch = || NumkindError::KindMismatch {
        left: a.kind(),
        right: b.kind(),
    };
    let lhs = Operand::of(a).ok_or_else(mismatch)?;
    let rhs = Operand::of(b).ok_or_else(mismatch)?;
    let operand_kind = if a.category().is_temporal() {
        a.kind()
    } else {
        b.kind()
    };
    let calc = Calc {
        operand_kind,
        reporter,
    };

    if reporter.op == BinaryOp::Mul {
        return match (lhs, rhs) {
            (Operand::Timedelta(t), Operand::Count(n))
            | (Operand::Count(n), Operand::Timedelta(t)) => calc.scale(t, n),
            _ => Err(reporter.unsupported(a.kind(), b.kind())),
        };
    }

    match (reporter.op, lhs.ticked(), rhs.ticked()) {
        (BinaryOp::Sub, Operand::Datetime(x), Operand::Datetime(y)) => {
            calc.shift(x, y, Kind::Timedelta64)
        }
        (BinaryOp::Add | BinaryOp::Sub, Operand::Datetime(x), Operand::Timedelta(y))
        | (BinaryOp::Add, Operand::Timedelta(x), Operand::Datetime(y)) => {
            calc.shift(x, y, Kind::Datetime64)
        }
        (BinaryOp::Add | BinaryOp::Sub, Operand::Timedelta(x), Operand::Timedelta(y)) => {
            calc.shift(x, y, Kind::Timedelta64)
        }
        (BinaryOp::Div, Operand::Timedelta(x), Operand::Timedelta(y)) => calc.ratio(x, y),
        (BinaryOp::FloorDiv, Operand::Timedelta(x), Operand::Timedelta(y)) => {
            calc.floor_ratio(x, y)
        }
        (BinaryOp::Rem, Operand::Timedelta(x), Operand::Timedelta(y)) => calc.remainder(x, y),
        _ => Err(reporter.unsupported(a.kind(), b.kind())),
    }
}

/// Bring both operands to their common unit. The flag is set when either
/// rescale overflowed.
fn align(x: Ticks, y: Ticks) -> (Ticks, Ticks, bool) {
    let unit = x.unit.common(y.unit);
    let (x, x_overflowed) = x.rescale(unit);
    let (y, y_overflowed) = y.rescale(unit);
    (x, y, x_overflowed || y_overflowed)
}

fn build(kind: Kind, ticks: Ticks) -> ScalarValue {
    if kind == Kind::Datetime64 {
        ScalarValue::datetime(ticks)
    } else {
        ScalarValue::timedelta(ticks)
    }
}

struct Calc<'r, 'a> {
    operand_kind: Kind,
    reporter: &'r Reporter<'a>,
}

impl Calc<'_, '_> {
    fn settle(&self, result: ScalarValue, overflowed: bool) -> Result<ScalarValue> {
        if overflowed {
            self.reporter.wrapped(self.operand_kind, result)
        } else {
            Ok(result)
        }
    }

    /// `x + y` or `x - y` in the common unit.
    fn shift(&self, x: Ticks, y: Ticks, out: Kind) -> Result<ScalarValue> {
        let (x, y, rescaled) = align(x, y);
        if x.is_nat() || y.is_nat() {
            return Ok(build(out, Ticks::nat(x.unit)));
        }
        let (value, overflowed) = if self.reporter.op == BinaryOp::Add {
            x.value.overflowing_add(y.value)
        } else {
            x.value.overflowing_sub(y.value)
        };
        self.settle(build(out, Ticks::new(value, x.unit)), overflowed || rescaled)
    }

    fn scale(&self, t: Ticks, n: i64) -> Result<ScalarValue> {
        if t.is_nat() {
            return Ok(ScalarValue::timedelta(t));
        }
        let (value, overflowed) = t.value.overflowing_mul(n);
        self.settle(ScalarValue::timedelta(Ticks::new(value, t.unit)), overflowed)
    }

    #[allow(clippy::cast_precision_loss)]
    fn ratio(&self, x: Ticks, y: Ticks) -> Result<ScalarValue> {
        let (x, y, _) = align(x, y);
        if x.is_nat() || y.is_nat() {
            return Ok(ScalarValue::from(f64::NAN));
        }
        float::apply(
            x.value as f64,
            y.value as f64,
            Kind::Float64,
            ScalarValue::from,
            self.reporter,
        )
    }

    fn floor_ratio(&self, x: Ticks, y: Ticks) -> Result<ScalarValue> {
        let (x, y, rescaled) = align(x, y);
        let zero = ScalarValue::from(0_i64);
        if x.is_nat() || y.is_nat() {
            return self.reporter.signal(Signal::Invalid, self.operand_kind, zero);
        }
        if y.value == 0 {
            return self.reporter.signal(Signal::DivideByZero, self.operand_kind, zero);
        }
        self.settle(ScalarValue::from(Integer::div_floor(&x.value, &y.value)), rescaled)
    }

    fn remainder(&self, x: Ticks, y: Ticks) -> Result<ScalarValue> {
        let (x, y, rescaled) = align(x, y);
        let nat = ScalarValue::timedelta(Ticks::nat(x.unit));
        if x.is_nat() || y.is_nat() {
            return Ok(nat);
        }
        if y.value == 0 {
            return self.reporter.signal(Signal::DivideByZero, self.operand_kind, nat);
        }
        let value = Integer::mod_floor(&x.value, &y.value);
        self.settle(ScalarValue::timedelta(Ticks::new(value, x.unit)), rescaled)
    }
}
