//! Binary arithmetic on [`ScalarValue`]s.
//!
//! Operands of different kinds are first brought to a common kind with
//! [`promote_types`], then dispatched on the payload:
//!
//! ```text
//! arithmetic(op, a, b, context, policy, tracker)
//!   ├── temporal operand?  ──► temporal::apply   (ticks, NaT, unit rescaling)
//!   └── promote_types(a, b)
//!         ├── bool          ──► or / and, or re-dispatch as float64 / int8
//!         ├── integer       ──► integer::apply   (wrap or promote, by context)
//!         ├── float         ──► float::apply     (IEEE-754 + signals)
//!         └── complex       ──► complex::apply
//! ```
//!
//! Every out-of-range or undefined result is turned into an
//! [`OverflowEvent`] and handed to the [`DiagnosticTracker`], which applies
//! the configured [`DiagnosticPolicy`](crate::diagnostic::DiagnosticPolicy).

mod complex;
mod float;
mod integer;
mod temporal;

use core::fmt;

use crate::category::Category;
use crate::config::{Context, ConvertMode, ErrorPolicy};
use crate::diagnostic::{DiagnosticTracker, OverflowEvent, Signal};
use crate::error::{NumkindError, Result};
use crate::kind::Kind;
use crate::promote::promote_types;
use crate::value::{Payload, ScalarValue};

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// True division. Integer operands produce `float64`.
    Div,
    /// Division rounded toward negative infinity.
    FloorDiv,
    /// Remainder with the sign of the divisor.
    Rem,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 6] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::FloorDiv,
        BinaryOp::Rem,
    ];

    /// The ufunc-style name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::FloorDiv => "floor_divide",
            BinaryOp::Rem => "remainder",
        }
    }

    #[inline]
    fn is_division(self) -> bool {
        matches!(self, BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Rem)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ======================================================================
// Reporter
// ======================================================================

/// Turns detected conditions into events for one arithmetic call.
#[derive(Clone, Copy)]
pub(crate) struct Reporter<'a> {
    op: BinaryOp,
    context: Context,
    policy: &'a ErrorPolicy,
    tracker: &'a DiagnosticTracker,
}

impl Reporter<'_> {
    /// Report `signal` and hand back `result` unless the policy raises.
    fn signal(
        &self,
        signal: Signal,
        operand_kind: Kind,
        result: ScalarValue,
    ) -> Result<ScalarValue> {
        let event = OverflowEvent {
            op: self.op,
            signal,
            operand_kind,
            result,
            severity: self.policy.for_signal(signal),
        };
        self.tracker.report(event)?;
        Ok(result)
    }

    /// A wrapped fixed-width result: silent in bulk, reported for scalars.
    fn wrapped(&self, operand_kind: Kind, result: ScalarValue) -> Result<ScalarValue> {
        match self.context {
            Context::Bulk => Ok(result),
            Context::Scalar => self.signal(Signal::Overflow, operand_kind, result),
        }
    }

    fn unsupported(&self, left: Kind, right: Kind) -> NumkindError {
        NumkindError::UnsupportedOperation {
            op: self.op,
            left,
            right,
        }
    }
}

// ======================================================================
// Entry points
// ======================================================================

/// Apply `op` to `a` and `b`.
///
/// ```
/// use numkind_core::config::{Context, ErrorPolicy};
/// use numkind_core::diagnostic::DiagnosticTracker;
/// use numkind_core::ops::{arithmetic, BinaryOp};
/// use numkind_core::ScalarValue;
///
/// let policy = ErrorPolicy::default();
/// let tracker = DiagnosticTracker::new();
///
/// // Bulk: wraps silently.
/// let r = arithmetic(BinaryOp::Add, 255_u8.into(), 1_u8.into(), Context::Bulk, &policy, &tracker);
/// assert_eq!(r.unwrap(), ScalarValue::from(0_u8));
///
/// // Scalar: promotes to the next wider kind.
/// let (a, b) = (255_u8.into(), 1_u8.into());
/// let r = arithmetic(BinaryOp::Add, a, b, Context::Scalar, &policy, &tracker);
/// assert_eq!(r.unwrap(), ScalarValue::from(256_u16));
/// ```
pub fn arithmetic(
    op: BinaryOp,
    a: ScalarValue,
    b: ScalarValue,
    context: Context,
    policy: &ErrorPolicy,
    tracker: &DiagnosticTracker,
) -> Result<ScalarValue> {
    let reporter = Reporter {
        op,
        context,
        policy,
        tracker,
    };
    if a.category().is_temporal() || b.category().is_temporal() {
        return temporal::apply(a, b, &reporter);
    }

    let promoted = promote_types(a.kind(), b.kind())?;
    let kind = match (op, promoted.category()) {
        (BinaryOp::Div, Category::Boolean | Category::SignedInt | Category::UnsignedInt) => {
            Kind::Float64
        }
        (BinaryOp::FloorDiv | BinaryOp::Rem, Category::Boolean) => Kind::Int8,
        _ => promoted,
    };
    let lhs = a.cast(kind, ConvertMode::Permissive)?;
    let rhs = b.cast(kind, ConvertMode::Permissive)?;
    dispatch(kind, lhs.payload(), rhs.payload(), &reporter)
}

/// Apply `op` pairwise over two equally long batches, in bulk context.
pub fn arithmetic_elementwise(
    op: BinaryOp,
    lhs: &[ScalarValue],
    rhs: &[ScalarValue],
    policy: &ErrorPolicy,
    tracker: &DiagnosticTracker,
) -> Result<Vec<ScalarValue>> {
    if lhs.len() != rhs.len() {
        return Err(NumkindError::LengthMismatch {
            left: lhs.len(),
            right: rhs.len(),
        });
    }
    lhs.iter()
        .zip(rhs)
        .map(|(&a, &b)| arithmetic(op, a, b, Context::Bulk, policy, tracker))
        .collect()
}

/// Both payloads are of `kind`.
fn dispatch(
    kind: Kind,
    lhs: Payload,
    rhs: Payload,
    reporter: &Reporter<'_>,
) -> Result<ScalarValue> {
    match (lhs, rhs) {
        (Payload::Bool(x), Payload::Bool(y)) => boolean(x, y, reporter),
        (Payload::Int8(x), Payload::Int8(y)) => integer::apply(x, y, kind, reporter),
        (Payload::Int16(x), Payload::Int16(y)) => integer::apply(x, y, kind, reporter),
        (Payload::Int32(x), Payload::Int32(y)) => integer::apply(x, y, kind, reporter),
        (Payload::Int64(x), Payload::Int64(y)) => integer::apply(x, y, kind, reporter),
        (Payload::UInt8(x), Payload::UInt8(y)) => integer::apply(x, y, kind, reporter),
        (Payload::UInt16(x), Payload::UInt16(y)) => integer::apply(x, y, kind, reporter),
        (Payload::UInt32(x), Payload::UInt32(y)) => integer::apply(x, y, kind, reporter),
        (Payload::UInt64(x), Payload::UInt64(y)) => integer::apply(x, y, kind, reporter),
        (Payload::Float16(x), Payload::Float16(y)) => {
            float::apply(x, y, kind, ScalarValue::from, reporter)
        }
        (Payload::Float32(x), Payload::Float32(y)) => {
            float::apply(x, y, kind, ScalarValue::from, reporter)
        }
        (Payload::Float64(x), Payload::Float64(y)) => {
            let build: fn(f64) -> ScalarValue = if kind == Kind::LongDouble {
                ScalarValue::longdouble
            } else {
                ScalarValue::from
            };
            float::apply(x, y, kind, build, reporter)
        }
        (Payload::Complex64(x), Payload::Complex64(y)) => complex::apply(x, y, kind, reporter),
        (Payload::Complex128(x), Payload::Complex128(y)) => complex::apply(x, y, kind, reporter),
        _ => Err(reporter.unsupported(kind, kind)),
    }
}

/// Bool `+` is logical or, `*` is logical and.
fn boolean(x: bool, y: bool, reporter: &Reporter<'_>) -> Result<ScalarValue> {
    match reporter.op {
        BinaryOp::Add => Ok(ScalarValue::from(x || y)),
        BinaryOp::Mul => Ok(ScalarValue::from(x && y)),
        _ => Err(reporter.unsupported(Kind::Bool, Kind::Bool)),
    }
}
