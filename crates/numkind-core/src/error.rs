use thiserror::Error;

use crate::diagnostic::OverflowEvent;
use crate::kind::Kind;
use crate::ops::BinaryOp;

/// All errors returned by `numkind-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumkindError {
    /// The name (or type string) does not denote a registered kind.
    #[error("unknown kind {name:?}")]
    UnknownKind { name: String },

    /// The operand categories differ and no promotion path joins them.
    #[error("no common kind for {left} and {right}")]
    KindMismatch { left: Kind, right: Kind },

    /// A strict conversion would have changed the value.
    #[error("converting {value} to {target} loses precision")]
    PrecisionLoss { value: String, target: Kind },

    /// Integer or floating-point overflow under the `Raise` policy.
    #[error("{0}")]
    Overflow(OverflowEvent),

    /// Division by zero under the `Raise` policy.
    #[error("{0}")]
    DivideByZero(OverflowEvent),

    /// An invalid floating-point result (NaN, NaT) under the `Raise` policy.
    #[error("{0}")]
    InvalidValue(OverflowEvent),

    /// The kind carries no value payload or has no answer for the query.
    #[error("{kind} does not support {operation}")]
    UnsupportedKind { kind: Kind, operation: &'static str },

    /// The operation is undefined for these operand kinds.
    #[error("{op} is not supported between {left} and {right}")]
    UnsupportedOperation {
        op: BinaryOp,
        left: Kind,
        right: Kind,
    },

    /// Element-wise operands have different lengths.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A datetime/timedelta unit string was not recognised.
    #[error("invalid time unit {0:?}")]
    InvalidTimeUnit(String),

    /// A textual literal could not be parsed.
    #[error("invalid literal {0:?}")]
    InvalidLiteral(String),
}

/// Convenience alias used throughout `numkind-core`.
pub type Result<T> = std::result::Result<T, NumkindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_kind() {
        let err = NumkindError::UnknownKind {
            name: "int7".to_string(),
        };
        assert_eq!(err.to_string(), "unknown kind \"int7\"");
    }

    #[test]
    fn test_display_kind_mismatch() {
        let err = NumkindError::KindMismatch {
            left: Kind::Str,
            right: Kind::Int32,
        };
        assert_eq!(err.to_string(), "no common kind for str_ and int32");
    }

    #[test]
    fn test_display_unsupported_operation() {
        let err = NumkindError::UnsupportedOperation {
            op: BinaryOp::Sub,
            left: Kind::Bool,
            right: Kind::Bool,
        };
        assert_eq!(err.to_string(), "subtract is not supported between bool and bool");
    }
}
