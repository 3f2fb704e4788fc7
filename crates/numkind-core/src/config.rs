//! Caller-selected knobs: arithmetic context, error policy, conversion mode.
//!
//! [`ErrorPolicy`] deserializes from any `serde` format, so it can live in an
//! application's config file:
//!
//! ```toml
//! [numeric]
//! overflow = "raise"
//! divide = "silent"
//! # invalid defaults to "warn_once"
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostic::{DiagnosticPolicy, Signal};
use crate::error::NumkindError;

/// Where an arithmetic call originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// An element of a homogeneous batch. Integer overflow wraps silently.
    Bulk,
    /// A detached value. Integer overflow promotes, or wraps and reports.
    Scalar,
}

/// Per-signal diagnostic policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPolicy {
    pub overflow: DiagnosticPolicy,
    pub divide: DiagnosticPolicy,
    pub invalid: DiagnosticPolicy,
}

impl ErrorPolicy {
    /// The same policy for every signal.
    pub const fn uniform(policy: DiagnosticPolicy) -> Self {
        Self {
            overflow: policy,
            divide: policy,
            invalid: policy,
        }
    }

    #[must_use]
    pub const fn with_overflow(mut self, policy: DiagnosticPolicy) -> Self {
        self.overflow = policy;
        self
    }

    #[must_use]
    pub const fn with_divide(mut self, policy: DiagnosticPolicy) -> Self {
        self.divide = policy;
        self
    }

    #[must_use]
    pub const fn with_invalid(mut self, policy: DiagnosticPolicy) -> Self {
        self.invalid = policy;
        self
    }

    pub fn for_signal(&self, signal: Signal) -> DiagnosticPolicy {
        match signal {
            Signal::Overflow => self.overflow,
            Signal::DivideByZero => self.divide,
            Signal::Invalid => self.invalid,
        }
    }
}

/// How [`convert`](crate::value::convert) treats values that do not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvertMode {
    /// Wrap integers, truncate fractions, round floats.
    #[default]
    Permissive,
    /// Fail with `PrecisionLoss` on any change of value.
    Strict,
}

impl fmt::Display for ConvertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConvertMode::Permissive => "permissive",
            ConvertMode::Strict => "strict",
        })
    }
}

impl FromStr for ConvertMode {
    type Err = NumkindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" | "unsafe" => Ok(ConvertMode::Permissive),
            "strict" => Ok(ConvertMode::Strict),
            other => Err(NumkindError::InvalidLiteral(other.to_string())),
        }
    }
}
