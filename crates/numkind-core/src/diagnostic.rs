//! Overflow diagnostics and warn-once suppression.
//!
//! A [`DiagnosticTracker`] owns the warn-once state: the set of
//! `(signal, operand kind, result kind)` keys already warned about. Each key
//! moves from "never warned" to "warned" on its first event and stays there
//! for the tracker's lifetime. The check-and-insert is atomic, so concurrent
//! callers still emit exactly one warning per key.
//!
//! Tests create their own trackers; [`DiagnosticTracker::global`] is the
//! process-wide instance for callers that want one warning per process.

use core::fmt;
use core::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{NumkindError, Result};
use crate::kind::Kind;
use crate::ops::BinaryOp;
use crate::value::ScalarValue;

// ---------------------------------------------------------------------------
// Policy and signals
// ---------------------------------------------------------------------------

/// Severity applied to a detected condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticPolicy {
    /// Swallow the condition.
    Silent,
    /// Log the first occurrence per key, swallow the rest.
    #[default]
    WarnOnce,
    /// Fail the call.
    Raise,
}

impl fmt::Display for DiagnosticPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticPolicy::Silent => "silent",
            DiagnosticPolicy::WarnOnce => "warn_once",
            DiagnosticPolicy::Raise => "raise",
        })
    }
}

impl FromStr for DiagnosticPolicy {
    type Err = NumkindError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "silent" | "ignore" => Ok(DiagnosticPolicy::Silent),
            "warn_once" | "warn-once" | "warn" => Ok(DiagnosticPolicy::WarnOnce),
            "raise" => Ok(DiagnosticPolicy::Raise),
            other => Err(NumkindError::InvalidLiteral(other.to_string())),
        }
    }
}

/// Class of the detected condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Result outside the representable range.
    Overflow,
    /// Division or remainder by zero.
    DivideByZero,
    /// Undefined result (NaN from non-NaN operands, NaT in integer context).
    Invalid,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Overflow => "overflow",
            Signal::DivideByZero => "divide by zero",
            Signal::Invalid => "invalid value",
        })
    }
}

// ---------------------------------------------------------------------------
// OverflowEvent
// ---------------------------------------------------------------------------

/// A detected out-of-range result. Produced, reported, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowEvent {
    pub op: BinaryOp,
    pub signal: Signal,
    /// Kind the operation was carried out in.
    pub operand_kind: Kind,
    /// The wrapped or IEEE-754 result handed back to the caller.
    pub result: ScalarValue,
    pub severity: DiagnosticPolicy,
}

impl OverflowEvent {
    #[inline]
    pub fn result_kind(&self) -> Kind {
        self.result.kind()
    }

    fn key(&self) -> WarnKey {
        WarnKey {
            signal: self.signal,
            operand_kind: self.operand_kind,
            result_kind: self.result_kind(),
        }
    }
}

impl fmt::Display for OverflowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} encountered in {} {} (result {} {})",
            self.signal,
            self.operand_kind,
            self.op,
            self.result_kind(),
            self.result
        )
    }
}

// ---------------------------------------------------------------------------
// DiagnosticTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WarnKey {
    signal: Signal,
    operand_kind: Kind,
    result_kind: Kind,
}

/// Warn-once state with its own lifecycle.
#[derive(Debug, Default)]
pub struct DiagnosticTracker {
    warned: DashSet<WarnKey>,
    emitted: AtomicUsize,
}

static GLOBAL: Lazy<Arc<DiagnosticTracker>> = Lazy::new(|| Arc::new(DiagnosticTracker::new()));

impl DiagnosticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide tracker.
    pub fn global() -> Arc<DiagnosticTracker> {
        Arc::clone(&GLOBAL)
    }

    /// Apply `event.severity` to the event.
    ///
    /// Returns `Ok(true)` if a warning was logged, `Ok(false)` if the event
    /// was swallowed, and the matching error under `Raise`.
    pub fn report(&self, event: OverflowEvent) -> Result<bool> {
        match event.severity {
            DiagnosticPolicy::Silent => Ok(false),
            DiagnosticPolicy::WarnOnce => {
                if self.warned.insert(event.key()) {
                    self.emitted.fetch_add(1, Ordering::Relaxed);
                    log::warn!("{event}");
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            DiagnosticPolicy::Raise => Err(match event.signal {
                Signal::Overflow => NumkindError::Overflow(event),
                Signal::DivideByZero => NumkindError::DivideByZero(event),
                Signal::Invalid => NumkindError::InvalidValue(event),
            }),
        }
    }

    /// Whether a warning has been logged for this key.
    pub fn has_warned(&self, signal: Signal, operand_kind: Kind, result_kind: Kind) -> bool {
        self.warned.contains(&WarnKey {
            signal,
            operand_kind,
            result_kind,
        })
    }

    /// Total warnings logged by this tracker.
    pub fn warnings_emitted(&self) -> usize {
        self.emitted.load(Ordering::Relaxed)
    }
}
